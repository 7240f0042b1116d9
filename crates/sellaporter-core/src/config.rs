//! Configuration loading and typed config structures for Sellaporter.
//!
//! The site configuration lives in `sellaporter.yaml`. It carries the site's
//! UTC offset, the API server and logging settings, and every page with its
//! launch window, custom phases, and phase-tagged content blocks. Pages are
//! read-only once loaded; each request resolves against them afresh.

use std::collections::BTreeSet;
use std::path::Path;

use sellaporter_types::LaunchWindowConfig;
use serde::Deserialize;

use crate::normalize;
use crate::source::LaunchSource;

/// Template name that marks a page as phase-aware.
pub const PHASE_AWARE_TEMPLATE: &str = "sellaporter.php";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level site configuration.
///
/// Mirrors the structure of `sellaporter.yaml`. Every section has defaults,
/// so an empty file is a valid (page-less) site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteConfig {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteSection,

    /// Page API server settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Configured pages.
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

impl SiteConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override the server section:
    /// - `SELLAPORTER_HOST` overrides `server.host`
    /// - `SELLAPORTER_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a malformed UTC offset, an
    /// empty page slug, or a slug used twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize::validate_offset(&self.site.utc_offset).map_err(|e| ConfigError::Invalid {
            reason: format!("site.utc_offset: {e}"),
        })?;

        let mut seen = BTreeSet::new();
        for page in &self.pages {
            if page.slug.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    reason: format!("page `{}` has an empty slug", page.title),
                });
            }
            if !seen.insert(page.slug.as_str()) {
                return Err(ConfigError::Invalid {
                    reason: format!("duplicate page slug `{}`", page.slug),
                });
            }
        }
        Ok(())
    }

    /// Look up a page by slug.
    pub fn page(&self, slug: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|page| page.slug == slug)
    }
}

/// Site-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteSection {
    /// Human-readable site name.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Offset authored launch times are in (e.g. `+02:00`).
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            utc_offset: default_utc_offset(),
        }
    }
}

/// Page API server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSection {
    /// Apply environment variable overrides for the bind address.
    ///
    /// An unparseable `SELLAPORTER_PORT` is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SELLAPORTER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SELLAPORTER_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
        {
            self.port = port;
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// One page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageConfig {
    /// URL slug, unique per site.
    pub slug: String,

    /// Page title.
    #[serde(default)]
    pub title: String,

    /// Page template; [`PHASE_AWARE_TEMPLATE`] enables phases.
    #[serde(default = "default_template")]
    pub template: String,

    /// Launch window and custom phases. Absent means the page has no
    /// launch configuration.
    #[serde(default)]
    pub launch: Option<LaunchWindowConfig>,

    /// Content blocks in display order.
    #[serde(default)]
    pub blocks: Vec<BlockConfig>,
}

impl LaunchSource for PageConfig {
    fn is_phase_aware(&self) -> bool {
        self.template == PHASE_AWARE_TEMPLATE
    }

    fn launch_window(&self) -> Option<&LaunchWindowConfig> {
        self.launch.as_ref()
    }
}

/// A phase-tagged content block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlockConfig {
    /// Optional block name, used only in API output.
    #[serde(default)]
    pub name: String,

    /// Phases in which the block is visible. Empty means never.
    #[serde(default, alias = "visible_phases")]
    pub phases: Vec<String>,

    /// Block body.
    #[serde(default)]
    pub body: String,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_site_name() -> String {
    "Sellaporter".to_owned()
}

fn default_utc_offset() -> String {
    crate::resolver::DEFAULT_UTC_OFFSET.to_owned()
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_template() -> String {
    "default".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sellaporter_types::RawOffset;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SiteConfig::default();
        assert_eq!(config.site.utc_offset, "+00:00");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.pages.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
site:
  name: "Course Launch"
  utc_offset: "-05:00"

server:
  host: "127.0.0.1"
  port: 9090

logging:
  level: "debug"
  json: true

pages:
  - slug: course
    title: "The Course"
    template: sellaporter.php
    launch:
      start_date: "2024-06-01"
      start_time: "9:00"
      end_date: "20240610"
      end_time: "17:00"
      phases:
        - name: earlybird
          start_offset: 10
          end_offset: "5"
    blocks:
      - name: waitlist
        visible_phases: [presale, earlybird]
        body: "Join the waitlist."
      - name: buy
        phases: [sale]
        body: "Buy now."
  - slug: about
    title: "About"
"#;

        let config = SiteConfig::parse(yaml).unwrap();
        assert_eq!(config.site.name, "Course Launch");
        assert_eq!(config.site.utc_offset, "-05:00");
        assert_eq!(config.server.port, 9090);
        assert!(config.logging.json);
        assert_eq!(config.pages.len(), 2);

        let course = config.page("course").unwrap();
        assert!(course.is_phase_aware());
        let launch = course.launch_window().unwrap();
        assert_eq!(launch.end_date, "20240610");
        let earlybird = launch.phases.first().unwrap();
        assert_eq!(earlybird.start_offset, RawOffset::Days(10));
        assert_eq!(earlybird.end_offset.days(), Some(5));
        assert_eq!(course.blocks.len(), 2);
        assert_eq!(course.blocks.first().unwrap().phases, vec!["presale", "earlybird"]);

        let about = config.page("about").unwrap();
        assert!(!about.is_phase_aware());
        assert!(about.launch_window().is_none());
    }

    #[test]
    fn unusable_offsets_skip_only_their_row() {
        let yaml = r#"
pages:
  - slug: course
    title: "The Course"
    template: sellaporter.php
    launch:
      start_date: "2024-06-01"
      end_date: "2024-06-10"
      phases:
        - name: fractional
          start_offset: 10.5
          end_offset: 5
        - name: blank
          start_offset:
          end_offset: 0
        - name: earlybird
          start_offset: 10
          end_offset: 5
"#;

        let config = SiteConfig::parse(yaml).unwrap();
        let course = config.page("course").unwrap();
        let launch = course.launch_window().unwrap();
        assert_eq!(launch.phases.len(), 3);

        let usable = crate::resolver::custom_phases(launch);
        assert_eq!(usable.len(), 1);
        assert_eq!(usable.first().unwrap().name, "earlybird");

        let now = chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2024, 5, 24, 0, 0, 0).unwrap();
        let phase = crate::resolver::PhaseResolver::default()
            .resolve_page(course, &sellaporter_types::ResolutionContext::at(now));
        assert_eq!(phase, "earlybird");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "site:\n  utc_offset: \"+02:00\"\n";
        let config = SiteConfig::parse(yaml).unwrap();
        assert_eq!(config.site.utc_offset, "+02:00");
        assert_eq!(config.site.name, "Sellaporter");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SiteConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn bad_offset_is_rejected() {
        let yaml = "site:\n  utc_offset: \"CET\"\n";
        assert!(matches!(
            SiteConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let yaml = "pages:\n  - slug: launch\n  - slug: launch\n";
        assert!(matches!(
            SiteConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn empty_slug_is_rejected() {
        let yaml = "pages:\n  - slug: \"  \"\n    title: Nameless\n";
        assert!(matches!(
            SiteConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("sellaporter.yaml");
        if path.exists() {
            let config = SiteConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
