//! Collaborator traits the resolver reads from.
//!
//! The resolver never reaches into ambient state. Whatever hosts a page
//! (the YAML site configuration, a test fixture, a content store) exposes
//! it through [`LaunchSource`], and the current time comes from a
//! [`Clock`].

use chrono::{DateTime, Utc};
use sellaporter_types::LaunchWindowConfig;

/// A page whose phase can be resolved.
pub trait LaunchSource {
    /// Whether the page uses the phase-aware template.
    ///
    /// Pages that return `false` always resolve to the empty label.
    fn is_phase_aware(&self) -> bool;

    /// The page's launch configuration, or `None` if the configuration
    /// store has nothing for it.
    fn launch_window(&self) -> Option<&LaunchWindowConfig>;
}

/// A bare launch configuration is always a phase-aware page.
impl LaunchSource for LaunchWindowConfig {
    fn is_phase_aware(&self) -> bool {
        true
    }

    fn launch_window(&self) -> Option<&LaunchWindowConfig> {
        Some(self)
    }
}

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Return the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for tests and previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
