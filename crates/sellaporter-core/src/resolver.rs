//! Phase resolution: which phase a page is in at a given instant.
//!
//! Resolution runs in a fixed order:
//!
//! 1. A forced phase from the request wins outright.
//! 2. The launch window decides between `presale`, `sale`, and `postsale`.
//! 3. Every custom phase is then checked in declaration order, and the last
//!    one whose window contains the instant replaces the result, including
//!    a `sale` or `postsale` result from step 2.
//!
//! Configuration problems never fail a render. An unusable launch start
//! leaves the page in `presale`; an unusable launch end skips step 2 but
//! still scans custom phases. Both are reported through `tracing`.

use chrono::{DateTime, Utc};
use sellaporter_types::{
    BuiltinPhase, CustomPhase, LaunchWindow, LaunchWindowConfig, PhaseLabel, ResolutionContext,
};
use tracing::{debug, warn};

use crate::normalize::{self, NormalizeError};
use crate::source::LaunchSource;

/// Offset used when none is configured.
pub const DEFAULT_UTC_OFFSET: &str = "+00:00";

/// Resolves the phase of a page.
///
/// The resolver holds only the site's UTC offset; everything else arrives
/// per call, so one resolver serves every page and request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseResolver {
    utc_offset: String,
}

impl Default for PhaseResolver {
    fn default() -> Self {
        Self::new(DEFAULT_UTC_OFFSET)
    }
}

impl PhaseResolver {
    /// Create a resolver that reads authored times in the given offset
    /// (e.g. `+02:00`).
    pub fn new(utc_offset: impl Into<String>) -> Self {
        Self {
            utc_offset: utc_offset.into(),
        }
    }

    /// The UTC offset authored times are read in.
    pub fn utc_offset(&self) -> &str {
        &self.utc_offset
    }

    /// Resolve the phase of a page.
    ///
    /// Returns the empty label when the page is not phase-aware or has no
    /// launch configuration.
    pub fn resolve_page<S: LaunchSource + ?Sized>(
        &self,
        source: &S,
        context: &ResolutionContext,
    ) -> PhaseLabel {
        if !source.is_phase_aware() {
            debug!("Page is not phase-aware");
            return PhaseLabel::empty();
        }
        let Some(config) = source.launch_window() else {
            debug!("No launch configuration for page");
            return PhaseLabel::empty();
        };
        self.resolve(context, config)
    }

    /// Resolve the phase for a launch configuration.
    pub fn resolve(&self, context: &ResolutionContext, config: &LaunchWindowConfig) -> PhaseLabel {
        if let Some(forced) = &context.override_phase {
            debug!(phase = %forced, "Phase forced by request");
            return PhaseLabel::from(forced.as_str());
        }

        let mut phase = PhaseLabel::from(BuiltinPhase::Presale);

        let start = match self.instant(&config.start_date, &config.start_time) {
            Ok(start) => start,
            Err(e) => {
                warn!(error = %e, date = %config.start_date, "Launch start unusable, staying in presale");
                return phase;
            }
        };

        match self.instant(&config.end_date, &config.end_time) {
            Ok(end) => phase = LaunchWindow { start, end }.phase_at(context.now).into(),
            Err(e) => {
                warn!(error = %e, date = %config.end_date, "Launch end unusable, skipping sale window");
            }
        }

        for custom in custom_phases(config) {
            if custom.contains(start, context.now) {
                phase = PhaseLabel::from(custom.name);
            }
        }

        phase
    }

    fn instant(&self, date_raw: &str, time_raw: &str) -> Result<DateTime<Utc>, NormalizeError> {
        normalize::to_instant(date_raw, time_raw, &self.utc_offset)
            .map(|instant| instant.with_timezone(&Utc))
    }
}

/// Validate the authored custom phases, keeping declaration order.
///
/// Rows with a blank name or a non-integer offset are skipped with a
/// warning. Names and negative offsets are kept as authored.
pub fn custom_phases(config: &LaunchWindowConfig) -> Vec<CustomPhase> {
    config
        .phases
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let name = record.name.as_str();
            if name.trim().is_empty() {
                warn!(index, "Custom phase has no name, skipping");
                return None;
            }
            let (Some(start_offset_days), Some(end_offset_days)) =
                (record.start_offset.days(), record.end_offset.days())
            else {
                warn!(
                    index,
                    phase = name,
                    start_offset = ?record.start_offset,
                    end_offset = ?record.end_offset,
                    "Custom phase offsets are not whole days, skipping"
                );
                return None;
            };
            Some(CustomPhase {
                name: name.to_owned(),
                start_offset_days,
                end_offset_days,
            })
        })
        .collect()
}
