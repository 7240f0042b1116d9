//! Per-request resolution input.

use chrono::{DateTime, Utc};

/// What a single request asks the resolver to classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    /// The instant to classify. Wall-clock time unless a test time was supplied.
    pub now: DateTime<Utc>,

    /// A phase forced by the request. When present it is returned verbatim
    /// and no date logic runs.
    pub override_phase: Option<String>,
}

impl ResolutionContext {
    /// Classify the given instant with no override.
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            override_phase: None,
        }
    }

    /// Attach a forced phase.
    #[must_use]
    pub fn with_override(mut self, phase: impl Into<String>) -> Self {
        self.override_phase = Some(phase.into());
        self
    }
}
