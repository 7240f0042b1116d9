//! Launch window and custom phase types.
//!
//! Authors enter launch dates, times, and custom phase offsets as free-form
//! values. The `*Config` / `*Record` types mirror that raw input exactly;
//! [`LaunchWindow`] and [`CustomPhase`] are the normalised forms the
//! resolver classifies against.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::phase::BuiltinPhase;

/// Seconds in one custom-phase offset day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Raw launch configuration for one page, as authored.
///
/// Every field may be empty. Field aliases accept the original custom-field
/// names (`launch_start_date`, `launch_phases`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LaunchWindowConfig {
    /// Launch start date, any separators (e.g. `2016-01-14` or `20160114`).
    #[serde(default, alias = "launch_start_date")]
    pub start_date: String,

    /// Launch start time of day (e.g. `9:30`).
    #[serde(default, alias = "launch_start_time")]
    pub start_time: String,

    /// Launch end date.
    #[serde(default, alias = "launch_end_date")]
    pub end_date: String,

    /// Launch end time of day.
    #[serde(default, alias = "launch_end_time")]
    pub end_time: String,

    /// Custom phases in declaration order.
    #[serde(default, alias = "launch_phases")]
    pub phases: Vec<CustomPhaseRecord>,
}

/// One authored custom phase row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CustomPhaseRecord {
    /// Phase label used as the visibility matching key.
    #[serde(default, alias = "phase_name")]
    pub name: String,

    /// Days before launch start at which the phase opens.
    #[serde(default, alias = "phase_start_offset")]
    pub start_offset: RawOffset,

    /// Days before launch start at which the phase closes.
    #[serde(default, alias = "phase_end_offset")]
    pub end_offset: RawOffset,
}

/// A day offset as authored: a number, text holding one, or anything else.
///
/// Every YAML value deserializes into some variant, so one malformed row
/// never rejects the whole site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum RawOffset {
    /// A numeric offset.
    Days(i64),
    /// A textual offset, e.g. `"10"` from a text input.
    Text(String),
    /// Any other value (`null`, `10.5`, a list). Never a whole day count.
    Other(serde_json::Value),
}

impl RawOffset {
    /// The offset in whole days, or `None` if the value is not an integer.
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Days(days) => Some(*days),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

impl Default for RawOffset {
    fn default() -> Self {
        Self::Days(0)
    }
}

impl From<i64> for RawOffset {
    fn from(days: i64) -> Self {
        Self::Days(days)
    }
}

/// The primary sale window with both ends normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchWindow {
    /// First instant of the sale.
    pub start: DateTime<Utc>,
    /// First instant after the sale.
    pub end: DateTime<Utc>,
}

impl LaunchWindow {
    /// Classify `now` against the window alone, ignoring custom phases.
    ///
    /// `now == start` is already `Sale`; `now == end` is already `Postsale`.
    pub fn phase_at(&self, now: DateTime<Utc>) -> BuiltinPhase {
        if now < self.start {
            BuiltinPhase::Presale
        } else if now >= self.end {
            BuiltinPhase::Postsale
        } else {
            BuiltinPhase::Sale
        }
    }
}

/// A custom phase with validated integer offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPhase {
    /// Phase label.
    pub name: String,
    /// Days before launch start at which the phase opens.
    pub start_offset_days: i64,
    /// Days before launch start at which the phase closes.
    pub end_offset_days: i64,
}

impl CustomPhase {
    /// Compute the inclusive `[open, close]` window relative to `launch_start`.
    ///
    /// Returns `None` if an offset is too large to represent. The window may
    /// be inverted (`open > close`), in which case nothing falls inside it.
    pub fn window(&self, launch_start: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let open = launch_start.checked_sub_signed(days_before(self.start_offset_days)?)?;
        let close = launch_start.checked_sub_signed(days_before(self.end_offset_days)?)?;
        Some((open, close))
    }

    /// Whether `now` falls within this phase's window (both ends inclusive).
    pub fn contains(&self, launch_start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.window(launch_start)
            .is_some_and(|(open, close)| open <= now && now <= close)
    }
}

fn days_before(days: i64) -> Option<TimeDelta> {
    TimeDelta::try_seconds(days.checked_mul(SECONDS_PER_DAY)?)
}
