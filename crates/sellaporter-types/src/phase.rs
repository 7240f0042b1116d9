//! Phase labels.
//!
//! A page is always in exactly one phase. The three built-in phases are
//! derived from the launch window; authors may add any number of named
//! custom phases on top. Both kinds travel as a [`PhaseLabel`], which is a
//! plain string on the wire.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One of the three phases derived from the launch window alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum BuiltinPhase {
    /// Before the launch start instant.
    Presale,
    /// Between launch start (inclusive) and launch end (exclusive).
    Sale,
    /// At or after the launch end instant.
    Postsale,
}

impl BuiltinPhase {
    /// All built-in phases in chronological order.
    pub const ALL: [Self; 3] = [Self::Presale, Self::Sale, Self::Postsale];

    /// The label used for this phase in shortcodes and the API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Presale => "presale",
            Self::Sale => "sale",
            Self::Postsale => "postsale",
        }
    }
}

impl core::fmt::Display for BuiltinPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The phase a page is in: a built-in tag, a custom phase name, or empty
/// when the page is not phase-aware.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct PhaseLabel(String);

impl PhaseLabel {
    /// The empty label returned for pages that are not phase-aware.
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Return the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the not-applicable label.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this label names the given built-in phase.
    pub fn is_builtin(&self, phase: BuiltinPhase) -> bool {
        self.0 == phase.as_str()
    }

    /// Consume the label and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<BuiltinPhase> for PhaseLabel {
    fn from(phase: BuiltinPhase) -> Self {
        Self(phase.as_str().to_owned())
    }
}

impl From<String> for PhaseLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<&str> for PhaseLabel {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl PartialEq<str> for PhaseLabel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PhaseLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
