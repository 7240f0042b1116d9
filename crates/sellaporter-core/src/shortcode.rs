//! Shortcodes available to page content.
//!
//! | Tag | Purpose |
//! |-----|---------|
//! | `sp` | Text shown only in the listed phases |
//! | `spNotice` | Small-print notice |
//! | `spButton` | Call-to-action link, optionally opening the popover |
//!
//! Locating shortcodes in free text is the host's job. These types take the
//! already-parsed attributes and enclosed content and produce the markup.

use std::collections::BTreeMap;

use sellaporter_types::PhaseLabel;
use tracing::warn;

use crate::visibility::{is_block_visible, parse_phase_list, MarkupRenderer};

/// Appended to `sp` content that declares no phase.
pub const NO_PHASE_WARNING: &str = "<strong>No phase set. Was this on purpose?</strong>";

/// Link used by `spButton` when no `href` is given.
pub const MISSING_HREF: &str = "#no-link-supplied";

/// The `sp` conditional text shortcode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseShortcode {
    /// Raw `phase` attribute, a comma-separated phase list.
    pub phase: Option<String>,
    /// Skip paragraph wrapping.
    pub inline: bool,
}

impl PhaseShortcode {
    /// Build from parsed shortcode attributes (`phase`, `inline`).
    pub fn from_attrs(attrs: &BTreeMap<String, String>) -> Self {
        Self {
            phase: attrs.get("phase").cloned(),
            inline: attrs.get("inline").is_some_and(|value| is_truthy(value)),
        }
    }

    /// Render the enclosed content for the current phase.
    ///
    /// Hidden content renders as an empty string. Content with no declared
    /// phase is not hidden: it is emitted with [`NO_PHASE_WARNING`] appended
    /// so the author notices.
    pub fn render<R: MarkupRenderer + ?Sized>(
        &self,
        content: &str,
        current: &PhaseLabel,
        renderer: &R,
    ) -> String {
        let phases = self.phase.as_deref().map(parse_phase_list).unwrap_or_default();

        if phases.is_empty() {
            warn!(current = %current, "sp shortcode without a phase attribute");
            let flagged = format!("{content}{NO_PHASE_WARNING}");
            return self.markup(&flagged, renderer);
        }

        if is_block_visible(phases.as_slice(), current) {
            self.markup(content, renderer)
        } else {
            String::new()
        }
    }

    fn markup<R: MarkupRenderer + ?Sized>(&self, content: &str, renderer: &R) -> String {
        let text = renderer.texturize(content);
        if self.inline { text } else { renderer.autop(&text) }
    }
}

/// The `spNotice` small-print shortcode.
pub fn notice(content: &str) -> String {
    format!("<small class=\"sp-text--notice\">{content}</small>")
}

/// The `spButton` call-to-action shortcode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonShortcode {
    /// Link target.
    pub href: Option<String>,
    /// `popover` turns the button into a popover trigger.
    pub action: Option<String>,
}

impl ButtonShortcode {
    /// Build from parsed shortcode attributes (`href`, `action`).
    pub fn from_attrs(attrs: &BTreeMap<String, String>) -> Self {
        Self {
            href: attrs.get("href").cloned(),
            action: attrs.get("action").cloned(),
        }
    }

    /// Render the button around `content`.
    pub fn render(&self, content: &str) -> String {
        let mut href = self
            .href
            .as_deref()
            .filter(|href| !href.is_empty())
            .unwrap_or(MISSING_HREF);
        let mut classes = vec!["sp-button"];

        if self.action.as_deref() == Some("popover") {
            classes.push("sp-button--popover");
            href = "#";
        }

        format!("<a href=\"{href}\" class=\"{}\">{content}</a>", classes.join(" "))
    }
}

/// Attribute truthiness: anything but empty, `0`, or `false`.
fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}
