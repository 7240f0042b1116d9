//! Block visibility policy.
//!
//! Content blocks and `sp` shortcodes declare the phases during which they
//! are shown. A block is visible only when the current phase is one of its
//! declared phases, compared exactly and case-sensitively. A block that
//! declares nothing is never visible.
//!
//! Visible content is passed through a [`MarkupRenderer`] before output.
//! Typography and nested shortcode expansion belong to the host, so the
//! renderer is a seam; [`PassThroughRenderer`] and [`ParagraphRenderer`]
//! cover the cases this workspace needs.

use sellaporter_types::{BuiltinPhase, LaunchWindowConfig, PhaseLabel};

use crate::resolver::custom_phases;

/// Whether a block declaring `declared` phases is shown in `current`.
pub fn is_block_visible<P: AsRef<str>>(declared: &[P], current: &PhaseLabel) -> bool {
    declared.iter().any(|phase| phase.as_ref() == current.as_str())
}

/// Split a comma-separated phase attribute, trimming entries and dropping
/// empty ones.
pub fn parse_phase_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|phase| !phase.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Render a block-level body if it is visible in `current`.
///
/// Returns `None` when the block is hidden. Visible bodies are texturized
/// and then paragraph-wrapped.
pub fn render_block<P: AsRef<str>, R: MarkupRenderer + ?Sized>(
    declared: &[P],
    body: &str,
    current: &PhaseLabel,
    renderer: &R,
) -> Option<String> {
    is_block_visible(declared, current).then(|| renderer.autop(&renderer.texturize(body)))
}

/// Phases a page's visibility toggles offer: the built-ins, then each
/// usable custom phase in declaration order, without duplicates.
pub fn phase_choices(config: &LaunchWindowConfig) -> Vec<String> {
    let mut choices: Vec<String> = BuiltinPhase::ALL
        .iter()
        .map(|phase| phase.as_str().to_owned())
        .collect();
    for custom in custom_phases(config) {
        if !choices.contains(&custom.name) {
            choices.push(custom.name);
        }
    }
    choices
}

/// The host's markup steps applied to visible content.
pub trait MarkupRenderer {
    /// Typography clean-up and nested shortcode expansion.
    fn texturize(&self, content: &str) -> String;

    /// Paragraph wrapping for block-level content.
    fn autop(&self, content: &str) -> String;
}

/// Leaves content untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughRenderer;

impl MarkupRenderer for PassThroughRenderer {
    fn texturize(&self, content: &str) -> String {
        content.to_owned()
    }

    fn autop(&self, content: &str) -> String {
        content.to_owned()
    }
}

/// Wraps blank-line separated paragraphs in `<p>` and turns remaining
/// newlines into `<br />`. Texturizing is a pass-through.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphRenderer;

impl MarkupRenderer for ParagraphRenderer {
    fn texturize(&self, content: &str) -> String {
        content.to_owned()
    }

    fn autop(&self, content: &str) -> String {
        let normalized = content.replace("\r\n", "\n");
        normalized
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .map(|paragraph| format!("<p>{}</p>\n", paragraph.replace('\n', "<br />\n")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use sellaporter_types::{CustomPhaseRecord, RawOffset};

    use super::*;

    #[test]
    fn empty_declaration_is_never_visible() {
        let none: [&str; 0] = [];
        for phase in ["presale", "sale", "postsale", "earlybird", ""] {
            assert!(!is_block_visible(&none, &PhaseLabel::from(phase)));
        }
    }

    #[test]
    fn membership_decides_visibility() {
        let sale = PhaseLabel::from(BuiltinPhase::Sale);
        assert!(is_block_visible(&["sale", "postsale"], &sale));
        assert!(!is_block_visible(&["sale"], &PhaseLabel::from(BuiltinPhase::Presale)));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!is_block_visible(&["Sale"], &PhaseLabel::from("sale")));
    }

    #[test]
    fn phase_list_is_trimmed() {
        assert_eq!(
            parse_phase_list(" presale, earlybird ,,sale "),
            vec!["presale", "earlybird", "sale"]
        );
        assert!(parse_phase_list("").is_empty());
        assert!(parse_phase_list(" , ").is_empty());
    }

    #[test]
    fn hidden_block_renders_nothing() {
        let current = PhaseLabel::from("postsale");
        assert_eq!(render_block(&["sale"], "Buy now", &current, &ParagraphRenderer), None);
    }

    #[test]
    fn visible_block_is_paragraph_wrapped() {
        let current = PhaseLabel::from("sale");
        let html = render_block(&["sale"], "Buy now\nToday only\n\nReally.", &current, &ParagraphRenderer);
        assert_eq!(
            html.as_deref(),
            Some("<p>Buy now<br />\nToday only</p>\n<p>Really.</p>\n")
        );
    }

    #[test]
    fn choices_list_builtins_then_custom() {
        let config = LaunchWindowConfig {
            phases: vec![
                CustomPhaseRecord {
                    name: "earlybird".to_owned(),
                    start_offset: RawOffset::Days(10),
                    end_offset: RawOffset::Days(5),
                },
                CustomPhaseRecord {
                    name: "sale".to_owned(),
                    start_offset: RawOffset::Days(1),
                    end_offset: RawOffset::Days(0),
                },
                CustomPhaseRecord {
                    name: "earlybird".to_owned(),
                    start_offset: RawOffset::Days(3),
                    end_offset: RawOffset::Days(2),
                },
            ],
            ..LaunchWindowConfig::default()
        };
        assert_eq!(
            phase_choices(&config),
            vec!["presale", "sale", "postsale", "earlybird"]
        );
    }
}
