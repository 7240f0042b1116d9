//! REST API endpoint handlers for the page API.
//!
//! All handlers read from the shared [`AppState`]. Each request resolves
//! the phase of the page it touches once, through a fresh [`RequestPhase`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/pages` | List all pages with their phase |
//! | `GET` | `/api/pages/{slug}` | Single page with its phase |
//! | `GET` | `/api/pages/{slug}/blocks` | Blocks visible in the current phase |
//! | `GET` | `/api/pages/{slug}/phases` | Phase choices for visibility toggles |

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::{DateTime, Utc};
use sellaporter_core::config::PageConfig;
use sellaporter_core::request::RequestPhase;
use sellaporter_core::source::{Clock, LaunchSource};
use sellaporter_core::visibility::{phase_choices, render_block, ParagraphRenderer};
use sellaporter_types::{LaunchWindowConfig, PhaseLabel, ResolutionContext};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Namespaced phase testing parameters accepted by every page endpoint.
///
/// Both the bracketed (`sellaporter[phase]`) and dotted (`sellaporter.phase`)
/// spellings are read; the bracketed one wins when both are sent. A query
/// string that does not deserialize is rejected as [`ApiError::InvalidQuery`].
#[derive(Debug, Default, serde::Deserialize, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct PhaseQuery {
    /// Force this phase, skipping all date logic.
    #[serde(rename = "sellaporter[phase]")]
    pub phase: Option<String>,

    /// Dotted spelling of [`Self::phase`].
    #[serde(rename = "sellaporter.phase")]
    pub phase_dotted: Option<String>,

    /// Resolve at this instant instead of now (RFC 3339 or Unix seconds).
    #[serde(rename = "sellaporter[now]")]
    pub now: Option<String>,

    /// Dotted spelling of [`Self::now`].
    #[serde(rename = "sellaporter.now")]
    pub now_dotted: Option<String>,
}

impl PhaseQuery {
    /// The forced phase, preferring the bracketed key.
    pub fn forced_phase(&self) -> Option<&str> {
        self.phase.as_deref().or(self.phase_dotted.as_deref())
    }

    /// The raw test time, preferring the bracketed key.
    pub fn test_time(&self) -> Option<&str> {
        self.now.as_deref().or(self.now_dotted.as_deref())
    }

    /// Build the resolution context for this request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidQuery`] if the test time cannot be parsed.
    pub fn context(&self, clock: &dyn Clock) -> Result<ResolutionContext, ApiError> {
        let now = match self.test_time() {
            Some(raw) => parse_test_time(raw)?,
            None => clock.now(),
        };
        let mut context = ResolutionContext::at(now);
        if let Some(phase) = self.forced_phase() {
            debug!(phase, "Phase override requested");
            context = context.with_override(phase);
        }
        Ok(context)
    }
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page listing every page and its current phase.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let context = ResolutionContext::at(state.clock.now());

    let mut rows = String::new();
    for page in &state.site.pages {
        let phase = RequestPhase::new(&state.resolver, page, context.clone());
        let shown = if phase.get().is_empty() { "-" } else { phase.get().as_str() };
        let _ = writeln!(
            rows,
            "        <tr><td><a href=\"/api/pages/{slug}\">{slug}</a></td><td>{title}</td><td>{shown}</td></tr>",
            slug = escape_html(&page.slug),
            title = escape_html(&page.title),
            shown = escape_html(shown),
        );
    }

    let site_name = escape_html(&state.site.site.name);
    let offset = state.resolver.utc_offset();
    let now = context.now.to_rfc3339();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{site_name} -- Sellaporter</title>
    <style>
        body {{ font-family: system-ui, sans-serif; padding: 2rem; max-width: 800px; margin: 0 auto; }}
        table {{ border-collapse: collapse; width: 100%; }}
        td, th {{ border-bottom: 1px solid #ddd; padding: 0.4rem; text-align: left; }}
        .subtitle {{ color: #666; }}
    </style>
</head>
<body>
    <h1>{site_name}</h1>
    <p class="subtitle">Now: {now} &middot; authored times in UTC{offset}</p>
    <table>
        <tr><th>Page</th><th>Title</th><th>Phase</th></tr>
{rows}    </table>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/pages -- list pages
// ---------------------------------------------------------------------------

/// List all pages with their current phase.
pub async fn list_pages(
    State(state): State<Arc<AppState>>,
    params: PhaseQuery,
) -> Result<impl IntoResponse, ApiError> {
    let context = params.context(state.clock.as_ref())?;

    let pages: Vec<serde_json::Value> = state
        .site
        .pages
        .iter()
        .map(|page| {
            let phase = RequestPhase::new(&state.resolver, page, context.clone());
            page_json(page, phase.get())
        })
        .collect();

    Ok(Json(serde_json::json!({
        "count": pages.len(),
        "pages": pages,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/pages/{slug} -- single page
// ---------------------------------------------------------------------------

/// Return a single page resource with its `sellaporter_phase` field.
pub async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    params: PhaseQuery,
) -> Result<impl IntoResponse, ApiError> {
    let page = find_page(&state, &slug)?;
    let context = params.context(state.clock.as_ref())?;
    let phase = RequestPhase::new(&state.resolver, page, context);

    Ok(Json(page_json(page, phase.get())))
}

// ---------------------------------------------------------------------------
// GET /api/pages/{slug}/blocks -- visible blocks
// ---------------------------------------------------------------------------

/// Return the page's blocks that are visible in the current phase, with
/// their bodies rendered to HTML paragraphs.
pub async fn get_blocks(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    params: PhaseQuery,
) -> Result<impl IntoResponse, ApiError> {
    let page = find_page(&state, &slug)?;
    let context = params.context(state.clock.as_ref())?;
    let phase = RequestPhase::new(&state.resolver, page, context);

    let blocks: Vec<serde_json::Value> = page
        .blocks
        .iter()
        .filter_map(|block| {
            render_block(block.phases.as_slice(), &block.body, phase.get(), &ParagraphRenderer).map(
                |html| {
                    serde_json::json!({
                        "name": block.name,
                        "phases": block.phases,
                        "html": html,
                    })
                },
            )
        })
        .collect();

    Ok(Json(serde_json::json!({
        "slug": page.slug,
        "sellaporter_phase": phase.get(),
        "count": blocks.len(),
        "hidden": page.blocks.len().saturating_sub(blocks.len()),
        "blocks": blocks,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/pages/{slug}/phases -- phase choices
// ---------------------------------------------------------------------------

/// Return the phases a block on this page can be tagged with.
pub async fn get_phases(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let page = find_page(&state, &slug)?;
    let choices = page
        .launch_window()
        .map_or_else(|| phase_choices(&LaunchWindowConfig::default()), phase_choices);

    Ok(Json(serde_json::json!({
        "slug": page.slug,
        "choices": choices,
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Escape text for an HTML body or a double-quoted attribute.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn find_page<'a>(state: &'a AppState, slug: &str) -> Result<&'a PageConfig, ApiError> {
    state
        .page(slug)
        .ok_or_else(|| ApiError::NotFound(format!("page {slug}")))
}

fn page_json(page: &PageConfig, phase: &PhaseLabel) -> serde_json::Value {
    serde_json::json!({
        "slug": page.slug,
        "title": page.title,
        "template": page.template,
        "phase_aware": page.is_phase_aware(),
        "sellaporter_phase": phase,
    })
}

/// Parse a test time given as RFC 3339 or Unix seconds.
///
/// # Errors
///
/// Returns [`ApiError::InvalidQuery`] if neither form matches.
pub fn parse_test_time(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| ApiError::InvalidQuery(format!("sellaporter[now]: cannot parse `{raw}`")))
}
