//! Page API server for Sellaporter.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Page resources** carrying a `sellaporter_phase` field with the
//!   page's current phase
//! - **Rendered blocks** of a page, filtered to those visible in the
//!   current phase
//! - **Phase choices** a page's visibility toggles offer
//! - **Minimal HTML status page** (`GET /`) listing pages and phases
//!
//! # Testing phases
//!
//! Every page endpoint accepts two namespaced query parameters:
//!
//! - `sellaporter[phase]=NAME` forces the phase outright
//! - `sellaporter[now]=TIME` resolves at another instant (RFC 3339 or Unix
//!   seconds)
//!
//! The dotted spellings `sellaporter.phase` / `sellaporter.now` are also
//! accepted; the bracketed spelling wins when both are present.
//!
//! # Architecture
//!
//! The loaded [`SiteConfig`](sellaporter_core::config::SiteConfig) is shared
//! read-only. Each request builds its own
//! [`RequestPhase`](sellaporter_core::request::RequestPhase), so the phase is
//! resolved at most once per request and never cached across requests.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
