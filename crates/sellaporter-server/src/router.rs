//! Axum router construction for the page API.
//!
//! Assembles all routes into a single [`Router`] with CORS enabled so page
//! scripts on other origins can read the current phase.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the page API.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/pages` -- list pages
/// - `GET /api/pages/{slug}` -- single page
/// - `GET /api/pages/{slug}/blocks` -- visible blocks
/// - `GET /api/pages/{slug}/phases` -- phase choices
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // REST API
        .route("/api/pages", get(handlers::list_pages))
        .route("/api/pages/{slug}", get(handlers::get_page))
        .route("/api/pages/{slug}/blocks", get(handlers::get_blocks))
        .route("/api/pages/{slug}/phases", get(handlers::get_phases))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
