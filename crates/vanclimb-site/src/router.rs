//! Axum router construction for the landing page.
//!
//! Assembles the page, navigation, and `WebSocket` routes into a single
//! [`Router`] with CORS and request tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::render::CROWD_SOCKET_PATH;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the site.
///
/// The router includes:
/// - `GET /` -- the landing page
/// - `GET /ws/crowd` -- `WebSocket` crowd update stream
/// - `GET /go/{fragment}` -- redirect to a page section
/// - `GET /api/sections` -- section ids in page order
/// - `GET /health` -- liveness probe
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route(CROWD_SOCKET_PATH, get(ws::ws_crowd))
        .route("/go/{fragment}", get(handlers::go_to_section))
        .route("/api/sections", get(handlers::list_sections))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
