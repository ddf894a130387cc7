//! HTTP endpoint handlers for the landing page server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | The landing page |
//! | `GET` | `/go/{fragment}` | Redirect to a section of the page |
//! | `GET` | `/api/sections` | Section ids in page order |
//! | `GET` | `/health` | Liveness probe |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect};
use chrono::Utc;
use tracing::debug;
use vanclimb_core::clock::WallClock;
use vanclimb_types::{CrowdReading, Section};

use crate::error::SiteError;
use crate::render::{PageView, section_links};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- landing page
// ---------------------------------------------------------------------------

/// Render the landing page.
///
/// The crowd meter starts at the seed reading; live values arrive over the
/// page's own socket once the script connects.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, SiteError> {
    let now = state.clock.now();
    let reading = CrowdReading::seed(now.with_timezone(&Utc));
    let view = PageView::new(&state.config, reading, now);
    let html = state.renderer.render_page(&view)?;
    Ok(Html(html))
}

// ---------------------------------------------------------------------------
// GET /go/{fragment} -- section redirect
// ---------------------------------------------------------------------------

/// Redirect to the page with a section fragment.
///
/// Unknown fragments land on the top of the page instead of failing.
pub async fn go_to_section(Path(fragment): Path<String>) -> Redirect {
    match Section::from_fragment(&fragment) {
        Some(section) => Redirect::to(&format!("/#{}", section.id())),
        None => {
            debug!(%fragment, "unknown section fragment, redirecting to top");
            Redirect::to("/")
        }
    }
}

// ---------------------------------------------------------------------------
// GET /api/sections -- section listing
// ---------------------------------------------------------------------------

/// List the navigable sections in page order.
pub async fn list_sections() -> impl IntoResponse {
    let sections = section_links();
    Json(serde_json::json!({
        "count": sections.len(),
        "sections": sections,
    }))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe, with the number of live crowd sessions.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "live_sessions": state.live_sessions(),
    }))
}
