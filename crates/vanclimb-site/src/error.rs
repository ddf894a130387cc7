//! Error types for the landing page server.
//!
//! [`SiteError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use vanclimb_core::clock::ClockError;
use vanclimb_core::session::SessionError;

use crate::render::RenderError;

/// Errors that can occur in the site layer.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A page template failed to load or render.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// A crowd session could not be started for a socket.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// The configured venue clock is unusable.
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
