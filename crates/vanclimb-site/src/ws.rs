//! `WebSocket` handler for the live crowd meter.
//!
//! Clients connect to `GET /ws/crowd` and receive a JSON-encoded
//! [`CrowdUpdate`] immediately, then one per crowd tick. Each connection
//! owns its own [`CrowdSession`], started before the upgrade and dropped
//! on every exit path of the connection handler, which releases its timer.
//!
//! A page that reconnects passes the percentage it last showed as
//! `?from=<percent>`, and its new session carries on from there.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use serde::Deserialize;
use tracing::{debug, warn};
use vanclimb_core::session::CrowdSession;
use vanclimb_types::{CrowdReading, CrowdUpdate};

use crate::error::SiteError;
use crate::state::AppState;

/// Query parameters for the `GET /ws/crowd` endpoint.
#[derive(Debug, Deserialize)]
pub struct CrowdSocketQuery {
    /// Percentage the page already shows; the session resumes from it.
    pub from: Option<u8>,
}

/// A crowd session counted in [`AppState::live_sessions`] while it lives.
struct TrackedSession {
    session: CrowdSession,
    state: Arc<AppState>,
}

impl TrackedSession {
    fn new(session: CrowdSession, state: Arc<AppState>) -> Self {
        state.session_opened();
        Self { session, state }
    }
}

impl Drop for TrackedSession {
    fn drop(&mut self) {
        self.state.session_closed();
    }
}

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming crowd updates.
///
/// # Route
///
/// `GET /ws/crowd`
///
/// # Errors
///
/// Returns [`SiteError::Session`] if the crowd session cannot start.
pub async fn ws_crowd(
    ws: WebSocketUpgrade,
    Query(query): Query<CrowdSocketQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, SiteError> {
    let session = CrowdSession::from_config(&state.config.crowd, state.clock, query.from)?;
    let tracked = TrackedSession::new(session, Arc::clone(&state));
    Ok(ws.on_upgrade(move |socket| handle_ws(socket, tracked)))
}

/// Handle the `WebSocket` lifecycle: forward every reading the session
/// publishes as a text frame until either side goes away.
async fn handle_ws(mut socket: WebSocket, tracked: TrackedSession) {
    let session_id = tracked.session.id();
    debug!(%session_id, "WebSocket client connected");

    let mut rx = tracked.session.subscribe();
    let initial = *rx.borrow_and_update();
    if send_reading(&mut socket, initial).await.is_err() {
        debug!(%session_id, "WebSocket client disconnected (send failed)");
        return;
    }

    loop {
        tokio::select! {
            // A new reading from this connection's session.
            changed = rx.changed() => {
                if changed.is_err() {
                    debug!(%session_id, "Crowd session ended, closing WebSocket");
                    return;
                }
                let reading = *rx.borrow_and_update();
                if send_reading(&mut socket, reading).await.is_err() {
                    debug!(%session_id, "WebSocket client disconnected (send failed)");
                    return;
                }
            }
            // Check if the client sent a close frame or disconnected.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%session_id, "WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(%session_id, "WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(%session_id, "WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Clients have nothing to say on this socket.
                    }
                }
            }
        }
    }
}

/// Frame a reading with its classification and send it.
///
/// A serialization failure is logged and skipped; only a dead socket is
/// reported as an error.
async fn send_reading(socket: &mut WebSocket, reading: CrowdReading) -> Result<(), axum::Error> {
    let update = CrowdUpdate::from_reading(reading);
    let json = match serde_json::to_string(&update) {
        Ok(j) => j,
        Err(e) => {
            warn!("Failed to serialize crowd update: {e}");
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}
