//! Landing page server for Van Climb.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Landing page** (`GET /`) rendered from `minijinja` templates:
//!   hero, live crowd meter, first-timer info, pricing, and visit details
//! - **`WebSocket` endpoint** (`/ws/crowd`) streaming [`CrowdUpdate`]
//!   frames from a crowd simulation owned by that connection
//! - **Navigation endpoints** (`/go/{fragment}`, `/api/sections`) for the
//!   stable section ids
//!
//! # Architecture
//!
//! There is no shared crowd state. Every page view opens its own socket,
//! and every socket owns a [`CrowdSession`] whose timer is released when
//! the socket closes, however it closes.
//!
//! [`CrowdUpdate`]: vanclimb_types::CrowdUpdate
//! [`CrowdSession`]: vanclimb_core::session::CrowdSession

pub mod error;
pub mod handlers;
pub mod render;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
