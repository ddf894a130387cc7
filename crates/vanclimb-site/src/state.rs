//! Shared application state for the landing page server.
//!
//! [`AppState`] is built once at startup. It carries no crowd reading:
//! every socket owns its own
//! [`CrowdSession`](vanclimb_core::session::CrowdSession). The only
//! mutable field is a gauge of how many of those sessions are alive.

use std::sync::atomic::{AtomicUsize, Ordering};

use vanclimb_core::clock::SystemClock;
use vanclimb_core::config::SiteConfig;

use crate::error::SiteError;
use crate::render::PageRenderer;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug)]
pub struct AppState {
    /// The loaded site configuration.
    pub config: SiteConfig,
    /// Compiled page templates.
    pub renderer: PageRenderer,
    /// Venue wall clock used to pick the daypart.
    pub clock: SystemClock,
    /// Crowd sessions currently held by open sockets.
    live_sessions: AtomicUsize,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Clock`] if `crowd.utc_offset_minutes` is out of
    /// range, or [`SiteError::Render`] if the templates cannot be loaded.
    pub fn new(config: SiteConfig) -> Result<Self, SiteError> {
        let clock = SystemClock::from_offset_minutes(config.crowd.utc_offset_minutes)?;
        let renderer = PageRenderer::from_optional_dir(config.server.templates_dir.as_deref())?;
        Ok(Self {
            config,
            renderer,
            clock,
            live_sessions: AtomicUsize::new(0),
        })
    }

    /// Number of crowd sessions currently running.
    pub fn live_sessions(&self) -> usize {
        self.live_sessions.load(Ordering::Relaxed)
    }

    pub(crate) fn session_opened(&self) {
        self.live_sessions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn session_closed(&self) {
        self.live_sessions.fetch_sub(1, Ordering::Relaxed);
    }
}
