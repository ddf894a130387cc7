//! Crowd simulation and runtime plumbing for the Van Climb landing page.
//!
//! The only real logic behind the page is a synthetic "how busy is the
//! gym" reading that drifts toward a time-of-day target. This crate owns
//! that computation and the periodic task that drives it.
//!
//! # Modules
//!
//! - [`clock`] -- Wall clock abstraction with venue-local time.
//! - [`config`] -- Configuration loading from `vanclimb-config.yaml` into
//!   strongly-typed structs.
//! - [`crowd`] -- The daypart-driven smoothing step and noise sources.
//! - [`session`] -- [`CrowdSession`], a periodic timer scoped to one view.
//!
//! [`CrowdSession`]: session::CrowdSession

pub mod clock;
pub mod config;
pub mod crowd;
pub mod session;
