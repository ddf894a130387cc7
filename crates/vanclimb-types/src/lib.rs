//! Shared type definitions for the Van Climb landing page.
//!
//! This crate is the single source of truth for every value that crosses
//! the boundary between the crowd simulator, the page renderer, and the
//! browser. Types that the page script consumes are exported to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`enums`] -- Dayparts, crowd levels, and page sections
//! - [`structs`] -- Crowd readings and their display projections
//! - [`venue`] -- Static venue content (pricing, onboarding, hours)

pub mod enums;
pub mod structs;
pub mod venue;

// Re-export all public types at crate root for convenience.
pub use enums::{CrowdLevel, Daypart, Section};
pub use structs::{CrowdReading, CrowdStatus, CrowdUpdate, VENUE_CAPACITY, count_for};
pub use venue::{FirstTimerStep, HeroImage, PricingTier, Venue};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Writes the files into `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::enums::CrowdLevel::export_all();
        let _ = crate::enums::Daypart::export_all();
        let _ = crate::enums::Section::export_all();
        let _ = crate::structs::CrowdReading::export_all();
        let _ = crate::structs::CrowdStatus::export_all();
        let _ = crate::structs::CrowdUpdate::export_all();
    }
}
