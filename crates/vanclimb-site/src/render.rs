//! Landing page rendering via `minijinja`.
//!
//! The page templates are compiled into the binary so a bare executable
//! can serve the site. Operators who want to tweak copy or markup can
//! point `server.templates_dir` at a directory holding files with the same
//! names; those are loaded instead.

use chrono::{DateTime, Datelike, FixedOffset};
use minijinja::Environment;
use serde::Serialize;
use vanclimb_core::config::SiteConfig;
use vanclimb_types::{CrowdReading, CrowdUpdate, Section, Venue};

/// Path the page script connects to for live crowd frames.
pub const CROWD_SOCKET_PATH: &str = "/ws/crowd";

/// Every template the page is assembled from, with its built-in source.
const TEMPLATES: [(&str, &str); 9] = [
    ("page.html", include_str!("../templates/page.html")),
    ("hero.html", include_str!("../templates/hero.html")),
    ("crowd.html", include_str!("../templates/crowd.html")),
    ("first_timers.html", include_str!("../templates/first_timers.html")),
    ("pricing.html", include_str!("../templates/pricing.html")),
    ("visit.html", include_str!("../templates/visit.html")),
    ("footer.html", include_str!("../templates/footer.html")),
    ("styles.css", include_str!("../templates/styles.css")),
    ("live.js", include_str!("../templates/live.js")),
];

/// Errors that can occur when loading or rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A template file could not be read.
    #[error("failed to read template {path}: {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// `minijinja` rejected or failed to render a template.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// A navigation entry: stable section id plus its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionLink {
    /// Element id, also the page fragment.
    pub id: &'static str,
    /// Text shown in the navigation bar.
    pub label: &'static str,
}

impl From<Section> for SectionLink {
    fn from(section: Section) -> Self {
        Self {
            id: section.id(),
            label: section.nav_label(),
        }
    }
}

/// All sections in page order, as navigation links.
pub fn section_links() -> Vec<SectionLink> {
    Section::ALL.into_iter().map(SectionLink::from).collect()
}

/// Everything the page template needs for one view.
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    /// Venue copy.
    pub venue: &'a Venue,
    /// Link to the mapping service.
    pub directions_url: String,
    /// Navigation entries.
    pub sections: Vec<SectionLink>,
    /// The crowd reading shown before the socket delivers live values.
    pub crowd: CrowdUpdate,
    /// `crowd.reading.updated_at` as venue-local wall time.
    pub updated_time: String,
    /// Year for the copyright line.
    pub year: i32,
    /// Delay before honouring the fragment in the page address.
    pub settle_delay_ms: u64,
    /// Path of the live crowd socket.
    pub crowd_socket_path: &'static str,
}

impl<'a> PageView<'a> {
    /// Assemble the view for a reading taken at `now`.
    pub fn new(config: &'a SiteConfig, reading: CrowdReading, now: DateTime<FixedOffset>) -> Self {
        let updated_time = reading
            .updated_at
            .with_timezone(now.offset())
            .format("%-I:%M:%S %p")
            .to_string();
        Self {
            venue: &config.venue,
            directions_url: config.venue.directions_url(),
            sections: section_links(),
            crowd: CrowdUpdate::from_reading(reading),
            updated_time,
            year: now.year(),
            settle_delay_ms: config.navigation.settle_delay_ms,
            crowd_socket_path: CROWD_SOCKET_PATH,
        }
    }
}

/// Holds the compiled page templates.
#[derive(Debug)]
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// A renderer using the templates built into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if a built-in template fails to
    /// compile.
    pub fn embedded() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// A renderer loading every template from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Read`] if a file is missing or unreadable, or
    /// [`RenderError::Template`] if it fails to compile.
    pub fn from_dir(dir: &str) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        for (name, _) in TEMPLATES {
            let source = load_template(dir, name)?;
            env.add_template_owned(name, source)?;
        }
        Ok(Self { env })
    }

    /// Embedded templates, or the ones in `dir` when given.
    ///
    /// # Errors
    ///
    /// See [`PageRenderer::embedded`] and [`PageRenderer::from_dir`].
    pub fn from_optional_dir(dir: Option<&str>) -> Result<Self, RenderError> {
        dir.map_or_else(Self::embedded, Self::from_dir)
    }

    /// Render the complete landing page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if rendering fails.
    pub fn render_page(&self, view: &PageView<'_>) -> Result<String, RenderError> {
        let html = self.env.get_template("page.html")?.render(view)?;
        Ok(html)
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, name: &str) -> Result<String, RenderError> {
    let path = format!("{dir}/{name}");
    std::fs::read_to_string(&path).map_err(|source| RenderError::Read { path, source })
}
