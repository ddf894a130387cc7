//! Configuration loading and typed config structures for the landing page.
//!
//! The configuration lives in `vanclimb-config.yaml`. Every field has a
//! default, so a missing file or an empty document yields a working site
//! with the published Van Climb content and a 2.5 second crowd tick.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use vanclimb_types::Venue;

/// A UTC offset must stay strictly inside one day.
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level site configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Crowd simulation settings.
    #[serde(default)]
    pub crowd: CrowdConfig,

    /// Page navigation behaviour.
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Venue content rendered on the page.
    #[serde(default)]
    pub venue: Venue,
}

impl SiteConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `PORT` environment variable overrides `server.port`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml maps an empty document to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PORT` is set but is not a
    /// valid port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::Invalid {
                reason: format!("PORT must be a port number, got {port:?}: {e}"),
            })?;
        }
        Ok(())
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crowd.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "crowd.tick_interval_ms must be at least 1".to_owned(),
            });
        }
        if let Some(minutes) = self.crowd.utc_offset_minutes {
            if minutes.unsigned_abs() >= MINUTES_PER_DAY {
                return Err(ConfigError::Invalid {
                    reason: format!("crowd.utc_offset_minutes out of range: {minutes}"),
                });
            }
        }
        if self.venue.pricing.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "venue.pricing must list at least one tier".to_owned(),
            });
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of page templates overriding the built-in ones.
    #[serde(default)]
    pub templates_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            templates_dir: None,
        }
    }
}

/// Crowd simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrowdConfig {
    /// Real-time milliseconds between crowd ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seed for the noise generator. Unset means fresh entropy per view.
    #[serde(default)]
    pub noise_seed: Option<u64>,

    /// Venue offset from UTC in minutes. Unset means the host's local zone.
    ///
    /// A fixed offset does not follow daylight saving time; venues in a
    /// zone that observes it should run the host in that zone instead.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl CrowdConfig {
    /// The tick period as a [`Duration`].
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            noise_seed: None,
            utc_offset_minutes: None,
        }
    }
}

/// Page navigation behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavigationConfig {
    /// Delay before scrolling to the fragment in the page address, so the
    /// initial layout can settle.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (used by serde)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

const fn default_tick_interval_ms() -> u64 {
    2500
}

const fn default_settle_delay_ms() -> u64 {
    50
}

fn default_log_level() -> String {
    "info".to_owned()
}
