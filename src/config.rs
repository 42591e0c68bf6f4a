//! Layered settings: built-in defaults, an optional TOML file, then
//! `VITALWATCH_*` environment variables.
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `VITALWATCH_API__BASE_URL=http://localhost:5000` or
//! `VITALWATCH_THRESHOLDS__HEART_RATE_CRITICAL=110`.
//!
//! ```toml
//! refresh = "10s"
//! trend_hours = 24
//!
//! [api]
//! base_url = "http://localhost:5000"
//! timeout = "5s"
//!
//! [thresholds]
//! heart_rate_critical = 100
//!
//! [goals]
//! steps = 12000
//!
//! [location]
//! latitude = 40.71
//! longitude = -74.0
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::data::duration::{parse_interval, IntervalParseError};
use crate::data::Thresholds;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "VITALWATCH";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid `{key}`: {source}")]
    Interval {
        key: &'static str,
        #[source]
        source: IntervalParseError,
    },
}

/// Daily targets shown as progress on the activity view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub steps: u32,
    pub calories: u32,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            steps: 10_000,
            calories: 2_000,
        }
    }
}

/// Where the user is, for the doctor search.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RawApi {
    base_url: Option<String>,
    timeout: String,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    api: RawApi,
    refresh: String,
    trend_hours: u32,
    #[serde(default)]
    thresholds: Thresholds,
    #[serde(default)]
    goals: Goals,
    location: Option<Location>,
    log_file: Option<PathBuf>,
}

/// Resolved dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Backend base URL; `None` runs fully offline.
    pub api_url: Option<String>,
    pub api_timeout: Duration,
    pub refresh: Duration,
    pub trend_hours: u32,
    pub thresholds: Thresholds,
    pub goals: Goals,
    pub location: Option<Location>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            api_timeout: Duration::from_secs(5),
            refresh: Duration::from_secs(10),
            trend_hours: crate::data::DEFAULT_TREND_HOURS,
            thresholds: Thresholds::default(),
            goals: Goals::default(),
            location: None,
            log_file: None,
        }
    }
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// An empty URL forces offline mode.
    pub api_url: Option<String>,
    pub refresh: Option<Duration>,
    pub trend_hours: Option<u32>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from defaults, `path` (if any) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with(path, environment())
    }

    /// Load settings with an explicit environment source.
    pub fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("api.timeout", "5s")?
            .set_default("refresh", "10s")?
            .set_default("trend_hours", i64::from(crate::data::DEFAULT_TREND_HOURS))?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let raw: RawSettings = builder.add_source(env).build()?.try_deserialize()?;
        raw.resolve()
    }

    /// Apply command-line overrides on top of the loaded layers.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.api_url {
            self.api_url = non_empty_url(Some(url));
        }
        if let Some(refresh) = overrides.refresh {
            self.refresh = refresh;
        }
        if let Some(hours) = overrides.trend_hours {
            self.trend_hours = hours;
        }
        if let Some(path) = overrides.log_file {
            self.log_file = Some(path);
        }
    }

    /// Latitude/longitude pair for the doctor search.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.location.map(|l| (l.latitude, l.longitude))
    }
}

impl RawSettings {
    fn resolve(self) -> Result<Settings, SettingsError> {
        let interval = |key: &'static str, value: &str| {
            parse_interval(value).map_err(|source| SettingsError::Interval { key, source })
        };

        Ok(Settings {
            api_url: non_empty_url(self.api.base_url),
            api_timeout: interval("api.timeout", &self.api.timeout)?,
            refresh: interval("refresh", &self.refresh)?,
            trend_hours: self.trend_hours,
            thresholds: self.thresholds,
            goals: self.goals,
            location: self.location,
            log_file: self.log_file,
        })
    }
}

/// A blank base URL means no backend.
fn non_empty_url(url: Option<String>) -> Option<String> {
    url.filter(|url| !url.trim().is_empty())
}

/// The `VITALWATCH_*` environment source.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
