//! Vital-sign data models, generators and classification.
//!
//! Everything in this module is synchronous and infallible: the generators
//! only read an injected [`Clock`](crate::clock::Clock) and random source.
//!
//! ## Submodules
//!
//! - [`metrics`]: [`MetricsSnapshot`] and the snapshot generator
//! - [`trend`]: [`TrendPoint`] series with time-of-day shaping, chart [`Timeframe`]s
//! - [`classify`]: Threshold helpers (zones, levels, overall [`HealthStatus`], alerts)
//! - [`insights`]: The static [`Insight`] catalog
//! - [`doctors`]: The emergency-care [`Doctor`] directory and search
//! - [`sleep`]: The weekly sleep log
//! - [`history`]: Rolling history of refreshes for sparklines and averages
//! - [`duration`]: Parsing of refresh interval strings (e.g., "10s", "500ms")
//!
//! ## Data Flow
//!
//! ```text
//! Clock + Rng
//!      │
//!      ├──▶ generate_snapshot() ──▶ MetricsSnapshot ──▶ classify::* (labels, alerts)
//!      │                                  │
//!      │                                  └──▶ History::record() (sparklines)
//!      │
//!      └──▶ generate_series(N) ──▶ TrendSeries (N + 1 points, oldest first)
//! ```

pub mod classify;
pub mod doctors;
pub mod duration;
pub mod history;
pub mod insights;
pub mod metrics;
pub mod sleep;
pub mod trend;

pub use classify::{
    overall_status, HealthStatus, HeartRateZone, OxygenLevel, StressBand, Thresholds,
    TrendDirection, VitalAlert,
};
pub use doctors::{emergency_doctors, filter_doctors, search_doctors, Availability, Doctor};
pub use history::{History, Vital};
pub use insights::{list_insights, Insight, InsightCategory, Priority};
pub use metrics::{generate_snapshot, MetricsSnapshot};
pub use sleep::{sleep_log, weekly_average, SleepNight};
pub use trend::{generate_series, Timeframe, TrendPoint, TrendSeries, DEFAULT_TREND_HOURS};
