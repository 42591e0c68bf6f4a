//! # vitalwatch
//!
//! A terminal dashboard and library for watching simulated vital signs.
//!
//! This crate generates plausible heart-rate, blood-oxygen, activity, stress
//! and sleep readings, classifies them against configurable thresholds and
//! displays them in an interactive terminal UI. When a health backend is
//! configured, readings are fetched from it instead, falling back to local
//! generation whenever a request fails.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(classify)│    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── LocalSource | ChannelSource ◀── RefreshTask │
//! │  │ (input) │                                  (FallbackFeed)│
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation and alert handling
//! - **[`source`]**: The [`DataSource`] trait, local generation, the backend
//!   client and the background refresh task
//! - **[`data`]**: Metric models, generators, classification and history
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (defaults, TOML file, `VITALWATCH_*` env)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Fully offline, simulated readings
//! vitalwatch
//!
//! # Against a health backend, refreshing every 5 seconds
//! vitalwatch --api http://localhost:5000 --refresh 5s
//!
//! # Write one frame to JSON and exit
//! vitalwatch --export vitals.json
//! ```
//!
//! ### As a library with local generation
//!
//! ```
//! use std::sync::Arc;
//! use vitalwatch::{App, LocalFeed, LocalSource, Settings, SystemClock};
//!
//! let source = Box::new(LocalSource::new(Arc::new(SystemClock), 24));
//! let chart_feed = LocalFeed::new(Arc::new(SystemClock), 24);
//! let mut app = App::new(source, chart_feed, &Settings::default());
//! assert!(app.reload_data());
//! assert!(app.data.is_some());
//! ```
//!
//! ### With a backend and a refresh task
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use vitalwatch::{App, FallbackFeed, LocalFeed, RefreshTask, RemoteClient, Settings, SystemClock};
//!
//! # tokio_test::block_on(async {
//! let client = RemoteClient::builder().endpoint("http://localhost:5000").build().unwrap();
//! let feed = FallbackFeed::new(client, LocalFeed::new(Arc::new(SystemClock), 24));
//! let (source, task) = RefreshTask::spawn(feed, Duration::from_secs(10));
//!
//! let chart_feed = LocalFeed::new(Arc::new(SystemClock), 24);
//! let app = App::new(Box::new(source), chart_feed, &Settings::default())
//!     .with_refresh_task(task);
//! # });
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Settings;
pub use data::{
    Doctor, HealthStatus, Insight, MetricsSnapshot, Thresholds, Timeframe, TrendPoint,
    TrendSeries, VitalAlert,
};
pub use error::FetchError;
pub use source::{
    ChannelSource, DashboardFrame, DataSource, FallbackFeed, FrameOrigin, LocalFeed, LocalSource,
    RefreshTask, RemoteClient,
};
