//! Data source abstraction for receiving dashboard frames.
//!
//! This module provides a trait-based abstraction for receiving vital-sign
//! data from local generators, a remote health backend (with silent local
//! fallback), or in-memory channels.

mod channel;
mod fallback;
mod frame;
mod local;
mod refresh;
mod remote;
#[cfg(test)]
mod stub;

pub use channel::ChannelSource;
pub use fallback::FallbackFeed;
pub use frame::{DashboardFrame, FrameOrigin};
pub use local::{LocalFeed, LocalSource};
pub use refresh::RefreshTask;
pub use remote::{RemoteClient, RemoteClientBuilder};

use std::fmt::Debug;

/// Trait for receiving dashboard frames from various sources.
///
/// Implementations of this trait provide frames from different backends:
/// local generation, or a background refresh task publishing to a channel.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vitalwatch::{DataSource, LocalSource, SystemClock};
///
/// let mut source = LocalSource::new(Arc::new(SystemClock), 24);
/// if let Some(frame) = source.poll() {
///     println!("Heart rate: {} BPM", frame.metrics.heart_rate);
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest frame.
    ///
    /// Returns `Some(frame)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<DashboardFrame>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if the source can no longer produce frames.
    fn error(&self) -> Option<&str>;
}
