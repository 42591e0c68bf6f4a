//! Periodic background refresh.
//!
//! A tokio task fetches a frame on every tick and publishes it to a
//! [`ChannelSource`]. The task lives exactly as long as its [`RefreshTask`]
//! guard: dropping the guard aborts it, so no frame is produced after the
//! dashboard has gone away.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::{ChannelSource, FallbackFeed};

/// Shortest accepted refresh interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Guard owning the background refresh task.
#[derive(Debug)]
pub struct RefreshTask {
    handle: JoinHandle<()>,
    wake: Arc<Notify>,
}

impl RefreshTask {
    /// Spawn the refresh loop on the current tokio runtime.
    ///
    /// The first frame is fetched immediately; later ones every `interval`
    /// (at least [`MIN_INTERVAL`]).
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(mut feed: FallbackFeed, interval: Duration) -> (ChannelSource, RefreshTask) {
        let (tx, source) = ChannelSource::create(&feed.describe());
        let wake = Arc::new(Notify::new());
        let notified = wake.clone();
        let interval = interval.max(MIN_INTERVAL);

        let handle = tokio::spawn(async move {
            info!(interval = ?interval, "Refresh task started");
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = notified.notified() => ticker.reset(),
                }

                let frame = feed.frame().await;
                if tx.send(Some(frame)).is_err() {
                    debug!("Dashboard gone, stopping refresh");
                    break;
                }
            }
        });

        (source, RefreshTask { handle, wake })
    }

    /// Fetch a frame now instead of waiting for the next tick.
    pub fn trigger(&self) {
        self.wake.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::FixedClock;
    use crate::source::{DataSource, FrameOrigin, LocalFeed};

    fn offline_feed() -> FallbackFeed {
        FallbackFeed::offline(LocalFeed::seeded(
            Arc::new(FixedClock::at(9, 30).unwrap()),
            3,
            11,
        ))
    }

    async fn next_frame(source: &mut ChannelSource) -> Option<crate::source::DashboardFrame> {
        for _ in 0..50 {
            if let Some(frame) = source.poll() {
                return Some(frame);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_first_frame_is_immediate() {
        let (mut source, _task) = RefreshTask::spawn(offline_feed(), Duration::from_secs(60));

        let frame = next_frame(&mut source).await.unwrap();
        assert_eq!(frame.origin, FrameOrigin::Local);
        assert_eq!(frame.trend.len(), 4);
        assert_eq!(source.description(), "api: offline");
    }

    #[tokio::test]
    async fn test_trigger_refreshes_early() {
        let (mut source, task) = RefreshTask::spawn(offline_feed(), Duration::from_secs(60));
        let first = next_frame(&mut source).await.unwrap();

        task.trigger();
        let second = next_frame(&mut source).await.unwrap();
        assert_ne!(first.metrics, second.metrics);
    }

    #[tokio::test]
    async fn test_zero_interval_is_raised_to_floor() {
        let (mut source, task) = RefreshTask::spawn(offline_feed(), Duration::ZERO);

        let started = tokio::time::Instant::now();
        assert!(next_frame(&mut source).await.is_some());
        assert!(next_frame(&mut source).await.is_some());
        assert!(started.elapsed() >= MIN_INTERVAL);
        assert!(!task.is_finished());
    }

    #[tokio::test]
    async fn test_drop_cancels_task() {
        let (mut source, task) = RefreshTask::spawn(offline_feed(), Duration::from_millis(100));
        assert!(next_frame(&mut source).await.is_some());

        drop(task);
        tokio::time::sleep(Duration::from_millis(50)).await;

        // The sender went away with the task.
        assert!(source.poll().is_none());
        assert_eq!(source.error(), Some("Refresh task stopped"));
    }

    #[tokio::test]
    async fn test_stops_when_source_dropped() {
        let (source, task) = RefreshTask::spawn(offline_feed(), Duration::from_millis(100));
        drop(source);

        for _ in 0..50 {
            if task.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(task.is_finished());
    }
}
