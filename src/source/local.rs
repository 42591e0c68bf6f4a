//! Local generation of dashboard frames.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{DashboardFrame, DataSource, FrameOrigin};
use crate::clock::Clock;
use crate::data::{
    emergency_doctors, generate_series, generate_snapshot, list_insights, Doctor, Insight,
    MetricsSnapshot, TrendSeries,
};

/// Generators bound to a clock and a random source.
///
/// This is the fallback for every remote request and the whole feed when no
/// backend is configured.
#[derive(Debug)]
pub struct LocalFeed {
    clock: Arc<dyn Clock>,
    rng: StdRng,
    trend_hours: u32,
}

impl LocalFeed {
    /// Create a feed seeded from OS entropy.
    pub fn new(clock: Arc<dyn Clock>, trend_hours: u32) -> Self {
        Self {
            clock,
            rng: StdRng::from_entropy(),
            trend_hours,
        }
    }

    /// Create a feed with a fixed seed, for reproducible output.
    pub fn seeded(clock: Arc<dyn Clock>, trend_hours: u32, seed: u64) -> Self {
        Self {
            clock,
            rng: StdRng::seed_from_u64(seed),
            trend_hours,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Span of the series included in each frame.
    pub fn trend_hours(&self) -> u32 {
        self.trend_hours
    }

    pub fn snapshot(&mut self) -> MetricsSnapshot {
        generate_snapshot(self.clock.as_ref(), &mut self.rng)
    }

    pub fn series(&mut self, hours: u32) -> TrendSeries {
        generate_series(hours, self.clock.as_ref(), &mut self.rng)
    }

    pub fn insights(&self) -> Vec<Insight> {
        list_insights().to_vec()
    }

    pub fn doctors(&self) -> Vec<Doctor> {
        emergency_doctors().to_vec()
    }

    /// Generate a complete frame.
    pub fn frame(&mut self) -> DashboardFrame {
        DashboardFrame {
            metrics: self.snapshot(),
            trend: self.series(self.trend_hours),
            insights: self.insights(),
            doctors: self.doctors(),
            origin: FrameOrigin::Local,
            generated_at: self.clock.now(),
        }
    }

    /// Split borrow of the clock and random source, for one-off series.
    pub fn parts(&mut self) -> (&dyn Clock, &mut StdRng) {
        (self.clock.as_ref(), &mut self.rng)
    }
}

/// A data source that generates a fresh frame on every poll.
///
/// The main loop decides how often to poll, so every refresh tick fully
/// replaces the previous frame.
#[derive(Debug)]
pub struct LocalSource {
    feed: LocalFeed,
    description: String,
}

impl LocalSource {
    /// Create a local source for the given clock and series span.
    pub fn new(clock: Arc<dyn Clock>, trend_hours: u32) -> Self {
        Self::from_feed(LocalFeed::new(clock, trend_hours))
    }

    /// Wrap an existing feed (e.g. a seeded one).
    pub fn from_feed(feed: LocalFeed) -> Self {
        Self {
            feed,
            description: "local: simulated".to_string(),
        }
    }
}

impl DataSource for LocalSource {
    fn poll(&mut self) -> Option<DashboardFrame> {
        Some(self.feed.frame())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::at(7, 20).unwrap())
    }

    #[test]
    fn test_frame_contents() {
        let mut feed = LocalFeed::seeded(clock(), 24, 5);
        let frame = feed.frame();
        assert_eq!(frame.origin, FrameOrigin::Local);
        assert_eq!(frame.trend.len(), 25);
        assert_eq!(frame.trend.last().unwrap().time, "07:00");
        assert_eq!(frame.insights.len(), 4);
        assert_eq!(frame.doctors.len(), 3);
        assert_eq!(frame.generated_at, FixedClock::at(7, 20).unwrap().0);
    }

    #[test]
    fn test_seeded_feeds_agree() {
        let a = LocalFeed::seeded(clock(), 12, 77).frame();
        let b = LocalFeed::seeded(clock(), 12, 77).frame();
        assert_eq!(a, b);
    }

    #[test]
    fn test_source_always_has_data() {
        let mut source = LocalSource::from_feed(LocalFeed::seeded(clock(), 6, 1));
        let first = source.poll().unwrap();
        let second = source.poll().unwrap();
        assert_eq!(second.trend.len(), 7);
        // Same seed stream continues, so consecutive frames differ.
        assert_ne!(first.metrics, second.metrics);
        assert!(source.error().is_none());
        assert_eq!(source.description(), "local: simulated");
    }
}
