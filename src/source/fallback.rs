//! Remote feed with silent local fallback.

use tracing::{debug, warn};

use super::{DashboardFrame, FrameOrigin, LocalFeed, RemoteClient};
use crate::data::{Doctor, Insight, MetricsSnapshot, TrendSeries};
use crate::error::FetchError;

/// Assembles frames from the backend, substituting locally generated data
/// for any request that fails.
///
/// Failures are logged at `warn` level and never returned: every method
/// always yields usable data.
#[derive(Debug)]
pub struct FallbackFeed {
    client: Option<RemoteClient>,
    local: LocalFeed,
    location: Option<(f64, f64)>,
}

impl FallbackFeed {
    /// Fetch from `client`, falling back to `local`.
    pub fn new(client: RemoteClient, local: LocalFeed) -> Self {
        Self {
            client: Some(client),
            local,
            location: None,
        }
    }

    /// A feed with no backend: everything is generated locally.
    pub fn offline(local: LocalFeed) -> Self {
        Self {
            client: None,
            local,
            location: None,
        }
    }

    /// Location passed to the doctor search, as `(latitude, longitude)`.
    pub fn with_location(mut self, location: Option<(f64, f64)>) -> Self {
        self.location = location;
        self
    }

    /// Human-readable description of where data is fetched from.
    pub fn describe(&self) -> String {
        match &self.client {
            Some(client) => client.endpoint().to_string(),
            None => "offline".to_string(),
        }
    }

    pub async fn metrics(&mut self) -> (MetricsSnapshot, bool) {
        let result = match &self.client {
            Some(client) => Some(client.fetch_metrics().await),
            None => None,
        };
        settle(result, "metrics", || self.local.snapshot())
    }

    pub async fn trends(&mut self, hours: u32) -> (TrendSeries, bool) {
        let result = match &self.client {
            Some(client) => Some(client.fetch_trends(hours).await),
            None => None,
        };
        settle(result, "trends", || self.local.series(hours))
    }

    pub async fn insights(&mut self) -> (Vec<Insight>, bool) {
        let result = match &self.client {
            Some(client) => Some(client.fetch_alerts().await),
            None => None,
        };
        settle(result, "alerts", || self.local.insights())
    }

    pub async fn doctors(&mut self) -> (Vec<Doctor>, bool) {
        let result = match &self.client {
            Some(client) => Some(client.fetch_doctors(self.location).await),
            None => None,
        };
        settle(result, "doctors", || self.local.doctors())
    }

    /// Fetch every part of a frame.
    ///
    /// The four requests run concurrently, so a hung backend costs one
    /// timeout per frame rather than four.
    pub async fn frame(&mut self) -> DashboardFrame {
        let hours = self.local.trend_hours();
        let (metrics, trend, insights, doctors) = match &self.client {
            Some(client) => {
                let (metrics, trend, insights, doctors) = tokio::join!(
                    client.fetch_metrics(),
                    client.fetch_trends(hours),
                    client.fetch_alerts(),
                    client.fetch_doctors(self.location),
                );
                (Some(metrics), Some(trend), Some(insights), Some(doctors))
            }
            None => (None, None, None, None),
        };

        let local = &mut self.local;
        let (metrics, metrics_remote) = settle(metrics, "metrics", || local.snapshot());
        let (trend, trend_remote) = settle(trend, "trends", || local.series(hours));
        let (insights, insights_remote) = settle(insights, "alerts", || local.insights());
        let (doctors, doctors_remote) = settle(doctors, "doctors", || local.doctors());

        let origin =
            FrameOrigin::from_outcomes(&[metrics_remote, trend_remote, insights_remote, doctors_remote]);
        debug!(origin = origin.label(), "Assembled frame");

        DashboardFrame {
            metrics,
            trend,
            insights,
            doctors,
            origin,
            generated_at: self.local.clock().now(),
        }
    }
}

/// Resolve a fetch outcome, generating locally when there is no result.
///
/// Returns the value and whether it came from the backend.
fn settle<T>(
    result: Option<Result<T, FetchError>>,
    what: &str,
    fallback: impl FnOnce() -> T,
) -> (T, bool) {
    match result {
        Some(Ok(value)) => (value, true),
        Some(Err(e)) => {
            warn!(error = %e, "Failed to fetch {}, using local data", what);
            (fallback(), false)
        }
        None => (fallback(), false),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::clock::FixedClock;
    use crate::source::stub::{serve_routes, serve_silent};

    fn local() -> LocalFeed {
        LocalFeed::seeded(Arc::new(FixedClock::at(14, 0).unwrap()), 6, 42)
    }

    #[tokio::test]
    async fn test_offline_frame_is_local() {
        let mut feed = FallbackFeed::offline(local());
        let frame = feed.frame().await;

        assert_eq!(frame.origin, FrameOrigin::Local);
        assert_eq!(frame.trend.len(), 7);
        assert_eq!(frame.doctors.len(), 3);
        assert_eq!(feed.describe(), "offline");
    }

    #[tokio::test]
    async fn test_unreachable_backend_falls_back() {
        let client = RemoteClient::builder()
            .endpoint("http://127.0.0.1:1")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let mut feed = FallbackFeed::new(client, local());

        let (metrics, remote) = feed.metrics().await;
        assert!(!remote);
        assert!((55..=90).contains(&metrics.heart_rate));

        let frame = feed.frame().await;
        assert_eq!(frame.origin, FrameOrigin::Local);
        assert_eq!(frame.insights.len(), 4);
    }

    #[tokio::test]
    async fn test_partial_frame() {
        let metrics = r#"{"success":true,"data":{"heartRate":101,"bloodOxygen":99,"steps":10,"calories":300,"sleepHours":8.0,"stressLevel":10,"waterIntake":500}}"#;
        let failure = r#"{"success":false,"error":"Failed to fetch health trends"}"#;
        let alerts = r#"{"success":true,"data":[]}"#;
        let endpoint = serve_routes(vec![
            ("/api/health/metrics", (200, metrics)),
            ("/api/health/trends", (500, failure)),
            ("/api/health/alerts", (200, alerts)),
            ("/api/emergency/doctors", (500, failure)),
        ])
        .await;
        let client = RemoteClient::builder().endpoint(endpoint).build().unwrap();
        let mut feed = FallbackFeed::new(client, local()).with_location(Some((40.7, -74.0)));

        let frame = feed.frame().await;
        assert_eq!(frame.origin, FrameOrigin::Partial);
        assert_eq!(frame.metrics.heart_rate, 101);
        // Trends and doctors were generated locally.
        assert_eq!(frame.trend.len(), 7);
        assert_eq!(frame.doctors.len(), 3);
        assert!(frame.insights.is_empty());
    }

    #[tokio::test]
    async fn test_hung_backend_costs_one_timeout() {
        let timeout = Duration::from_millis(400);
        let client = RemoteClient::builder()
            .endpoint(serve_silent().await)
            .timeout(timeout)
            .build()
            .unwrap();
        let mut feed = FallbackFeed::new(client, local());

        let started = Instant::now();
        let frame = feed.frame().await;
        let elapsed = started.elapsed();

        assert_eq!(frame.origin, FrameOrigin::Local);
        assert!(elapsed >= timeout, "elapsed {:?}", elapsed);
        // Four sequential timeouts would take 1.6s.
        assert!(elapsed < timeout * 3, "elapsed {:?}", elapsed);
    }
}
