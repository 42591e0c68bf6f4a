//! Client for the health backend's HTTP API.
//!
//! Every endpoint answers with the same JSON envelope:
//!
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": "Failed to fetch health metrics" }
//! ```
//!
//! ## Endpoints
//!
//! - `GET /api/health/metrics`: current [`MetricsSnapshot`]
//! - `GET /api/health/trends?hours=N`: hourly [`TrendSeries`]
//! - `GET /api/health/alerts`: [`Insight`] list
//! - `GET /api/emergency/doctors?lat=&lng=`: nearby [`Doctor`]s
//! - `POST /api/health/metrics`: upload a snapshot
//!
//! ## Example
//!
//! ```rust,no_run
//! use vitalwatch::RemoteClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RemoteClient::builder()
//!         .endpoint("http://localhost:5000")
//!         .build()?;
//!
//!     let metrics = client.fetch_metrics().await?;
//!     println!("Heart rate: {} BPM", metrics.heart_rate);
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::data::{Doctor, Insight, MetricsSnapshot, TrendSeries};
use crate::error::FetchError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// HTTP client for the health backend.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    endpoint: String,
}

impl RemoteClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> RemoteClientBuilder {
        RemoteClientBuilder::default()
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_metrics(&self) -> Result<MetricsSnapshot, FetchError> {
        self.get("/api/health/metrics", &[]).await
    }

    pub async fn fetch_trends(&self, hours: u32) -> Result<TrendSeries, FetchError> {
        self.get("/api/health/trends", &[("hours", hours.to_string())])
            .await
    }

    pub async fn fetch_alerts(&self) -> Result<Vec<Insight>, FetchError> {
        self.get("/api/health/alerts", &[]).await
    }

    /// Fetch doctors near a location (`(latitude, longitude)`), if known.
    pub async fn fetch_doctors(
        &self,
        location: Option<(f64, f64)>,
    ) -> Result<Vec<Doctor>, FetchError> {
        let query = match location {
            Some((lat, lng)) => vec![("lat", lat.to_string()), ("lng", lng.to_string())],
            None => Vec::new(),
        };
        self.get("/api/emergency/doctors", &query).await
    }

    /// Upload a snapshot. The backend echoes it back, which is ignored.
    pub async fn push_metrics(&self, metrics: &MetricsSnapshot) -> Result<(), FetchError> {
        let url = self.url("/api/health/metrics");
        debug!(url = %url, "Uploading metrics");

        let response = self.client.post(&url).json(metrics).send().await?;
        decode::<serde_json::Value>(response).await.map(|_| ())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self.url(path);
        debug!(url = %url, "Fetching");

        let response = self.client.get(&url).query(query).send().await?;
        decode(response)
            .await?
            .ok_or_else(|| FetchError::Rejected(format!("No data in response from {}", path)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

/// Builder for RemoteClient.
#[derive(Debug, Default)]
pub struct RemoteClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl RemoteClientBuilder {
    /// Set the backend base URL (e.g., "http://localhost:5000").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 5 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RemoteClient, FetchError> {
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(RemoteClient { client, endpoint })
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// Unwrap the envelope, turning failures into [`FetchError`]s.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<Option<T>, FetchError> {
    let status = response.status();
    let body = response.bytes().await?;

    let envelope: ApiResponse<T> = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => return Err(FetchError::Http(status.as_u16())),
        Err(e) => return Err(FetchError::Parse(e.to_string())),
    };

    if status.is_success() && envelope.success {
        return Ok(envelope.data);
    }

    match envelope.error {
        Some(message) => Err(FetchError::Rejected(message)),
        None if !status.is_success() => Err(FetchError::Http(status.as_u16())),
        None => Err(FetchError::Rejected("success: false".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::stub::serve;

    const METRICS: &str = r#"{"success":true,"data":{"heartRate":72,"bloodOxygen":98,"steps":4200,"calories":900,"sleepHours":7.5,"stressLevel":35,"waterIntake":1200,"timestamp":"2024-03-14T09:00:00Z"}}"#;

    #[test]
    fn test_builder_defaults() {
        let client = RemoteClient::builder().build().unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000");
    }

    #[test]
    fn test_builder_custom() {
        let client = RemoteClient::builder()
            .endpoint("http://health.local:8080/")
            .timeout(Duration::from_millis(250))
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://health.local:8080");
        assert_eq!(client.url("/api/health/alerts"), "http://health.local:8080/api/health/alerts");
    }

    #[tokio::test]
    async fn test_fetch_metrics() {
        let (endpoint, mut requests) = serve(vec![(200, METRICS)]).await;
        let client = RemoteClient::builder().endpoint(endpoint).build().unwrap();

        let metrics = client.fetch_metrics().await.unwrap();
        assert_eq!(metrics.heart_rate, 72);
        assert_eq!(metrics.sleep_hours, 7.5);
        assert_eq!(
            requests.recv().await.unwrap(),
            "GET /api/health/metrics HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_fetch_trends_sends_hours() {
        let body = r#"{"success":true,"data":[{"time":"08:00","heartRate":80,"bloodOxygen":97,"steps":310,"stressLevel":40},{"time":"09:00","heartRate":84,"bloodOxygen":98,"steps":120,"stressLevel":45}]}"#;
        let (endpoint, mut requests) = serve(vec![(200, body)]).await;
        let client = RemoteClient::builder().endpoint(endpoint).build().unwrap();

        let series = client.fetch_trends(1).await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].time, "09:00");
        assert_eq!(
            requests.recv().await.unwrap(),
            "GET /api/health/trends?hours=1 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_fetch_doctors_sends_location() {
        let body = r#"{"success":true,"data":[{"id":"1","name":"Dr. Sarah Johnson","specialty":"Emergency Medicine","hospital":"City General Hospital","distance":1.2,"rating":4.8,"availability":"available","phone":"+1-555-0123","address":"123 Main St"}]}"#;
        let (endpoint, mut requests) = serve(vec![(200, body)]).await;
        let client = RemoteClient::builder().endpoint(endpoint).build().unwrap();

        let doctors = client.fetch_doctors(Some((51.5, -0.12))).await.unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].name, "Dr. Sarah Johnson");
        assert_eq!(
            requests.recv().await.unwrap(),
            "GET /api/emergency/doctors?lat=51.5&lng=-0.12 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_rejected_envelope() {
        let body = r#"{"success":false,"error":"Failed to fetch health metrics"}"#;
        let (endpoint, _requests) = serve(vec![(500, body), (200, r#"{"success":false}"#)]).await;
        let client = RemoteClient::builder().endpoint(endpoint).build().unwrap();

        match client.fetch_metrics().await {
            Err(FetchError::Rejected(message)) => {
                assert_eq!(message, "Failed to fetch health metrics")
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(matches!(
            client.fetch_alerts().await,
            Err(FetchError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_bad_status_and_body() {
        let (endpoint, _requests) =
            serve(vec![(502, "<html>bad gateway</html>"), (200, "not json")]).await;
        let client = RemoteClient::builder().endpoint(endpoint).build().unwrap();

        assert!(matches!(
            client.fetch_metrics().await,
            Err(FetchError::Http(502))
        ));
        assert!(matches!(
            client.fetch_metrics().await,
            Err(FetchError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_data() {
        let (endpoint, _requests) = serve(vec![(200, r#"{"success":true}"#)]).await;
        let client = RemoteClient::builder().endpoint(endpoint).build().unwrap();

        assert!(matches!(
            client.fetch_trends(24).await,
            Err(FetchError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_push_metrics() {
        let (endpoint, mut requests) = serve(vec![
            (200, METRICS),
            (400, r#"{"success":false,"error":"Invalid metrics data"}"#),
        ])
        .await;
        let client = RemoteClient::builder().endpoint(endpoint).build().unwrap();
        let metrics = MetricsSnapshot {
            heart_rate: 72,
            blood_oxygen: 98,
            steps: 4200,
            calories: 900,
            sleep_hours: 7.5,
            stress_level: 35,
            water_intake: 1200,
        };

        client.push_metrics(&metrics).await.unwrap();
        assert_eq!(
            requests.recv().await.unwrap(),
            "POST /api/health/metrics HTTP/1.1"
        );

        match client.push_metrics(&metrics).await {
            Err(FetchError::Rejected(message)) => assert_eq!(message, "Invalid metrics data"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let client = RemoteClient::builder()
            .endpoint("http://127.0.0.1:1")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        assert!(matches!(
            client.fetch_metrics().await,
            Err(FetchError::Connection(_)) | Err(FetchError::Timeout)
        ));
    }
}
