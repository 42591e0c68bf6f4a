//! The unit of data handed from a source to the dashboard.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::{Doctor, Insight, MetricsSnapshot, TrendSeries};

/// Where the contents of a frame came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameOrigin {
    /// Every part was generated locally.
    Local,
    /// Every part came from the backend.
    Remote,
    /// The backend answered some requests; the rest fell back to local data.
    Partial,
}

impl FrameOrigin {
    /// Combine per-request outcomes (`true` = served by the backend).
    pub fn from_outcomes(outcomes: &[bool]) -> Self {
        if outcomes.iter().all(|remote| *remote) {
            FrameOrigin::Remote
        } else if outcomes.iter().any(|remote| *remote) {
            FrameOrigin::Partial
        } else {
            FrameOrigin::Local
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrameOrigin::Local => "local",
            FrameOrigin::Remote => "live",
            FrameOrigin::Partial => "partial",
        }
    }
}

/// One refresh worth of dashboard data.
///
/// Each refresh replaces the previous frame wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFrame {
    pub metrics: MetricsSnapshot,
    /// Hourly series, oldest first.
    pub trend: TrendSeries,
    pub insights: Vec<Insight>,
    /// Emergency-care directory, nearest first.
    pub doctors: Vec<Doctor>,
    pub origin: FrameOrigin,
    /// Local wall time at which the frame was assembled.
    pub generated_at: NaiveDateTime,
}
