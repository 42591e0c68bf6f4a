//! Rolling history of refreshed snapshots, for sparklines and averages.

use std::collections::VecDeque;

use super::metrics::MetricsSnapshot;

/// Maximum number of refreshes to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Which reading a history query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vital {
    HeartRate,
    BloodOxygen,
    StressLevel,
    Steps,
}

impl Vital {
    fn read(self, snapshot: &MetricsSnapshot) -> u32 {
        match self {
            Vital::HeartRate => snapshot.heart_rate,
            Vital::BloodOxygen => snapshot.blood_oxygen,
            Vital::StressLevel => snapshot.stress_level,
            Vital::Steps => snapshot.steps,
        }
    }
}

/// Tracks the snapshots seen across refreshes.
///
/// Each refresh replaces the live snapshot; the history only keeps enough
/// of the past to draw a sparkline and compare against a running average.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: VecDeque<MetricsSnapshot>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly received snapshot.
    pub fn record(&mut self, snapshot: &MetricsSnapshot) {
        self.snapshots.push_back(snapshot.clone());
        if self.snapshots.len() > MAX_HISTORY_SIZE {
            self.snapshots.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Mean of a vital over the recorded refreshes.
    pub fn average(&self, vital: Vital) -> Option<f64> {
        if self.snapshots.is_empty() {
            return None;
        }
        let total: f64 = self.snapshots.iter().map(|s| f64::from(vital.read(s))).sum();
        Some(total / self.snapshots.len() as f64)
    }

    /// Latest value minus the running average, rounded.
    ///
    /// Returns None until at least two refreshes have been recorded.
    pub fn delta_vs_average(&self, vital: Vital) -> Option<i64> {
        if self.snapshots.len() < 2 {
            return None;
        }
        let latest = f64::from(vital.read(self.snapshots.back()?));
        Some((latest - self.average(vital)?).round() as i64)
    }

    /// Sparkline levels (0-7) for a vital, oldest first.
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn sparkline(&self, vital: Vital) -> Vec<u8> {
        if self.snapshots.len() < 2 {
            return Vec::new();
        }

        let values: Vec<u32> = self.snapshots.iter().map(|s| vital.read(s)).collect();
        let max = values.iter().copied().max().unwrap_or(0);
        let min = values.iter().copied().min().unwrap_or(0);
        let range = f64::from(max.saturating_sub(min).max(1));

        values
            .iter()
            .map(|&v| {
                let normalized = (f64::from(v - min) / range * 7.0) as u8;
                normalized.min(7)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(heart_rate: u32) -> MetricsSnapshot {
        MetricsSnapshot {
            heart_rate,
            blood_oxygen: 98,
            steps: 1000,
            calories: 400,
            sleep_hours: 7.5,
            stress_level: 30,
            water_intake: 1000,
        }
    }

    #[test]
    fn test_bounded_size() {
        let mut history = History::new();
        for i in 0..(MAX_HISTORY_SIZE as u32 + 10) {
            history.record(&snapshot(60 + i % 30));
        }
        assert_eq!(history.len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_average_and_delta() {
        let mut history = History::new();
        assert!(history.average(Vital::HeartRate).is_none());

        history.record(&snapshot(70));
        assert!(history.delta_vs_average(Vital::HeartRate).is_none());

        history.record(&snapshot(80));
        history.record(&snapshot(90));
        assert_eq!(history.average(Vital::HeartRate), Some(80.0));
        assert_eq!(history.delta_vs_average(Vital::HeartRate), Some(10));
        assert_eq!(history.delta_vs_average(Vital::BloodOxygen), Some(0));
    }

    #[test]
    fn test_sparkline_levels() {
        let mut history = History::new();
        history.record(&snapshot(60));
        assert!(history.sparkline(Vital::HeartRate).is_empty());

        history.record(&snapshot(90));
        history.record(&snapshot(75));
        assert_eq!(history.sparkline(Vital::HeartRate), vec![0, 7, 3]);

        // Flat series stays at the bottom.
        assert_eq!(history.sparkline(Vital::StressLevel), vec![0, 0, 0]);
    }
}
