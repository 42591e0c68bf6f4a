//! Threshold classification of vital-sign readings.
//!
//! Every helper here maps a reading to a discrete category used to pick
//! colors, labels and alerts. None of them carry state or fail.

use serde::{Deserialize, Serialize};

use super::metrics::MetricsSnapshot;

/// Thresholds for overall status and per-card alerts.
///
/// A reading strictly above a `*_critical`/`*_warning` limit (or strictly
/// below, for blood oxygen) escalates the status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Heart rate (BPM) above which the status is critical.
    pub heart_rate_critical: u32,
    /// Heart rate (BPM) above which the status is warning.
    pub heart_rate_warning: u32,
    /// SpO2 (%) below which the status is critical.
    pub blood_oxygen_critical: u32,
    /// SpO2 (%) below which the status is warning.
    pub blood_oxygen_warning: u32,
    /// Stress above which the status is critical.
    pub stress_critical: u32,
    /// Stress above which the status is warning.
    pub stress_warning: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            heart_rate_critical: 100,
            heart_rate_warning: 85,
            blood_oxygen_critical: 95,
            blood_oxygen_warning: 97,
            stress_critical: 70,
            stress_warning: 50,
        }
    }
}

/// Severity of a reading or of the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Normal,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "OK",
            HealthStatus::Warning => "WARN",
            HealthStatus::Critical => "CRIT",
        }
    }

    /// Headline shown in the dashboard header.
    pub fn headline(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "All Systems Normal",
            HealthStatus::Warning => "Attention Needed",
            HealthStatus::Critical => "Critical Alert",
        }
    }
}

/// Overall status from heart rate, blood oxygen and stress.
///
/// Any single critical condition wins; warning conditions are only
/// considered once no critical condition holds.
pub fn overall_status(
    heart_rate: u32,
    blood_oxygen: u32,
    stress_level: u32,
    thresholds: &Thresholds,
) -> HealthStatus {
    if heart_rate > thresholds.heart_rate_critical
        || blood_oxygen < thresholds.blood_oxygen_critical
        || stress_level > thresholds.stress_critical
    {
        HealthStatus::Critical
    } else if heart_rate > thresholds.heart_rate_warning
        || blood_oxygen < thresholds.blood_oxygen_warning
        || stress_level > thresholds.stress_warning
    {
        HealthStatus::Warning
    } else {
        HealthStatus::Normal
    }
}

/// Alert level of the heart-rate card.
pub fn heart_rate_alert(bpm: u32, thresholds: &Thresholds) -> HealthStatus {
    if bpm > thresholds.heart_rate_critical {
        HealthStatus::Critical
    } else if bpm > thresholds.heart_rate_warning {
        HealthStatus::Warning
    } else {
        HealthStatus::Normal
    }
}

/// Alert level of the blood-oxygen card.
pub fn blood_oxygen_alert(percent: u32, thresholds: &Thresholds) -> HealthStatus {
    if percent < thresholds.blood_oxygen_critical {
        HealthStatus::Critical
    } else if percent < thresholds.blood_oxygen_warning {
        HealthStatus::Warning
    } else {
        HealthStatus::Normal
    }
}

/// Alert level of the stress card. Stress never goes critical on its own card.
pub fn stress_alert(level: u32, thresholds: &Thresholds) -> HealthStatus {
    if level > thresholds.stress_critical {
        HealthStatus::Warning
    } else {
        HealthStatus::Normal
    }
}

/// Heart-rate training zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeartRateZone {
    Resting,
    Normal,
    Elevated,
    High,
    Maximum,
}

impl HeartRateZone {
    /// All zones, lowest first, with their display range.
    pub const ALL: [(HeartRateZone, &'static str); 5] = [
        (HeartRateZone::Resting, "< 60"),
        (HeartRateZone::Normal, "60-99"),
        (HeartRateZone::Elevated, "100-119"),
        (HeartRateZone::High, "120-149"),
        (HeartRateZone::Maximum, "150+"),
    ];

    pub fn classify(bpm: u32) -> Self {
        match bpm {
            0..=59 => HeartRateZone::Resting,
            60..=99 => HeartRateZone::Normal,
            100..=119 => HeartRateZone::Elevated,
            120..=149 => HeartRateZone::High,
            _ => HeartRateZone::Maximum,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeartRateZone::Resting => "resting",
            HeartRateZone::Normal => "normal",
            HeartRateZone::Elevated => "elevated",
            HeartRateZone::High => "high",
            HeartRateZone::Maximum => "maximum",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HeartRateZone::Resting => "Very relaxed state",
            HeartRateZone::Normal => "Healthy range",
            HeartRateZone::Elevated => "Light activity",
            HeartRateZone::High => "Moderate exercise",
            HeartRateZone::Maximum => "Intense exercise",
        }
    }

    /// Display severity of the zone.
    pub fn severity(&self) -> HealthStatus {
        match self {
            HeartRateZone::Resting | HeartRateZone::Normal => HealthStatus::Normal,
            HeartRateZone::Elevated => HealthStatus::Warning,
            HeartRateZone::High | HeartRateZone::Maximum => HealthStatus::Critical,
        }
    }
}

/// Blood-oxygen saturation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OxygenLevel {
    Critical,
    Low,
    Good,
    Excellent,
}

impl OxygenLevel {
    /// All levels, best first, with their display range.
    pub const ALL: [(OxygenLevel, &'static str); 4] = [
        (OxygenLevel::Excellent, "98-100%"),
        (OxygenLevel::Good, "95-97%"),
        (OxygenLevel::Low, "90-94%"),
        (OxygenLevel::Critical, "< 90%"),
    ];

    pub fn classify(percent: u32) -> Self {
        if percent >= 98 {
            OxygenLevel::Excellent
        } else if percent >= 95 {
            OxygenLevel::Good
        } else if percent >= 90 {
            OxygenLevel::Low
        } else {
            OxygenLevel::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OxygenLevel::Excellent => "excellent",
            OxygenLevel::Good => "good",
            OxygenLevel::Low => "low",
            OxygenLevel::Critical => "critical",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OxygenLevel::Excellent => "Optimal oxygen levels",
            OxygenLevel::Good => "Normal range",
            OxygenLevel::Low => "Below normal",
            OxygenLevel::Critical => "Requires attention",
        }
    }

    pub fn severity(&self) -> HealthStatus {
        match self {
            OxygenLevel::Excellent | OxygenLevel::Good => HealthStatus::Normal,
            OxygenLevel::Low => HealthStatus::Warning,
            OxygenLevel::Critical => HealthStatus::Critical,
        }
    }
}

/// Stress band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressBand {
    Low,
    Moderate,
    High,
}

impl StressBand {
    pub fn classify(level: u32) -> Self {
        match level {
            0..=30 => StressBand::Low,
            31..=60 => StressBand::Moderate,
            _ => StressBand::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StressBand::Low => "low",
            StressBand::Moderate => "moderate",
            StressBand::High => "high",
        }
    }

    pub fn severity(&self) -> HealthStatus {
        match self {
            StressBand::Low => HealthStatus::Normal,
            StressBand::Moderate => HealthStatus::Warning,
            StressBand::High => HealthStatus::Critical,
        }
    }
}

/// Sleep quality band for a 0-100 quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SleepQuality {
    pub fn classify(score: u32) -> Self {
        match score {
            85.. => SleepQuality::Excellent,
            70..=84 => SleepQuality::Good,
            50..=69 => SleepQuality::Fair,
            _ => SleepQuality::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SleepQuality::Excellent => "excellent",
            SleepQuality::Good => "good",
            SleepQuality::Fair => "fair",
            SleepQuality::Poor => "poor",
        }
    }
}

/// Whether a night's sleep met the seven-hour target.
pub fn sleep_is_adequate(hours: f64) -> bool {
    hours >= 7.0
}

/// Direction arrow next to a metric card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↗",
            TrendDirection::Down => "↘",
            TrendDirection::Stable => "→",
        }
    }

    pub fn for_heart_rate(bpm: u32) -> Self {
        if bpm > 80 {
            TrendDirection::Up
        } else if bpm < 65 {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    }

    pub fn for_blood_oxygen(percent: u32) -> Self {
        if percent >= 98 {
            TrendDirection::Stable
        } else {
            TrendDirection::Down
        }
    }

    pub fn for_stress(level: u32) -> Self {
        if level > 60 {
            TrendDirection::Up
        } else if level < 30 {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    }

    pub fn for_steps(steps: u32) -> Self {
        if steps > 8000 {
            TrendDirection::Up
        } else {
            TrendDirection::Stable
        }
    }

    pub fn for_sleep(hours: f64) -> Self {
        if sleep_is_adequate(hours) {
            TrendDirection::Stable
        } else {
            TrendDirection::Down
        }
    }
}

/// Percentage of `goal` reached by `value`, unclamped and rounded.
pub fn goal_percent(value: u32, goal: u32) -> u32 {
    if goal == 0 {
        return 100;
    }
    (f64::from(value) / f64::from(goal) * 100.0).round() as u32
}

/// A domain alert raised when a fresh snapshot crosses a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalAlert {
    /// Heart rate above the critical limit.
    HighHeartRate(u32),
    /// Blood oxygen below the critical limit.
    LowOxygen(u32),
}

impl VitalAlert {
    /// Check a snapshot for an alert. Heart rate takes precedence.
    pub fn check(snapshot: &MetricsSnapshot, thresholds: &Thresholds) -> Option<Self> {
        if snapshot.heart_rate > thresholds.heart_rate_critical {
            Some(VitalAlert::HighHeartRate(snapshot.heart_rate))
        } else if snapshot.blood_oxygen < thresholds.blood_oxygen_critical {
            Some(VitalAlert::LowOxygen(snapshot.blood_oxygen))
        } else {
            None
        }
    }

    /// Short message for the status bar.
    pub fn message(&self) -> String {
        match self {
            VitalAlert::HighHeartRate(bpm) => {
                format!("High heart rate alert: {} BPM. Consider taking a break.", bpm)
            }
            VitalAlert::LowOxygen(pct) => {
                format!("Low oxygen alert: blood oxygen at {}%. Check your breathing.", pct)
            }
        }
    }

    /// Whether the alert should bring up the emergency-care directory.
    pub fn suggests_care(&self) -> bool {
        matches!(self, VitalAlert::HighHeartRate(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_rate_zone_boundaries() {
        let cases = [
            (59, "resting"),
            (60, "normal"),
            (99, "normal"),
            (100, "elevated"),
            (119, "elevated"),
            (120, "high"),
            (149, "high"),
            (150, "maximum"),
        ];
        for (bpm, label) in cases {
            assert_eq!(HeartRateZone::classify(bpm).label(), label, "bpm {}", bpm);
        }
    }

    #[test]
    fn test_oxygen_level_boundaries() {
        assert_eq!(OxygenLevel::classify(100).label(), "excellent");
        assert_eq!(OxygenLevel::classify(98).label(), "excellent");
        assert_eq!(OxygenLevel::classify(97).label(), "good");
        assert_eq!(OxygenLevel::classify(95).label(), "good");
        assert_eq!(OxygenLevel::classify(90).label(), "low");
        assert_eq!(OxygenLevel::classify(89).label(), "critical");
    }

    #[test]
    fn test_overall_status_heart_rate_alone_is_critical() {
        let t = Thresholds::default();
        assert_eq!(overall_status(101, 99, 10, &t), HealthStatus::Critical);
    }

    #[test]
    fn test_overall_status_precedence() {
        let t = Thresholds::default();
        assert_eq!(overall_status(70, 99, 20, &t), HealthStatus::Normal);
        assert_eq!(overall_status(86, 99, 20, &t), HealthStatus::Warning);
        assert_eq!(overall_status(70, 96, 20, &t), HealthStatus::Warning);
        assert_eq!(overall_status(70, 99, 51, &t), HealthStatus::Warning);
        // Critical wins even when warning conditions hold too.
        assert_eq!(overall_status(90, 94, 55, &t), HealthStatus::Critical);
        assert_eq!(overall_status(70, 99, 71, &t), HealthStatus::Critical);
        // Limits themselves are not exceeded.
        assert_eq!(overall_status(85, 97, 50, &t), HealthStatus::Normal);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = Thresholds {
            heart_rate_critical: 120,
            ..Thresholds::default()
        };
        assert_eq!(overall_status(101, 99, 10, &t), HealthStatus::Warning);
    }

    #[test]
    fn test_card_alerts() {
        let t = Thresholds::default();
        assert_eq!(heart_rate_alert(101, &t), HealthStatus::Critical);
        assert_eq!(heart_rate_alert(86, &t), HealthStatus::Warning);
        assert_eq!(heart_rate_alert(85, &t), HealthStatus::Normal);
        assert_eq!(blood_oxygen_alert(94, &t), HealthStatus::Critical);
        assert_eq!(blood_oxygen_alert(96, &t), HealthStatus::Warning);
        assert_eq!(blood_oxygen_alert(97, &t), HealthStatus::Normal);
        assert_eq!(stress_alert(71, &t), HealthStatus::Warning);
        assert_eq!(stress_alert(70, &t), HealthStatus::Normal);
    }

    #[test]
    fn test_stress_and_sleep_bands() {
        assert_eq!(StressBand::classify(30), StressBand::Low);
        assert_eq!(StressBand::classify(31), StressBand::Moderate);
        assert_eq!(StressBand::classify(60), StressBand::Moderate);
        assert_eq!(StressBand::classify(61), StressBand::High);

        assert_eq!(SleepQuality::classify(85), SleepQuality::Excellent);
        assert_eq!(SleepQuality::classify(70), SleepQuality::Good);
        assert_eq!(SleepQuality::classify(50), SleepQuality::Fair);
        assert_eq!(SleepQuality::classify(49), SleepQuality::Poor);

        assert!(sleep_is_adequate(7.0));
        assert!(!sleep_is_adequate(6.9));
    }

    #[test]
    fn test_trend_directions() {
        assert_eq!(TrendDirection::for_heart_rate(81), TrendDirection::Up);
        assert_eq!(TrendDirection::for_heart_rate(64), TrendDirection::Down);
        assert_eq!(TrendDirection::for_heart_rate(72), TrendDirection::Stable);
        assert_eq!(TrendDirection::for_blood_oxygen(97), TrendDirection::Down);
        assert_eq!(TrendDirection::for_steps(8001), TrendDirection::Up);
        assert_eq!(TrendDirection::for_stress(29), TrendDirection::Down);
    }

    #[test]
    fn test_goal_percent() {
        assert_eq!(goal_percent(5000, 10_000), 50);
        assert_eq!(goal_percent(12_345, 10_000), 123);
        assert_eq!(goal_percent(10, 0), 100);
    }

    #[test]
    fn test_vital_alert_precedence() {
        let t = Thresholds::default();
        let mut snapshot = MetricsSnapshot {
            heart_rate: 104,
            blood_oxygen: 93,
            steps: 0,
            calories: 0,
            sleep_hours: 7.0,
            stress_level: 20,
            water_intake: 0,
        };
        let alert = VitalAlert::check(&snapshot, &t).unwrap();
        assert_eq!(alert, VitalAlert::HighHeartRate(104));
        assert!(alert.suggests_care());

        snapshot.heart_rate = 72;
        let alert = VitalAlert::check(&snapshot, &t).unwrap();
        assert_eq!(alert, VitalAlert::LowOxygen(93));
        assert!(!alert.suggests_care());
        assert!(alert.message().contains("93%"));

        snapshot.blood_oxygen = 98;
        assert!(VitalAlert::check(&snapshot, &t).is_none());
    }
}
