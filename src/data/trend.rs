//! Hourly trend series with time-of-day shaping.

use chrono::Timelike;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Default span of a trend series, in hours.
pub const DEFAULT_TREND_HOURS: u32 = 24;

/// Valid heart-rate range for trend points (BPM).
pub const HEART_RATE_RANGE: (f64, f64) = (50.0, 120.0);
/// Valid blood-oxygen range for trend points (%).
pub const BLOOD_OXYGEN_RANGE: (f64, f64) = (95.0, 100.0);
/// Valid stress range for trend points.
pub const STRESS_RANGE: (f64, f64) = (10.0, 80.0);

/// One sampled hour of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Hour label ("HH:00"), or "Day N" for weekly and monthly frames.
    pub time: String,
    pub heart_rate: u32,
    pub blood_oxygen: u32,
    pub steps: u32,
    pub stress_level: u32,
}

/// Ordered trend samples, oldest first.
pub type TrendSeries = Vec<TrendPoint>;

/// Activity band for an hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBand {
    /// 06-09: waking up, commute.
    Morning,
    /// 12-14: lunch-time activity.
    Midday,
    /// 17-19: evening workout.
    Evening,
    /// 22-05: sleep and rest.
    Night,
    Other,
}

impl DayBand {
    /// Band for a given hour (0-23).
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            6..=9 => DayBand::Morning,
            12..=14 => DayBand::Midday,
            17..=19 => DayBand::Evening,
            h if h >= 22 || h <= 5 => DayBand::Night,
            _ => DayBand::Other,
        }
    }

    /// Additive (heart rate, stress) offsets applied to the baselines.
    pub fn offsets(self) -> (f64, f64) {
        match self {
            DayBand::Morning => (15.0, 20.0),
            DayBand::Midday => (10.0, 15.0),
            DayBand::Evening => (20.0, 25.0),
            DayBand::Night => (-15.0, -10.0),
            DayBand::Other => (0.0, 0.0),
        }
    }
}

/// Symmetric uniform noise in `[-half_width, half_width)`.
fn jitter<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * 2.0 * half_width
}

fn clamp_round(value: f64, (lo, hi): (f64, f64)) -> u32 {
    value.clamp(lo, hi).round() as u32
}

/// Synthesize one trend point for the given hour of day.
fn sample_hour<R: Rng + ?Sized>(hour: u32, rng: &mut R) -> TrendPoint {
    let (hr_offset, stress_offset) = DayBand::for_hour(hour).offsets();
    let heart_rate = 70.0 + hr_offset + jitter(rng, 10.0);
    let blood_oxygen = 98.0 + jitter(rng, 2.0);
    let daytime_bonus = if (7..=21).contains(&hour) { 200.0 } else { 0.0 };
    let steps = (rng.gen::<f64>() * 500.0 + daytime_bonus).max(0.0).round() as u32;
    let stress = 30.0 + stress_offset + jitter(rng, 15.0);

    TrendPoint {
        time: format!("{:02}:00", hour),
        heart_rate: clamp_round(heart_rate, HEART_RATE_RANGE),
        blood_oxygen: clamp_round(blood_oxygen, BLOOD_OXYGEN_RANGE),
        steps,
        stress_level: clamp_round(stress, STRESS_RANGE),
    }
}

/// Generate `hours + 1` hourly points spanning from `hours` ago up to now.
pub fn generate_series<R: Rng + ?Sized>(hours: u32, clock: &dyn Clock, rng: &mut R) -> TrendSeries {
    clock
        .hours_back(hours)
        .into_iter()
        .map(|sample_time| sample_hour(sample_time.hour(), rng))
        .collect()
}

/// Chart timeframe on the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Last 24 hours, hourly labels.
    #[default]
    Daily,
    /// A 7-hour draw relabelled "Day 1".."Day 8".
    Weekly,
    /// A 30-hour draw relabelled "Day 1".."Day 31".
    Monthly,
}

impl Timeframe {
    pub fn next(self) -> Self {
        match self {
            Timeframe::Daily => Timeframe::Weekly,
            Timeframe::Weekly => Timeframe::Monthly,
            Timeframe::Monthly => Timeframe::Daily,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
        }
    }

    /// Derive the chart series for this timeframe.
    ///
    /// Daily reuses the frame's hourly series. Weekly and monthly draw a
    /// fresh series over 7 or 30 hours (so 8 or 31 points) and relabel the
    /// points by day index.
    pub fn series<R: Rng + ?Sized>(
        self,
        daily: &[TrendPoint],
        clock: &dyn Clock,
        rng: &mut R,
    ) -> TrendSeries {
        let hours = match self {
            Timeframe::Daily => return daily.to_vec(),
            Timeframe::Weekly => 7,
            Timeframe::Monthly => 30,
        };
        generate_series(hours, clock, rng)
            .into_iter()
            .enumerate()
            .map(|(i, point)| TrendPoint {
                time: format!("Day {}", i + 1),
                ..point
            })
            .collect()
    }
}
