//! Instantaneous vital-sign snapshots.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// One instantaneous set of simulated vital-sign readings.
///
/// Serialized with camelCase keys, matching the health backend's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Beats per minute.
    pub heart_rate: u32,
    /// SpO2 percentage.
    pub blood_oxygen: u32,
    pub steps: u32,
    /// Kilocalories burned today.
    pub calories: u32,
    /// Hours slept last night, one decimal place.
    pub sleep_hours: f64,
    /// Stress score, 0-100.
    pub stress_level: u32,
    /// Water intake in millilitres.
    pub water_intake: u32,
}

/// A uniform draw of `floor + [0, span)`, rounded to the nearest integer.
fn draw<R: Rng + ?Sized>(rng: &mut R, floor: f64, span: f64) -> u32 {
    (floor + rng.gen::<f64>() * span).round() as u32
}

/// Whether `hour` falls in the resting window used for the heart-rate baseline.
pub fn is_resting_hour(hour: u32) -> bool {
    hour < 6 || hour > 22
}

/// Generate a snapshot for the clock's current time.
///
/// Heart rate follows a day/night rule (55-65 BPM while resting, 70-90 BPM
/// otherwise); every other field is drawn independently from its own range.
pub fn generate_snapshot<R: Rng + ?Sized>(clock: &dyn Clock, rng: &mut R) -> MetricsSnapshot {
    let heart_rate = if is_resting_hour(clock.hour()) {
        draw(rng, 55.0, 10.0)
    } else {
        draw(rng, 70.0, 20.0)
    };

    MetricsSnapshot {
        heart_rate,
        blood_oxygen: draw(rng, 96.0, 4.0),
        steps: draw(rng, 1000.0, 8000.0),
        calories: draw(rng, 300.0, 1200.0),
        sleep_hours: ((6.0 + rng.gen::<f64>() * 3.0) * 10.0).round() / 10.0,
        stress_level: draw(rng, 20.0, 60.0),
        water_intake: draw(rng, 500.0, 2000.0),
    }
}
