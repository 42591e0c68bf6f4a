//! The weekly sleep log shown next to the live sleep reading.

use super::classify::SleepQuality;

/// One night from the sleep log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepNight {
    pub day: &'static str,
    pub hours: f64,
    /// Quality score, 0-100.
    pub quality: u32,
    /// Hours of deep sleep.
    pub deep_sleep: f64,
}

impl SleepNight {
    pub fn band(&self) -> SleepQuality {
        SleepQuality::classify(self.quality)
    }
}

const fn night(day: &'static str, hours: f64, quality: u32, deep_sleep: f64) -> SleepNight {
    SleepNight {
        day,
        hours,
        quality,
        deep_sleep,
    }
}

static SLEEP_LOG: [SleepNight; 7] = [
    night("Mon", 7.5, 85, 2.1),
    night("Tue", 6.2, 72, 1.8),
    night("Wed", 8.1, 92, 2.4),
    night("Thu", 7.0, 80, 2.0),
    night("Fri", 5.8, 65, 1.5),
    night("Sat", 9.2, 95, 2.8),
    night("Sun", 8.5, 88, 2.5),
];

/// The last seven nights, Monday first.
pub fn sleep_log() -> &'static [SleepNight] {
    &SLEEP_LOG
}

/// Mean hours and mean quality over a log.
pub fn weekly_average(nights: &[SleepNight]) -> Option<(f64, u32)> {
    if nights.is_empty() {
        return None;
    }
    let n = nights.len() as f64;
    let hours = nights.iter().map(|night| night.hours).sum::<f64>() / n;
    let quality = nights.iter().map(|night| f64::from(night.quality)).sum::<f64>() / n;
    Some((hours, quality.round() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_covers_a_week() {
        let log = sleep_log();
        assert_eq!(log.len(), 7);
        assert_eq!(log[0].day, "Mon");
        assert_eq!(log[6].day, "Sun");
    }

    #[test]
    fn test_bands() {
        let log = sleep_log();
        assert_eq!(log[0].band(), SleepQuality::Excellent);
        assert_eq!(log[1].band(), SleepQuality::Good);
        assert_eq!(log[4].band(), SleepQuality::Fair);
    }

    #[test]
    fn test_weekly_average() {
        let (hours, quality) = weekly_average(sleep_log()).unwrap();
        assert!((hours - 7.471).abs() < 0.01);
        assert_eq!(quality, 82);
        assert!(weekly_average(&[]).is_none());
    }
}
