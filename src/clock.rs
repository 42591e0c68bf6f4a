//! Wall-clock abstraction for the generators.
//!
//! Generators only care about local wall time (the hour of day drives the
//! heart-rate and stress shaping), so the clock hands out a
//! [`NaiveDateTime`] in the local zone. Tests swap in a [`FixedClock`].

use std::fmt::Debug;

use chrono::{Duration, Local, NaiveDateTime, Timelike};

/// Source of "now" for the metric and trend generators.
pub trait Clock: Send + Sync + Debug {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current hour of day (0-23).
    fn hour(&self) -> u32 {
        self.now().hour()
    }

    /// Wall-clock readings at each whole hour from `hours` ago up to now,
    /// oldest first.
    fn hours_back(&self, hours: u32) -> Vec<NaiveDateTime> {
        let now = self.now();
        (0..=hours)
            .rev()
            .map(|i| now - Duration::hours(i64::from(i)))
            .collect()
    }
}

/// The system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    // Absolute-time steps; across a DST change a label may skip or repeat.
    fn hours_back(&self, hours: u32) -> Vec<NaiveDateTime> {
        let now = Local::now();
        (0..=hours)
            .rev()
            .map(|i| (now - Duration::hours(i64::from(i))).naive_local())
            .collect()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Fixed clock at `hour:minute` on an arbitrary date.
    ///
    /// Returns `None` for out-of-range hours or minutes.
    pub fn at(hour: u32, minute: u32) -> Option<Self> {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 14)?
            .and_hms_opt(hour, minute, 0)
            .map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_hour() {
        let clock = FixedClock::at(17, 45).unwrap();
        assert_eq!(clock.hour(), 17);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_hours_back() {
        let clock = FixedClock::at(1, 30).unwrap();
        let hours: Vec<u32> = clock.hours_back(3).iter().map(|t| t.hour()).collect();
        assert_eq!(hours, vec![22, 23, 0, 1]);
        assert_eq!(clock.hours_back(0), vec![clock.now()]);
    }

    #[test]
    fn test_system_clock_hours_back_ends_now() {
        let steps = SystemClock.hours_back(24);
        assert_eq!(steps.len(), 25);
        let span = *steps.last().unwrap() - steps[0];
        // 24h of absolute time is 23h-25h of wall time across a DST change.
        assert!((23..=25).contains(&span.num_hours()), "span {:?}", span);
    }

    #[test]
    fn test_fixed_clock_rejects_bad_hour() {
        assert!(FixedClock::at(24, 0).is_none());
        assert!(FixedClock::at(23, 60).is_none());
    }
}
