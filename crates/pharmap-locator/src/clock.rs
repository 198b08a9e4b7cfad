//! Time source for opening-hours evaluation.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use pharmap_core::DayIndex;

/// Supplies the local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The device's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// A schedule day plus a time of day as HHMM in `0..=2359`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleMoment {
    pub day: DayIndex,
    pub time: u16,
}

impl ScheduleMoment {
    /// Returns `None` if `time` is not a valid HHMM time of day.
    #[must_use]
    pub fn new(day: DayIndex, time: u16) -> Option<Self> {
        (time / 100 < 24 && time % 100 < 60).then_some(Self { day, time })
    }

    #[must_use]
    pub fn from_datetime(at: &NaiveDateTime) -> Self {
        // hour * 100 + minute is at most 2359.
        #[allow(clippy::cast_possible_truncation)]
        let time = (at.hour() * 100 + at.minute()) as u16;
        Self {
            day: DayIndex::from(at.weekday()),
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    #[test]
    fn moment_from_monday_morning() {
        // 2024-06-03 is a Monday.
        let moment = ScheduleMoment::from_datetime(&at(2024, 6, 3, 9, 5));
        assert_eq!(moment.day, DayIndex::MONDAY);
        assert_eq!(moment.time, 905);
    }

    #[test]
    fn moment_maps_sunday_to_seven() {
        // 2024-06-09 is a Sunday.
        let moment = ScheduleMoment::from_datetime(&at(2024, 6, 9, 23, 59));
        assert_eq!(moment.day.get(), 7);
        assert_eq!(moment.time, 2359);
    }

    #[test]
    fn moment_midnight_is_zero() {
        let moment = ScheduleMoment::from_datetime(&at(2024, 6, 4, 0, 0));
        assert_eq!(moment.time, 0);
        assert_eq!(moment.day.get(), 2);
    }

    #[test]
    fn new_rejects_invalid_times() {
        assert!(ScheduleMoment::new(DayIndex::MONDAY, 2400).is_none());
        assert!(ScheduleMoment::new(DayIndex::MONDAY, 1260).is_none());
        assert!(ScheduleMoment::new(DayIndex::MONDAY, 2359).is_some());
    }

    #[test]
    fn fixed_clock_returns_its_instant() {
        let instant = at(2024, 6, 3, 10, 0);
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
