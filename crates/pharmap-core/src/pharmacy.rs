//! Pharmacy domain types shared by the dataset loader and the locator.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Schedule day index: 1 = Monday through 7 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayIndex(u8);

impl DayIndex {
    pub const MONDAY: Self = Self(1);
    pub const SUNDAY: Self = Self(7);

    /// Returns `None` unless `index` is in `1..=7`.
    #[must_use]
    pub fn new(index: u8) -> Option<Self> {
        (1..=7).contains(&index).then_some(Self(index))
    }

    /// Map a calendar day number (0 = Sunday .. 6 = Saturday) onto the
    /// schedule index, where Sunday is 7 rather than 0.
    #[must_use]
    pub fn from_calendar_day(day: u32) -> Option<Self> {
        match day {
            0 => Some(Self::SUNDAY),
            1..=6 => u8::try_from(day).ok().map(Self),
            _ => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate Monday through Sunday.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=7).map(Self)
    }
}

impl From<Weekday> for DayIndex {
    fn from(weekday: Weekday) -> Self {
        // num_days_from_sunday is 0..=6, which always maps.
        Self::from_calendar_day(weekday.num_days_from_sunday()).unwrap_or(Self::SUNDAY)
    }
}

impl std::fmt::Display for DayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opening and closing time for one day, both as 24-hour HHMM integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: u16,
    pub close: u16,
}

impl DayHours {
    /// Closing time earlier than opening time, i.e. the pharmacy stays open
    /// past midnight. The open check does not treat these specially.
    #[must_use]
    pub const fn crosses_midnight(&self) -> bool {
        self.close < self.open
    }
}

/// Opening hours for the seven schedule days. `None` means closed all day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours([Option<DayHours>; 7]);

impl WeeklyHours {
    #[must_use]
    pub const fn new(days: [Option<DayHours>; 7]) -> Self {
        Self(days)
    }

    #[must_use]
    pub fn get(&self, day: DayIndex) -> Option<DayHours> {
        self.0[usize::from(day.get() - 1)]
    }

    pub fn set(&mut self, day: DayIndex, hours: Option<DayHours>) {
        self.0[usize::from(day.get() - 1)] = hours;
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayIndex, Option<DayHours>)> + '_ {
        DayIndex::all().zip(self.0.iter().copied())
    }
}

/// A validated pharmacy entry from a regional dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub hours: WeeklyHours,
}

impl PharmacyRecord {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A pharmacy as published to views: ranked by distance, with today's
/// opening state resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pharmacy {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Euclidean distance in degrees from the query location. Only meaningful
    /// as a ranking key.
    pub distance: f64,
    /// Today's opening time as HHMM, or `"-1"` when closed all day.
    #[serde(rename = "dutyopen")]
    pub duty_open: String,
    #[serde(rename = "dutyclose")]
    pub duty_close: String,
    #[serde(rename = "isOpen")]
    pub is_open: bool,
}

impl Pharmacy {
    pub const CLOSED_TODAY: &'static str = "-1";

    #[must_use]
    pub fn is_closed_today(&self) -> bool {
        self.duty_open == Self::CLOSED_TODAY
    }
}
