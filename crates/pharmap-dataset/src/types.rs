//! Raw dataset shapes, exactly as they appear in the regional JSON files.

use serde::Deserialize;

/// A loosely typed dataset value. The regional exports encode coordinates
/// and HHMM times as strings, but some rows carry bare numbers instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl RawScalar {
    /// Textual form of the value, trimmed.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            RawScalar::Text(s) => s.trim().to_string(),
            RawScalar::Integer(n) => n.to_string(),
            RawScalar::Float(f) => f.to_string(),
        }
    }
}

/// One pharmacy row from a regional dataset.
///
/// `dutyTime{N}s` / `dutyTime{N}c` hold the opening and closing time for
/// schedule day `N` (1 = Monday .. 7 = Sunday). A missing or empty opening
/// time means the pharmacy is closed that day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPharmacyRecord {
    pub hpid: String,
    pub duty_name: String,
    #[serde(default)]
    pub duty_tel1: Option<RawScalar>,
    #[serde(default)]
    pub duty_addr: Option<String>,
    pub wgs84_lat: RawScalar,
    pub wgs84_lon: RawScalar,
    #[serde(default)]
    pub duty_time1s: Option<RawScalar>,
    #[serde(default)]
    pub duty_time1c: Option<RawScalar>,
    #[serde(default)]
    pub duty_time2s: Option<RawScalar>,
    #[serde(default)]
    pub duty_time2c: Option<RawScalar>,
    #[serde(default)]
    pub duty_time3s: Option<RawScalar>,
    #[serde(default)]
    pub duty_time3c: Option<RawScalar>,
    #[serde(default)]
    pub duty_time4s: Option<RawScalar>,
    #[serde(default)]
    pub duty_time4c: Option<RawScalar>,
    #[serde(default)]
    pub duty_time5s: Option<RawScalar>,
    #[serde(default)]
    pub duty_time5c: Option<RawScalar>,
    #[serde(default)]
    pub duty_time6s: Option<RawScalar>,
    #[serde(default)]
    pub duty_time6c: Option<RawScalar>,
    #[serde(default)]
    pub duty_time7s: Option<RawScalar>,
    #[serde(default)]
    pub duty_time7c: Option<RawScalar>,
}

impl RawPharmacyRecord {
    /// Opening and closing fields for schedule days 1..=7, in order.
    #[must_use]
    pub fn duty_times(&self) -> [(Option<&RawScalar>, Option<&RawScalar>); 7] {
        [
            (self.duty_time1s.as_ref(), self.duty_time1c.as_ref()),
            (self.duty_time2s.as_ref(), self.duty_time2c.as_ref()),
            (self.duty_time3s.as_ref(), self.duty_time3c.as_ref()),
            (self.duty_time4s.as_ref(), self.duty_time4c.as_ref()),
            (self.duty_time5s.as_ref(), self.duty_time5c.as_ref()),
            (self.duty_time6s.as_ref(), self.duty_time6c.as_ref()),
            (self.duty_time7s.as_ref(), self.duty_time7c.as_ref()),
        ]
    }
}
