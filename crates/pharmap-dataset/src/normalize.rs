//! Conversion from [`RawPharmacyRecord`] to a validated [`PharmacyRecord`].
//!
//! Every numeric field is parsed here, once, so the ranking code never sees
//! a string-encoded number.

use pharmap_core::{DayHours, DayIndex, PharmacyRecord, WeeklyHours};

use crate::error::DatasetError;
use crate::types::{RawPharmacyRecord, RawScalar};

/// Closing time assumed when a day has an opening time but no closing time.
pub const DEFAULT_CLOSE: u16 = 2400;

/// Parses a 24-hour `HHMM` value. Leading zeros are optional (`"900"` is
/// 09:00). `2400` is accepted as end-of-day.
///
/// # Errors
///
/// Returns a human-readable reason when the value is not an `HHMM` time.
pub fn parse_hhmm(text: &str) -> Result<u16, String> {
    let value = text
        .parse::<u16>()
        .map_err(|e| format!("not an HHMM integer: {e}"))?;
    let (hours, minutes) = (value / 100, value % 100);
    if minutes >= 60 {
        return Err(format!("minutes {minutes} out of range"));
    }
    if hours > 24 || (hours == 24 && minutes > 0) {
        return Err(format!("hour {hours} out of range"));
    }
    Ok(value)
}

/// Normalizes a raw dataset row.
///
/// # Errors
///
/// Returns [`DatasetError::InvalidField`] when a coordinate or schedule
/// value cannot be parsed.
pub fn normalize_record(
    raw: RawPharmacyRecord,
    path: &str,
) -> Result<PharmacyRecord, DatasetError> {
    let invalid = |field: &str, value: String, reason: String| DatasetError::InvalidField {
        path: path.to_string(),
        record_id: raw.hpid.clone(),
        field: field.to_string(),
        value,
        reason,
    };

    let latitude = parse_degrees(&raw.wgs84_lat, 90.0)
        .map_err(|reason| invalid("wgs84Lat", raw.wgs84_lat.as_text(), reason))?;
    let longitude = parse_degrees(&raw.wgs84_lon, 180.0)
        .map_err(|reason| invalid("wgs84Lon", raw.wgs84_lon.as_text(), reason))?;

    let mut hours = WeeklyHours::default();
    for (day, (open, close)) in DayIndex::all().zip(raw.duty_times()) {
        let open = match present(open) {
            Some(text) => parse_hhmm(&text)
                .map_err(|reason| invalid(&format!("dutyTime{day}s"), text, reason))?,
            None => continue,
        };
        let close = match present(close) {
            Some(text) => parse_hhmm(&text)
                .map_err(|reason| invalid(&format!("dutyTime{day}c"), text, reason))?,
            None => DEFAULT_CLOSE,
        };
        hours.set(day, Some(DayHours { open, close }));
    }

    let phone = raw.duty_tel1.as_ref().map(RawScalar::as_text).unwrap_or_default();
    let address = raw
        .duty_addr
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Ok(PharmacyRecord {
        id: raw.hpid,
        name: raw.duty_name,
        phone,
        address,
        latitude,
        longitude,
        hours,
    })
}

/// Non-empty textual value of an optional field.
fn present(value: Option<&RawScalar>) -> Option<String> {
    value.map(RawScalar::as_text).filter(|s| !s.is_empty())
}

// Coordinates never come close to 2^53, so integer conversion is exact.
#[allow(clippy::cast_precision_loss)]
fn parse_degrees(value: &RawScalar, limit: f64) -> Result<f64, String> {
    let degrees = match value {
        RawScalar::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("not a decimal degree value: {e}"))?,
        RawScalar::Integer(n) => *n as f64,
        RawScalar::Float(f) => *f,
    };
    if !degrees.is_finite() {
        return Err("must be finite".to_string());
    }
    if degrees.abs() > limit {
        return Err(format!("outside ±{limit} degrees"));
    }
    Ok(degrees)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
