//! Today's opening state for a pharmacy.
//!
//! A day is open when `open <= now <= close`, both ends inclusive. Hours that
//! close before they open (past midnight) are taken literally and therefore
//! never report open; the loader warns when a dataset contains them.

use pharmap_core::{PharmacyRecord, Pharmacy};

use crate::clock::ScheduleMoment;

/// Closing value reported alongside the closed-today sentinel.
pub const CLOSED_TODAY_CLOSE: &str = "2400";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodaySchedule {
    /// HHMM opening time, or [`Pharmacy::CLOSED_TODAY`].
    pub duty_open: String,
    pub duty_close: String,
    pub is_open: bool,
}

impl TodaySchedule {
    fn closed_all_day() -> Self {
        Self {
            duty_open: Pharmacy::CLOSED_TODAY.to_string(),
            duty_close: CLOSED_TODAY_CLOSE.to_string(),
            is_open: false,
        }
    }
}

/// Resolve `record`'s hours for `moment.day` and whether it is open at
/// `moment.time`.
#[must_use]
pub fn evaluate_schedule(record: &PharmacyRecord, moment: ScheduleMoment) -> TodaySchedule {
    let Some(hours) = record.hours.get(moment.day) else {
        return TodaySchedule::closed_all_day();
    };

    TodaySchedule {
        duty_open: format_hhmm(hours.open),
        duty_close: format_hhmm(hours.close),
        is_open: hours.open <= moment.time && moment.time <= hours.close,
    }
}

fn format_hhmm(value: u16) -> String {
    format!("{value:04}")
}
