//! Proximity filter and distance ranking.

use pharmap_core::{Coordinate, Pharmacy, PharmacyRecord};

use crate::clock::ScheduleMoment;
use crate::schedule::evaluate_schedule;

/// Half-width of the search square, in degrees on each axis.
///
/// The filter is a square around the query location, not a radius.
pub const SEARCH_RANGE_DEGREES: f64 = 0.02;

/// Build the ranked result set for `location`.
///
/// 1. Keep records whose name contains `keyword` (case-sensitive substring),
///    unless `keyword` is empty or whitespace-only.
/// 2. Keep records inside the inclusive square of
///    [`SEARCH_RANGE_DEGREES`] around `location`.
/// 3. Attach the degree distance and today's opening state.
/// 4. Stable sort by distance, so ties keep dataset order.
#[must_use]
pub fn rank_pharmacies(
    records: &[PharmacyRecord],
    location: Coordinate,
    keyword: &str,
    moment: ScheduleMoment,
) -> Vec<Pharmacy> {
    let filter_by_name = !keyword.trim().is_empty();

    let mut ranked: Vec<Pharmacy> = records
        .iter()
        .filter(|record| !filter_by_name || record.name.contains(keyword))
        .filter(|record| within_search_square(record.coordinate(), location))
        .map(|record| {
            let today = evaluate_schedule(record, moment);
            Pharmacy {
                id: record.id.clone(),
                name: record.name.clone(),
                phone: record.phone.clone(),
                address: record.address.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
                distance: degree_distance(location, record.coordinate()),
                duty_open: today.duty_open,
                duty_close: today.duty_close,
                is_open: today.is_open,
            }
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    tracing::debug!(
        candidates = records.len(),
        matched = ranked.len(),
        keyword,
        "ranked nearby pharmacies"
    );

    ranked
}

fn within_search_square(point: Coordinate, center: Coordinate) -> bool {
    point.latitude >= center.latitude - SEARCH_RANGE_DEGREES
        && point.latitude <= center.latitude + SEARCH_RANGE_DEGREES
        && point.longitude >= center.longitude - SEARCH_RANGE_DEGREES
        && point.longitude <= center.longitude + SEARCH_RANGE_DEGREES
}

/// Euclidean norm of the coordinate difference, in raw degrees.
fn degree_distance(from: Coordinate, to: Coordinate) -> f64 {
    (to.latitude - from.latitude).hypot(to.longitude - from.longitude)
}
