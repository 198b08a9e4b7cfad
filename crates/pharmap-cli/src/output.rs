//! Terminal rendering for the list, favorites, and map views.

use std::fmt::Write as _;

use pharmap_core::{Coordinate, Pharmacy};
use pharmap_locator::ResultSet;
use serde::Serialize;

pub(crate) const NO_RESULTS: &str = "no pharmacies found";
pub(crate) const NO_FAVORITES: &str = "no favorite pharmacies";
pub(crate) const NO_FAVORITES_NEARBY: &str = "no favorite pharmacies nearby";

/// JSON shape for `search --json`.
#[derive(Serialize)]
struct JsonOutput<'a> {
    generation: u64,
    keyword: &'a str,
    location: Option<Coordinate>,
    pharmacies: &'a [Pharmacy],
}

pub(crate) fn format_json(results: &ResultSet) -> anyhow::Result<String> {
    let output = JsonOutput {
        generation: results.generation,
        keyword: &results.keyword,
        location: results.location,
        pharmacies: &results.pharmacies,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// "closed today" or "hours 0900~1800".
pub(crate) fn hours_line(pharmacy: &Pharmacy) -> String {
    if pharmacy.is_closed_today() {
        "closed today".to_string()
    } else {
        format!("hours {}~{}", pharmacy.duty_open, pharmacy.duty_close)
    }
}

pub(crate) fn status_label(pharmacy: &Pharmacy) -> &'static str {
    if pharmacy.is_open {
        "open"
    } else {
        "closed"
    }
}

/// Numbered list view. `empty` is printed when there is nothing to show.
pub(crate) fn format_list(
    pharmacies: &[&Pharmacy],
    is_favorite: impl Fn(&str) -> bool,
    empty: &str,
) -> String {
    if pharmacies.is_empty() {
        return empty.to_string();
    }

    let mut output = String::new();
    for (i, pharmacy) in pharmacies.iter().enumerate() {
        let star = if is_favorite(&pharmacy.id) { " ★" } else { "" };
        let _ = writeln!(output, "{}. {}{star}", i + 1, pharmacy.name);
        let _ = writeln!(output, "   id: {}", pharmacy.id);
        let _ = writeln!(output, "   phone: {}", pharmacy.phone);
        let _ = writeln!(output, "   address: {}", pharmacy.address);
        let _ = writeln!(
            output,
            "   {} ({})",
            hours_line(pharmacy),
            status_label(pharmacy)
        );
        output.push('\n');
    }
    output.trim_end().to_string()
}

/// One marker line per pharmacy, open and closed markers told apart.
pub(crate) fn format_markers(results: &ResultSet) -> String {
    let mut output = String::new();
    if let Some(center) = results.location {
        let _ = writeln!(
            output,
            "center {:.6}, {:.6}",
            center.latitude, center.longitude
        );
    }
    if results.is_empty() {
        output.push_str(NO_RESULTS);
        return output;
    }
    for pharmacy in &results.pharmacies {
        let marker = if pharmacy.is_open { "[open]  " } else { "[closed]" };
        let _ = writeln!(
            output,
            "{marker} {:.6}, {:.6}  {}",
            pharmacy.latitude, pharmacy.longitude, pharmacy.name
        );
    }
    output.trim_end().to_string()
}

pub(crate) fn format_toggle(id: &str, now_favorite: bool) -> String {
    if now_favorite {
        format!("★ {id} added to favorites")
    } else {
        format!("{id} removed from favorites")
    }
}

/// `tel:` URI for a phone number, or `None` when there is no number.
pub(crate) fn tel_uri(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("tel:{digits}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pharmacy(id: &str, name: &str, open: &str, close: &str, is_open: bool) -> Pharmacy {
        Pharmacy {
            id: id.to_string(),
            name: name.to_string(),
            phone: "043-221-0001".to_string(),
            address: "충청북도 청주시".to_string(),
            latitude: 36.632_43,
            longitude: 127.490_1,
            distance: 0.0,
            duty_open: open.to_string(),
            duty_close: close.to_string(),
            is_open,
        }
    }

    #[test]
    fn hours_line_for_open_day() {
        let p = pharmacy("A", "온누리약국", "0900", "1900", true);
        assert_eq!(hours_line(&p), "hours 0900~1900");
        assert_eq!(status_label(&p), "open");
    }

    #[test]
    fn hours_line_for_closed_day() {
        let p = pharmacy("A", "온누리약국", "-1", "2400", false);
        assert_eq!(hours_line(&p), "closed today");
        assert_eq!(status_label(&p), "closed");
    }

    #[test]
    fn empty_list_prints_placeholder() {
        assert_eq!(format_list(&[], |_| false, NO_RESULTS), "no pharmacies found");
    }

    #[test]
    fn list_marks_favorites() {
        let a = pharmacy("A", "온누리약국", "0900", "1900", true);
        let b = pharmacy("B", "종로약국", "-1", "2400", false);
        let text = format_list(&[&a, &b], |id| id == "B", NO_RESULTS);

        assert!(text.starts_with("1. 온누리약국\n"));
        assert!(text.contains("2. 종로약국 ★\n"));
        assert!(text.contains("   hours 0900~1900 (open)"));
        assert!(text.ends_with("   closed today (closed)"));
    }

    #[test]
    fn markers_distinguish_open_and_closed() {
        let results = ResultSet {
            generation: 1,
            location: Some(Coordinate::new(36.632_43, 127.490_1)),
            pharmacies: vec![
                pharmacy("A", "온누리약국", "0900", "1900", true),
                pharmacy("B", "종로약국", "0900", "1900", false),
            ],
            ..ResultSet::default()
        };
        let text = format_markers(&results);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "center 36.632430, 127.490100");
        assert!(lines[1].starts_with("[open]"));
        assert!(lines[1].ends_with("온누리약국"));
        assert!(lines[2].starts_with("[closed]"));
    }

    #[test]
    fn markers_for_empty_results() {
        let text = format_markers(&ResultSet::default());
        assert_eq!(text, NO_RESULTS);
    }

    #[test]
    fn json_uses_wire_field_names() {
        let results = ResultSet {
            generation: 3,
            keyword: "약국".to_string(),
            pharmacies: vec![pharmacy("A", "온누리약국", "0900", "1900", true)],
            ..ResultSet::default()
        };
        let value: serde_json::Value = serde_json::from_str(&format_json(&results).unwrap()).unwrap();
        assert_eq!(value["generation"], 3);
        assert_eq!(value["pharmacies"][0]["dutyopen"], "0900");
        assert_eq!(value["pharmacies"][0]["isOpen"], true);
    }

    #[test]
    fn toggle_messages() {
        assert_eq!(format_toggle("A", true), "★ A added to favorites");
        assert_eq!(format_toggle("A", false), "A removed from favorites");
    }

    #[test]
    fn tel_uri_strips_whitespace() {
        assert_eq!(tel_uri("043 221 0001").as_deref(), Some("tel:0432210001"));
        assert_eq!(tel_uri("043-221-0001").as_deref(), Some("tel:043-221-0001"));
        assert_eq!(tel_uri("  "), None);
    }
}
