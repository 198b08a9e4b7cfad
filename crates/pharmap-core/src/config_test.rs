use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_location_permission_granted() {
    assert_eq!(
        parse_location_permission("granted").unwrap(),
        LocationPermission::Granted
    );
}

#[test]
fn parse_location_permission_denied() {
    assert_eq!(
        parse_location_permission("denied").unwrap(),
        LocationPermission::Denied
    );
}

#[test]
fn parse_location_permission_unknown_fails() {
    let err = parse_location_permission("maybe").unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PHARMAP_LOCATION_PERMISSION")
    );
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.regions_path.to_str(), Some("./config/regions.yaml"));
    assert_eq!(cfg.favorites_path.to_str(), Some("./data/favorites.json"));
    assert!(cfg.device_position.is_none());
    assert_eq!(cfg.location_permission, LocationPermission::Granted);
}

#[test]
fn build_app_config_reads_device_position() {
    let mut map = HashMap::new();
    map.insert("PHARMAP_LATITUDE", "36.63243");
    map.insert("PHARMAP_LONGITUDE", " 127.4901 ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let position = cfg.device_position.expect("position should be set");
    assert!((position.latitude - 36.632_43).abs() < 1e-9);
    assert!((position.longitude - 127.490_1).abs() < 1e-9);
}

#[test]
fn build_app_config_requires_both_coordinates() {
    let mut map = HashMap::new();
    map.insert("PHARMAP_LATITUDE", "36.63243");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "PHARMAP_LONGITUDE"),
        "expected MissingEnvVar(PHARMAP_LONGITUDE), got: {result:?}"
    );

    let mut map = HashMap::new();
    map.insert("PHARMAP_LONGITUDE", "127.4901");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "PHARMAP_LATITUDE"),
        "expected MissingEnvVar(PHARMAP_LATITUDE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_latitude() {
    let mut map = HashMap::new();
    map.insert("PHARMAP_LATITUDE", "north");
    map.insert("PHARMAP_LONGITUDE", "127.4901");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PHARMAP_LATITUDE"),
        "expected InvalidEnvVar(PHARMAP_LATITUDE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_finite_longitude() {
    let mut map = HashMap::new();
    map.insert("PHARMAP_LATITUDE", "36.6");
    map.insert("PHARMAP_LONGITUDE", "NaN");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PHARMAP_LONGITUDE"),
        "expected InvalidEnvVar(PHARMAP_LONGITUDE), got: {result:?}"
    );
}

#[test]
fn build_app_config_overrides_paths_and_permission() {
    let mut map = HashMap::new();
    map.insert("PHARMAP_REGIONS_PATH", "/etc/pharmap/regions.yaml");
    map.insert("PHARMAP_FAVORITES_PATH", "/var/lib/pharmap/favorites.json");
    map.insert("PHARMAP_LOCATION_PERMISSION", "denied");
    map.insert("PHARMAP_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.regions_path.to_str(), Some("/etc/pharmap/regions.yaml"));
    assert_eq!(
        cfg.favorites_path.to_str(),
        Some("/var/lib/pharmap/favorites.json")
    );
    assert_eq!(cfg.location_permission, LocationPermission::Denied);
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn debug_output_redacts_device_position() {
    let mut map = HashMap::new();
    map.insert("PHARMAP_LATITUDE", "36.63243");
    map.insert("PHARMAP_LONGITUDE", "127.4901");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("[redacted]"));
    assert!(!rendered.contains("36.63243"));
}
