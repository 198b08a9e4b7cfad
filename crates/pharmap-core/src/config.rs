use crate::app_config::{AppConfig, LocationPermission};
use crate::pharmacy::Coordinate;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_degrees = |var: &str, raw: &str| -> Result<f64, ConfigError> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be a finite number of degrees".to_string(),
            })
        }
    };

    let log_level = or_default("PHARMAP_LOG_LEVEL", "info");
    let regions_path = PathBuf::from(or_default("PHARMAP_REGIONS_PATH", "./config/regions.yaml"));
    let favorites_path =
        PathBuf::from(or_default("PHARMAP_FAVORITES_PATH", "./data/favorites.json"));

    let device_position = match (lookup("PHARMAP_LATITUDE"), lookup("PHARMAP_LONGITUDE")) {
        (Ok(lat), Ok(lon)) => Some(Coordinate::new(
            parse_degrees("PHARMAP_LATITUDE", &lat)?,
            parse_degrees("PHARMAP_LONGITUDE", &lon)?,
        )),
        (Err(_), Err(_)) => None,
        (Ok(_), Err(_)) => return Err(ConfigError::MissingEnvVar("PHARMAP_LONGITUDE".into())),
        (Err(_), Ok(_)) => return Err(ConfigError::MissingEnvVar("PHARMAP_LATITUDE".into())),
    };

    let location_permission =
        parse_location_permission(&or_default("PHARMAP_LOCATION_PERMISSION", "granted"))?;

    Ok(AppConfig {
        log_level,
        regions_path,
        favorites_path,
        device_position,
        location_permission,
    })
}

/// Parse a string into a `LocationPermission` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the value is not `granted` or `denied`.
fn parse_location_permission(s: &str) -> Result<LocationPermission, ConfigError> {
    match s.trim() {
        "granted" => Ok(LocationPermission::Granted),
        "denied" => Ok(LocationPermission::Denied),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PHARMAP_LOCATION_PERMISSION".to_string(),
            reason: format!("expected 'granted' or 'denied', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
