use std::path::PathBuf;

use crate::pharmacy::Coordinate;

/// Whether the user has granted the app access to the device location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPermission {
    Granted,
    Denied,
}

impl std::fmt::Display for LocationPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationPermission::Granted => write!(f, "granted"),
            LocationPermission::Denied => write!(f, "denied"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub regions_path: PathBuf,
    pub favorites_path: PathBuf,
    /// Last known device position, when the environment provides one.
    pub device_position: Option<Coordinate>,
    pub location_permission: LocationPermission,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("regions_path", &self.regions_path)
            .field("favorites_path", &self.favorites_path)
            .field(
                "device_position",
                &self.device_position.as_ref().map(|_| "[redacted]"),
            )
            .field("location_permission", &self.location_permission)
            .finish()
    }
}
