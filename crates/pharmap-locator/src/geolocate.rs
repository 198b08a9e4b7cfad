//! Device position source.

use std::future::Future;

use pharmap_core::{AppConfig, Coordinate, LocationPermission};

use crate::error::GeolocationError;

/// Obtains the device's current coordinates.
///
/// Implementations must not retry or substitute a fallback position; a
/// failure is reported to the caller as-is.
pub trait Geolocator: Send + Sync {
    fn current_position(&self)
        -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// Position taken from configuration, gated by the configured permission.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredGeolocator {
    permission: LocationPermission,
    position: Option<Coordinate>,
}

impl ConfiguredGeolocator {
    #[must_use]
    pub const fn new(permission: LocationPermission, position: Option<Coordinate>) -> Self {
        Self {
            permission,
            position,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.location_permission, config.device_position)
    }

    /// Same permission, explicit position.
    #[must_use]
    pub const fn with_position(self, position: Coordinate) -> Self {
        Self::new(self.permission, Some(position))
    }
}

impl Geolocator for ConfiguredGeolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        match (self.permission, self.position) {
            (LocationPermission::Denied, _) => Err(GeolocationError::PermissionDenied),
            (LocationPermission::Granted, Some(position)) => Ok(position),
            (LocationPermission::Granted, None) => Err(GeolocationError::Unavailable(
                "no device position configured".to_string(),
            )),
        }
    }
}
