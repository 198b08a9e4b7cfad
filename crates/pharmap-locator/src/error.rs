use thiserror::Error;

/// The device position could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("permission to access location was denied")]
    PermissionDenied,

    #[error("current location is unavailable: {0}")]
    Unavailable(String),
}

/// A refresh failed before anything was published.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),
}

/// Reading or writing persisted favorites failed.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("favorites storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for {key} is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
