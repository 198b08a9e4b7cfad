use thiserror::Error;

/// Dataset could not be loaded. Always fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset {path} has unexpected shape: {reason}")]
    Shape { path: String, reason: String },

    #[error("record #{index} in {path} does not match the pharmacy schema: {source}")]
    Record {
        path: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {record_id} in {path}: invalid {field} \"{value}\": {reason}")]
    InvalidField {
        path: String,
        record_id: String,
        field: String,
        value: String,
        reason: String,
    },
}
