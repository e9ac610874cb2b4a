//! Error types for callweave-core

use thiserror::Error;

/// Main error type for the callweave-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// OAuth/token error
    #[error("authentication error: {0}")]
    Auth(String),

    /// Zoom API error (non-success response, malformed payload)
    #[error("API error: {0}")]
    Api(String),

    /// Call path resolution failed for a single record.
    ///
    /// Recovered locally by the resolver: the record keeps its masked
    /// caller fields and the failure is surfaced alongside the results.
    #[error("call path resolution failed for record {record_id}: {message}")]
    Resolution { record_id: String, message: String },

    /// Malformed overall input (fatal, no report is produced)
    #[error("invalid input: {0}")]
    Input(String),
}

/// Result type alias for callweave-core
pub type Result<T> = std::result::Result<T, Error>;
