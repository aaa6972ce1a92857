//! Error types for scan processing, backend access and export

use gs1scan_core::Gs1Error;

/// Errors raised by the collaborators around the decoder
///
/// Decoding itself never fails; these cover the backend API, the record
/// stores, CSV export and GS1 re-encoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Backend answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// Request never produced a usable response
    #[error("Network error: {0}")]
    Network(String),
    /// JSON payload did not have the expected shape
    #[cfg(feature = "serde")]
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("GS1 encoding error: {0}")]
    Encode(#[from] Gs1Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status carried by the error, 0 when no response was received
    pub fn status(&self) -> u16 {
        match self {
            Error::Api { status, .. } => *status,
            _ => 0,
        }
    }
}

/// Result type for scan processing operations
pub type Result<T> = std::result::Result<T, Error>;
