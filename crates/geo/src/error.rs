//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Country code not in the registry
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),

    /// Base path for a navigation link is malformed
    #[error("Invalid base path: {0}")]
    InvalidPath(String),
}

/// Error code for integration with freightsite-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Country code not in the registry
    UnknownCountry = 10001,
    /// Malformed base path
    InvalidPath = 10002,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::UnknownCountry(_) => GeoErrorCode::UnknownCountry,
            GeoError::InvalidPath(_) => GeoErrorCode::InvalidPath,
        }
    }
}
