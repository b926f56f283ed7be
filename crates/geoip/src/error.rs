//! Error types for the geolocation client

use thiserror::Error;

/// Result type alias for lookup operations
pub type GeoIpResult<T> = Result<T, GeoIpError>;

/// Geolocation lookup errors
#[derive(Error, Debug)]
pub enum GeoIpError {
    /// HTTP request failed (connection refused, DNS, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Endpoint returned a non-success status or an error payload
    #[error("Geolocation API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from the endpoint
        message: String,
    },

    /// Response did not contain the country field
    #[error("Response has no string field '{0}'")]
    MissingField(String),

    /// Country field was present but not a two-letter code
    #[error("Invalid country code: {0:?}")]
    InvalidCountryCode(String),
}

/// Error code for integration with freightsite-core error handling.
/// Range: 11xxx for geolocation errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoIpErrorCode {
    /// Transport failure
    Request = 11001,
    /// Unparsable body
    Json = 11002,
    /// Bad configuration
    Config = 11003,
    /// Non-success response
    ApiResponse = 11004,
    /// Country field missing
    MissingField = 11005,
    /// Country field malformed
    InvalidCountryCode = 11006,
}

impl GeoIpError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Returns the error code for this error
    #[must_use]
    pub fn code(&self) -> GeoIpErrorCode {
        match self {
            Self::Request(_) => GeoIpErrorCode::Request,
            Self::Json(_) => GeoIpErrorCode::Json,
            Self::Config(_) => GeoIpErrorCode::Config,
            Self::ApiResponse { .. } => GeoIpErrorCode::ApiResponse,
            Self::MissingField(_) => GeoIpErrorCode::MissingField,
            Self::InvalidCountryCode(_) => GeoIpErrorCode::InvalidCountryCode,
        }
    }

    /// Check if the request timed out
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }

    /// Check if the endpoint could not be reached, was rate limited or
    /// answered with a 5xx.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
