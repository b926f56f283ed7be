//! Error types for the routing crate.

use thiserror::Error;

/// Result type alias for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

/// Errors raised while building or running the detection flow.
///
/// Detection itself never fails; these surface only from construction and
/// from custom [`CountryResolver`](crate::CountryResolver) implementations.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Geolocation client could not be built
    #[error("Geolocation client error: {0}")]
    GeoIp(#[from] freightsite_geoip::GeoIpError),

    /// A resolver failed to produce a country
    #[error("Country resolution failed: {0}")]
    Resolver(String),
}

/// Error code for integration with freightsite-core error handling.
/// Range: 12xxx for routing errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingErrorCode {
    /// Geolocation client error
    GeoIp = 12001,
    /// Resolver failure
    Resolver = 12002,
}

impl RoutingError {
    /// Create a resolver error
    pub fn resolver(msg: impl Into<String>) -> Self {
        Self::Resolver(msg.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> RoutingErrorCode {
        match self {
            RoutingError::GeoIp(_) => RoutingErrorCode::GeoIp,
            RoutingError::Resolver(_) => RoutingErrorCode::Resolver,
        }
    }
}
