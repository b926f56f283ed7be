//! Configuration for the geolocation client

use crate::error::{GeoIpError, GeoIpResult};
use freightsite_core::config::{
    DEFAULT_COUNTRY_FIELD, DEFAULT_GEOIP_ENDPOINT, GeolocationConfig,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoIpConfig {
    /// Lookup endpoint (GET, JSON response)
    pub endpoint: String,
    /// Response field carrying the two-letter country code
    pub country_field: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOIP_ENDPOINT.to_string(),
            country_field: DEFAULT_COUNTRY_FIELD.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl From<&GeolocationConfig> for GeoIpConfig {
    fn from(schema: &GeolocationConfig) -> Self {
        Self {
            endpoint: schema.endpoint.clone(),
            country_field: schema.country_field.clone(),
            timeout: Duration::from_secs(schema.timeout_secs),
        }
    }
}

impl GeoIpConfig {
    /// Builder-style method to set the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Builder-style method to set the country field name
    #[must_use]
    pub fn with_country_field(mut self, field: impl Into<String>) -> Self {
        self.country_field = field.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> GeoIpResult<()> {
        if self.endpoint.is_empty() {
            return Err(GeoIpError::config("endpoint cannot be empty"));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(GeoIpError::config("endpoint must start with http:// or https://"));
        }

        if self.country_field.is_empty() {
            return Err(GeoIpError::config("country_field cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(GeoIpError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeoIpConfig::default();
        assert_eq!(config.endpoint, "https://ipapi.co/json/");
        assert_eq!(config.country_field, "country_code");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_schema() {
        let schema = GeolocationConfig {
            enabled: true,
            endpoint: "https://ipinfo.io/json".to_string(),
            country_field: "country".to_string(),
            timeout_secs: 3,
        };
        let config = GeoIpConfig::from(&schema);
        assert_eq!(config.endpoint, "https://ipinfo.io/json");
        assert_eq!(config.country_field, "country");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_validation() {
        assert!(GeoIpConfig::default().with_endpoint("").validate().is_err());
        assert!(GeoIpConfig::default().with_endpoint("ipapi.co/json").validate().is_err());
        assert!(GeoIpConfig::default().with_country_field("").validate().is_err());
        assert!(
            GeoIpConfig::default()
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }
}
