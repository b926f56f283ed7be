//! Configuration schema definitions
//!
//! Shared configuration types for the detection and routing crates.

use freightsite_geo::PathMatching;
use serde::{Deserialize, Serialize};

/// Geolocation endpoint used when none is configured.
pub const DEFAULT_GEOIP_ENDPOINT: &str = "https://ipapi.co/json/";

/// JSON field holding the two-letter country code in the endpoint's response.
pub const DEFAULT_COUNTRY_FIELD: &str = "country_code";

/// Path prefixes that are never redirected away from.
pub const DEFAULT_GLOBAL_PATHS: &[&str] = &["/login", "/signup", "/blog", "/contact", "/services"];

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// IP lookup settings
    #[serde(default)]
    pub geolocation: GeolocationConfig,

    /// Timezone fallback settings
    #[serde(default)]
    pub timezone: TimezoneConfig,

    /// Redirect and link settings
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// IP geolocation lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Run the IP lookup; when false, detection starts at the timezone
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lookup endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Response field carrying the country code
    #[serde(default = "default_country_field")]
    pub country_field: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            country_field: default_country_field(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_GEOIP_ENDPOINT.to_string()
}

fn default_country_field() -> String {
    DEFAULT_COUNTRY_FIELD.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

/// Timezone detection configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimezoneConfig {
    /// Use this IANA zone instead of asking the host
    #[serde(default, rename = "override")]
    pub override_zone: Option<String>,
}

/// Redirect and link-building configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// How country slugs are matched in paths
    #[serde(default)]
    pub path_matching: PathMatching,

    /// Path prefixes exempt from the landing redirect
    #[serde(default = "default_global_paths")]
    pub global_paths: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            path_matching: PathMatching::default(),
            global_paths: default_global_paths(),
        }
    }
}

fn default_global_paths() -> Vec<String> {
    DEFAULT_GLOBAL_PATHS.iter().map(|p| p.to_string()).collect()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
