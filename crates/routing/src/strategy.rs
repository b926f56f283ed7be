//! Country detection strategies
//!
//! A strategy either names a country or declines. Failures (network errors,
//! unmapped codes, a host without a timezone) are declines, never errors.

use async_trait::async_trait;
use freightsite_geo::{CountryInfo, TimezoneSource, country_for_timezone, lookup_by_code};
use freightsite_geoip::GeoIpClient;
use freightsite_telemetry::Timer;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Where a detected country came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    /// IP geolocation lookup
    Ip,
    /// Host timezone
    Timezone,
    /// No strategy answered
    Default,
}

impl DetectionSource {
    /// Stable lowercase name, used for metrics and output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Timezone => "timezone",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the detection chain.
#[async_trait]
pub trait DetectionStrategy: Send + Sync {
    /// Which source this strategy reports as
    fn source(&self) -> DetectionSource;

    /// The detected country, or `None` to let the next strategy try
    async fn detect(&self) -> Option<&'static CountryInfo>;
}

/// Detects the country with one IP geolocation request.
#[derive(Clone)]
pub struct IpStrategy {
    client: GeoIpClient,
}

impl IpStrategy {
    /// Create a strategy backed by `client`
    pub fn new(client: GeoIpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DetectionStrategy for IpStrategy {
    fn source(&self) -> DetectionSource {
        DetectionSource::Ip
    }

    async fn detect(&self) -> Option<&'static CountryInfo> {
        let timer = Timer::start("geoip.lookup_ms");
        let lookup = self.client.lookup().await.ok()?;
        timer.stop();

        let country = lookup_by_code(&lookup.country_code);
        if country.is_none() {
            debug!(country_code = %lookup.country_code, "Geolocated country has no site");
        }
        country
    }
}

/// Detects the country from a timezone source.
///
/// Declines on unmapped zones so the chain's default applies.
pub struct TimezoneStrategy {
    source: Box<dyn TimezoneSource>,
}

impl TimezoneStrategy {
    /// Create a strategy reading from `source`
    pub fn new(source: impl TimezoneSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

#[async_trait]
impl DetectionStrategy for TimezoneStrategy {
    fn source(&self) -> DetectionSource {
        DetectionSource::Timezone
    }

    async fn detect(&self) -> Option<&'static CountryInfo> {
        let Some(tz) = self.source.resolved_timezone() else {
            debug!("Host timezone unavailable");
            return None;
        };

        let country = country_for_timezone(&tz);
        if country.is_none() {
            debug!(timezone = %tz, "Timezone has no site");
        }
        country
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freightsite_geo::FixedTimezone;

    #[tokio::test]
    async fn test_timezone_strategy() {
        let strategy = TimezoneStrategy::new(FixedTimezone::new("Asia/Colombo"));
        assert_eq!(strategy.detect().await.unwrap().code, "LK");
        assert_eq!(strategy.source(), DetectionSource::Timezone);
    }

    #[tokio::test]
    async fn test_timezone_strategy_declines() {
        let unmapped = TimezoneStrategy::new(FixedTimezone::new("America/Chicago"));
        assert!(unmapped.detect().await.is_none());
        let unavailable = TimezoneStrategy::new(FixedTimezone::unavailable());
        assert!(unavailable.detect().await.is_none());
    }

    #[test]
    fn test_source_names() {
        assert_eq!(DetectionSource::Ip.to_string(), "ip");
        assert_eq!(DetectionSource::Default.as_str(), "default");
    }
}
