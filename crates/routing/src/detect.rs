//! Detection chain and shared, memoized detection

use crate::error::RoutingResult;
use crate::strategy::{DetectionSource, DetectionStrategy, IpStrategy, TimezoneStrategy};
use async_trait::async_trait;
use freightsite_core::config::Config;
use freightsite_geo::{CountryInfo, FixedTimezone, HostTimezone, TimezoneSource, default_country};
use freightsite_geoip::{GeoIpClient, GeoIpConfig};
use freightsite_telemetry::metrics;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

/// A resolved country and the strategy that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Detection {
    /// The detected country
    pub country: &'static CountryInfo,
    /// Which strategy answered
    pub source: DetectionSource,
}

impl Detection {
    fn fallback() -> Self {
        Self {
            country: default_country(),
            source: DetectionSource::Default,
        }
    }
}

/// Ordered detection strategies; the first one to answer wins.
///
/// Resolution never fails: when every strategy declines, the default region
/// is returned with [`DetectionSource::Default`].
#[derive(Default)]
pub struct DetectionChain {
    strategies: Vec<Box<dyn DetectionStrategy>>,
}

impl DetectionChain {
    /// An empty chain, which always resolves to the default region
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy to the end of the chain
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl DetectionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// The standard chain: IP lookup (when enabled), then timezone.
    ///
    /// A configured timezone override replaces the host's zone.
    pub fn from_config(config: &Config) -> RoutingResult<Self> {
        let schema = &config.schema;
        let mut chain = Self::new();

        if schema.geolocation.enabled {
            let client = GeoIpClient::with_config(GeoIpConfig::from(&schema.geolocation))?;
            chain = chain.with_strategy(IpStrategy::new(client));
        }

        chain = match schema.timezone.override_zone {
            Some(ref tz) => chain.with_strategy(TimezoneStrategy::new(FixedTimezone::new(tz))),
            None => chain.with_strategy(TimezoneStrategy::new(HostTimezone)),
        };

        Ok(chain)
    }

    /// Sources in evaluation order
    pub fn sources(&self) -> Vec<DetectionSource> {
        self.strategies.iter().map(|s| s.source()).collect()
    }

    /// Run the strategies in order and return the first answer.
    #[instrument(skip(self), fields(strategies = self.strategies.len()))]
    pub async fn resolve(&self) -> Detection {
        let mut detection = Detection::fallback();

        for strategy in &self.strategies {
            if let Some(country) = strategy.detect().await {
                detection = Detection {
                    country,
                    source: strategy.source(),
                };
                break;
            }
            debug!(source = %strategy.source(), "Strategy declined");
        }

        metrics().increment(&format!("detection.{}", detection.source));
        debug!(
            country = detection.country.code,
            source = %detection.source,
            "Country detected"
        );
        detection
    }
}

/// Detect the visitor's country by IP, falling back to `timezone`, then to
/// the default region.
pub async fn detect_country_by_ip(
    client: GeoIpClient,
    timezone: impl TimezoneSource + 'static,
) -> &'static CountryInfo {
    DetectionChain::new()
        .with_strategy(IpStrategy::new(client))
        .with_strategy(TimezoneStrategy::new(timezone))
        .resolve()
        .await
        .country
}

/// Anything that can produce the visitor's country for the redirect controller.
#[async_trait]
pub trait CountryResolver: Send + Sync {
    /// Resolve the country
    async fn resolve_country(&self) -> RoutingResult<&'static CountryInfo>;
}

#[async_trait]
impl CountryResolver for DetectionChain {
    async fn resolve_country(&self) -> RoutingResult<&'static CountryInfo> {
        Ok(self.resolve().await.country)
    }
}

/// A detection chain resolved at most once and shared between callers.
///
/// Clones share the same result. Concurrent callers wait on the single
/// in-flight resolution instead of issuing their own lookups.
#[derive(Clone)]
pub struct SharedDetection {
    inner: Arc<SharedInner>,
}

struct SharedInner {
    chain: DetectionChain,
    cell: OnceCell<Detection>,
}

impl SharedDetection {
    /// Wrap `chain`; nothing runs until the first [`get`](Self::get)
    pub fn new(chain: DetectionChain) -> Self {
        Self {
            inner: Arc::new(SharedInner {
                chain,
                cell: OnceCell::new(),
            }),
        }
    }

    /// The session's detection, resolving it on first use
    pub async fn get(&self) -> Detection {
        *self
            .inner
            .cell
            .get_or_init(|| self.inner.chain.resolve())
            .await
    }

    /// The detection if it has already been resolved
    pub fn peek(&self) -> Option<Detection> {
        self.inner.cell.get().copied()
    }
}

#[async_trait]
impl CountryResolver for SharedDetection {
    async fn resolve_country(&self) -> RoutingResult<&'static CountryInfo> {
        Ok(self.get().await.country)
    }
}
