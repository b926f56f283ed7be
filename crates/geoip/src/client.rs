//! Geolocation client implementation

use crate::config::GeoIpConfig;
use crate::error::{GeoIpError, GeoIpResult};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Outcome of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoIpLookup {
    /// Upper-cased two-letter country code
    pub country_code: String,
}

/// Client for the IP geolocation endpoint.
///
/// Each call to [`lookup`](Self::lookup) issues exactly one request. There
/// is no retry, circuit breaker or caching here; sharing a result across
/// callers is the job of the routing layer.
#[derive(Clone)]
pub struct GeoIpClient {
    inner: Client,
    config: Arc<GeoIpConfig>,
}

impl GeoIpClient {
    /// Create a client for the default endpoint
    pub fn new() -> GeoIpResult<Self> {
        Self::with_config(GeoIpConfig::default())
    }

    /// Create a client with specific configuration
    pub fn with_config(config: GeoIpConfig) -> GeoIpResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("freightsite-geoip/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(GeoIpError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &GeoIpConfig {
        &self.config
    }

    /// Get the endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Look up the caller's country.
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint, request_id))]
    pub async fn lookup(&self) -> GeoIpResult<GeoIpLookup> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let start = Instant::now();
        let result = self.execute(&request_id).await;
        let elapsed = start.elapsed();

        match result {
            Ok(country_code) => {
                debug!(
                    country_code = %country_code,
                    elapsed_ms = elapsed.as_millis(),
                    "Geolocation lookup succeeded"
                );
                Ok(GeoIpLookup { country_code })
            }
            Err(e) => {
                warn!(
                    error = %e,
                    timeout = e.is_timeout(),
                    unavailable = e.is_unavailable(),
                    elapsed_ms = elapsed.as_millis(),
                    "Geolocation lookup failed"
                );
                Err(e)
            }
        }
    }

    async fn execute(&self, request_id: &str) -> GeoIpResult<String> {
        let response = self
            .inner
            .get(&self.config.endpoint)
            .header(X_REQUEST_ID, request_id)
            .send()
            .await?;

        let body = self.handle_response(response).await?;
        parse_country_code(&body, &self.config.country_field)
    }

    /// Check the status and return the body text
    async fn handle_response(&self, response: Response) -> GeoIpResult<String> {
        let status = response.status();

        if status.is_success() {
            response.text().await.map_err(GeoIpError::Request)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(GeoIpError::api_response(status.as_u16(), message))
        }
    }
}

/// Extract the country code from a geolocation response body.
///
/// Some providers answer rate-limited or reserved-range requests with a 200
/// and `{"error": true, "reason": "..."}`; that is reported as an API error.
pub fn parse_country_code(body: &str, field: &str) -> GeoIpResult<String> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if value.get("error").and_then(serde_json::Value::as_bool) == Some(true) {
        let reason = value
            .get("reason")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unspecified");
        return Err(GeoIpError::api_response(200, reason));
    }

    let raw = value
        .get(field)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| GeoIpError::MissingField(field.to_string()))?;

    let code = raw.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GeoIpError::InvalidCountryCode(raw.to_string()));
    }

    Ok(code.to_ascii_uppercase())
}
