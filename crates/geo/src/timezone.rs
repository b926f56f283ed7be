//! Timezone-based country resolution.
//!
//! Maps the host's resolved IANA timezone to a registry entry. Unmapped
//! zones and hosts that cannot report a zone both resolve to the default
//! region.

use crate::country::{CountryInfo, default_country, lookup_by_code};

/// IANA zone to country code. Includes legacy aliases still reported by
/// some hosts (`Asia/Calcutta`).
static TIMEZONE_COUNTRIES: &[(&str, &str)] = &[
    ("Asia/Singapore", "SG"),
    ("Singapore", "SG"),
    ("Asia/Kolkata", "IN"),
    ("Asia/Calcutta", "IN"),
    ("Asia/Kuala_Lumpur", "MY"),
    ("Asia/Kuching", "MY"),
    ("Asia/Jakarta", "ID"),
    ("Asia/Pontianak", "ID"),
    ("Asia/Makassar", "ID"),
    ("Asia/Jayapura", "ID"),
    ("Asia/Bangkok", "TH"),
    ("Asia/Colombo", "LK"),
];

/// Provides the resolved IANA timezone of the host.
pub trait TimezoneSource: Send + Sync {
    /// The resolved zone, or `None` when the host cannot report one.
    fn resolved_timezone(&self) -> Option<String>;
}

/// Reads the timezone configured on the host (or the browser under WASM).
#[derive(Debug, Clone, Copy, Default)]
pub struct HostTimezone;

impl TimezoneSource for HostTimezone {
    fn resolved_timezone(&self) -> Option<String> {
        iana_time_zone::get_timezone().ok()
    }
}

/// A fixed timezone, used for configuration overrides and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedTimezone(Option<String>);

impl FixedTimezone {
    /// A source that always reports `tz`.
    pub fn new(tz: impl Into<String>) -> Self {
        Self(Some(tz.into()))
    }

    /// A source that behaves like a host whose timezone API failed.
    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl TimezoneSource for FixedTimezone {
    fn resolved_timezone(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Looks up the country for an IANA zone name.
pub fn country_for_timezone(tz: &str) -> Option<&'static CountryInfo> {
    TIMEZONE_COUNTRIES
        .iter()
        .find(|(zone, _)| *zone == tz)
        .and_then(|(_, code)| lookup_by_code(code))
}

/// Resolves a country from the source's timezone, falling back to the
/// default region.
pub fn detect_country_by_timezone(source: &dyn TimezoneSource) -> &'static CountryInfo {
    source
        .resolved_timezone()
        .and_then(|tz| country_for_timezone(&tz))
        .unwrap_or_else(default_country)
}
