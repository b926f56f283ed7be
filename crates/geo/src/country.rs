//! Static country registry.
//!
//! The table is defined once and never mutated. Exactly one entry is the
//! default region; every resolver converges on it when it has nothing
//! better to go on.

use crate::error::{GeoError, Result};
use serde::Serialize;

/// A country the site has dedicated pages for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CountryInfo {
    /// Two-letter ISO 3166-1 alpha-2 code
    pub code: &'static str,
    /// Display name
    pub name: &'static str,
    /// Landing route for visitors from this country
    pub route: &'static str,
    /// Canonical IANA timezone
    pub timezone: Option<&'static str>,
}

/// Index of the default region in [`COUNTRIES`].
const DEFAULT_INDEX: usize = 0;

/// All supported countries, in path-matching order after the default.
pub static COUNTRIES: [CountryInfo; 6] = [
    CountryInfo {
        code: "SG",
        name: "Singapore",
        route: "/",
        timezone: Some("Asia/Singapore"),
    },
    CountryInfo {
        code: "IN",
        name: "India",
        route: "/india/home",
        timezone: Some("Asia/Kolkata"),
    },
    CountryInfo {
        code: "MY",
        name: "Malaysia",
        route: "/malaysia/home",
        timezone: Some("Asia/Kuala_Lumpur"),
    },
    CountryInfo {
        code: "ID",
        name: "Indonesia",
        route: "/indonesia/home",
        timezone: Some("Asia/Jakarta"),
    },
    CountryInfo {
        code: "TH",
        name: "Thailand",
        route: "/thailand/home",
        timezone: Some("Asia/Bangkok"),
    },
    CountryInfo {
        code: "LK",
        name: "Sri Lanka",
        route: "/sri-lanka/home",
        timezone: Some("Asia/Colombo"),
    },
];

impl CountryInfo {
    /// URL slug: the name lowercased, spaces replaced with hyphens.
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "-")
    }

    /// The slug as a leading path segment, e.g. `/sri-lanka`.
    pub fn path_segment(&self) -> String {
        format!("/{}", self.slug())
    }

    /// Returns true for the default region.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.code == COUNTRIES[DEFAULT_INDEX].code
    }

    /// Looks up a code, failing with [`GeoError::UnknownCountry`] when unmapped.
    pub fn from_code(code: &str) -> Result<&'static CountryInfo> {
        lookup_by_code(code).ok_or_else(|| GeoError::UnknownCountry(code.to_string()))
    }
}

/// The default ("no country match") region.
#[inline]
pub fn default_country() -> &'static CountryInfo {
    &COUNTRIES[DEFAULT_INDEX]
}

/// Every registered country, in declaration order.
pub fn all() -> &'static [CountryInfo] {
    &COUNTRIES
}

/// Case-insensitive lookup by two-letter code.
pub fn lookup_by_code(code: &str) -> Option<&'static CountryInfo> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Lookup by URL slug (`sri-lanka`, `india`, ...).
pub fn lookup_by_slug(slug: &str) -> Option<&'static CountryInfo> {
    COUNTRIES.iter().find(|c| c.slug() == slug)
}

/// Countries other than the default, in matching order.
pub(crate) fn scoped_countries() -> impl Iterator<Item = &'static CountryInfo> {
    COUNTRIES.iter().filter(|c| !c.is_default())
}
