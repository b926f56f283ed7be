//! Country detection primitives for the freightsite web app.
//!
//! This crate provides:
//! - The static country registry (code, display name, landing route, timezone)
//! - Timezone to country resolution with a default-region fallback
//! - URL path to country resolution
//! - Country-aware navigation link building
//! - WASM bindings for browser usage
//!
//! Everything here is synchronous and free of network I/O. The IP lookup and
//! the redirect flow live in `freightsite-geoip` and `freightsite-routing`.
//!
//! # Example
//!
//! ```
//! use freightsite_geo::{nav_link, resolve_by_path, PathMatching};
//!
//! let country = resolve_by_path("/malaysia/services", PathMatching::Contains);
//! assert_eq!(country.code, "MY");
//! assert_eq!(nav_link("/about-us", country), "/malaysia/about-us");
//! ```

pub mod country;
mod error;
mod nav;
mod path;
pub mod timezone;

#[cfg(feature = "wasm")]
mod wasm;

pub use country::{CountryInfo, COUNTRIES, all, default_country, lookup_by_code, lookup_by_slug};
pub use error::{GeoError, GeoErrorCode, Result};
pub use nav::{nav_link, nav_link_for_path, validate_base_path};
pub use path::{PathMatching, is_country_scoped, match_country, resolve_by_path};
pub use timezone::{
    FixedTimezone, HostTimezone, TimezoneSource, country_for_timezone, detect_country_by_timezone,
};
