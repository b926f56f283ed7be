//! Country-aware navigation links.

use crate::country::CountryInfo;
use crate::error::{GeoError, Result};
use crate::path::{PathMatching, resolve_by_path};

/// Prefixes `base` with the country's slug, unless the country is the
/// default region.
///
/// `base` is expected to start with `/`; see [`validate_base_path`].
pub fn nav_link(base: &str, country: &CountryInfo) -> String {
    if country.is_default() {
        base.to_string()
    } else {
        format!("{}{}", country.path_segment(), base)
    }
}

/// Builds a link for `base` scoped to whatever country `current_path` is under.
pub fn nav_link_for_path(base: &str, current_path: &str, matching: PathMatching) -> String {
    nav_link(base, resolve_by_path(current_path, matching))
}

/// Checks that `base` is an absolute site path.
pub fn validate_base_path(base: &str) -> Result<()> {
    if !base.starts_with('/') {
        return Err(GeoError::InvalidPath(format!("{base} must start with '/'")));
    }
    if base.starts_with("//") {
        return Err(GeoError::InvalidPath(format!("{base} is protocol-relative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::{default_country, lookup_by_code};

    #[test]
    fn test_default_country_leaves_link_unchanged() {
        assert_eq!(nav_link("/about-us", default_country()), "/about-us");
    }

    #[test]
    fn test_country_prefix() {
        let my = lookup_by_code("MY").unwrap();
        assert_eq!(nav_link("/about-us", my), "/malaysia/about-us");
    }

    #[test]
    fn test_multi_word_name_is_hyphenated() {
        let lk = lookup_by_code("LK").unwrap();
        assert_eq!(nav_link("/contact", lk), "/sri-lanka/contact");
    }

    #[test]
    fn test_link_for_current_path() {
        assert_eq!(
            nav_link_for_path("/services", "/india/home", PathMatching::Contains),
            "/india/services"
        );
        assert_eq!(
            nav_link_for_path("/services", "/blog/post-1", PathMatching::Contains),
            "/services"
        );
    }

    #[test]
    fn test_validate_base_path() {
        assert!(validate_base_path("/about-us").is_ok());
        assert!(validate_base_path("about-us").is_err());
        assert!(validate_base_path("//evil.example").is_err());
    }
}
