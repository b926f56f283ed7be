//! URL path to country resolution.
//!
//! Country pages live under `/<slug>/...`. The deployed site matched slugs
//! by substring containment, so `/thailand-office` counts as Thailand;
//! [`PathMatching::Segment`] tightens this to whole path segments.

use crate::country::{CountryInfo, default_country, scoped_countries};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a country slug is matched against a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatching {
    /// Case-sensitive substring containment of `/<slug>`
    #[default]
    #[serde(alias = "substring", alias = "loose")]
    Contains,
    /// Exact equality with one `/`-delimited segment
    #[serde(alias = "exact", alias = "strict")]
    Segment,
}

impl PathMatching {
    fn matches(self, path: &str, country: &CountryInfo) -> bool {
        match self {
            Self::Contains => path.contains(&country.path_segment()),
            Self::Segment => {
                let slug = country.slug();
                path.split('/').any(|segment| segment == slug)
            }
        }
    }
}

impl FromStr for PathMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contains" | "substring" | "loose" => Ok(Self::Contains),
            "segment" | "exact" | "strict" => Ok(Self::Segment),
            other => Err(format!("unknown path matching mode: {other}")),
        }
    }
}

impl fmt::Display for PathMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains => write!(f, "contains"),
            Self::Segment => write!(f, "segment"),
        }
    }
}

/// The first country whose slug matches `path`, in registry order.
pub fn match_country(path: &str, matching: PathMatching) -> Option<&'static CountryInfo> {
    scoped_countries().find(|country| matching.matches(path, country))
}

/// Resolves the country for `path`, or the default region when no slug matches.
pub fn resolve_by_path(path: &str, matching: PathMatching) -> &'static CountryInfo {
    match_country(path, matching).unwrap_or_else(default_country)
}

/// Returns true if `path` already sits under a country slug.
pub fn is_country_scoped(path: &str, matching: PathMatching) -> bool {
    match_country(path, matching).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::COUNTRIES;
    use proptest::prelude::*;

    #[test]
    fn test_every_route_resolves_to_its_country() {
        for country in &COUNTRIES {
            for matching in [PathMatching::Contains, PathMatching::Segment] {
                assert_eq!(resolve_by_path(country.route, matching).code, country.code);
            }
        }
    }

    #[test]
    fn test_unknown_paths_resolve_to_default() {
        for path in ["/", "", "/about-us", "/blog/shipping-101", "no-slash", "/INDIA/home"] {
            assert!(resolve_by_path(path, PathMatching::Contains).is_default(), "{path}");
        }
    }

    #[test]
    fn test_contains_is_lenient() {
        assert_eq!(resolve_by_path("/thailand-office", PathMatching::Contains).code, "TH");
        assert_eq!(resolve_by_path("/indiaxyz", PathMatching::Contains).code, "IN");
    }

    #[test]
    fn test_segment_is_strict() {
        assert!(resolve_by_path("/thailand-office", PathMatching::Segment).is_default());
        assert!(resolve_by_path("/indiaxyz", PathMatching::Segment).is_default());
        assert_eq!(resolve_by_path("/sri-lanka/about-us", PathMatching::Segment).code, "LK");
    }

    #[test]
    fn test_indonesia_not_confused_with_india() {
        assert_eq!(resolve_by_path("/indonesia/home", PathMatching::Contains).code, "ID");
    }

    #[test]
    fn test_country_scoped() {
        assert!(is_country_scoped("/sri-lanka/about-us", PathMatching::Contains));
        assert!(!is_country_scoped("/contact", PathMatching::Contains));
        assert!(!is_country_scoped("/", PathMatching::Segment));
    }

    #[test]
    fn test_parse_matching_mode() {
        assert_eq!("Segment".parse::<PathMatching>().unwrap(), PathMatching::Segment);
        assert_eq!("contains".parse::<PathMatching>().unwrap(), PathMatching::Contains);
        assert!("fuzzy".parse::<PathMatching>().is_err());
        assert_eq!(PathMatching::Segment.to_string(), "segment");
    }

    #[test]
    fn test_deserialize_accepts_parse_names() {
        for name in ["contains", "substring", "loose", "segment", "exact", "strict"] {
            let parsed: PathMatching = name.parse().unwrap();
            let json = format!("\"{name}\"");
            let deserialized: PathMatching = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, parsed, "{name}");
        }
    }

    proptest! {
        #[test]
        fn prop_resolution_is_pure(path in ".{0,40}") {
            for matching in [PathMatching::Contains, PathMatching::Segment] {
                prop_assert_eq!(resolve_by_path(&path, matching), resolve_by_path(&path, matching));
            }
        }

        #[test]
        fn prop_paths_without_slugs_resolve_to_default(path in "(/[0-9_.~]{0,8}){0,5}") {
            prop_assert!(resolve_by_path(&path, PathMatching::Contains).is_default());
            prop_assert!(resolve_by_path(&path, PathMatching::Segment).is_default());
        }

        #[test]
        fn prop_slug_prefix_wins(rest in "(/[0-9x-]{1,10}){0,3}") {
            for country in COUNTRIES.iter().filter(|c| !c.is_default()) {
                let path = format!("{}{}", country.path_segment(), rest);
                prop_assert_eq!(resolve_by_path(&path, PathMatching::Segment).code, country.code);
            }
        }
    }
}
