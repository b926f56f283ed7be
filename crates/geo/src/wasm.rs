//! WASM bindings for the geo crate.
//!
//! These bindings let the site's browser bundle resolve countries and build
//! navigation links during render without a server round trip.

use crate::{
    HostTimezone, PathMatching, all, country_for_timezone, detect_country_by_timezone,
    lookup_by_code, nav_link, nav_link_for_path, resolve_by_path,
};
use wasm_bindgen::prelude::*;

fn json_error(e: serde_json::Error) -> JsValue {
    js_sys::Error::new(&format!("JSON serialize error: {}", e)).into()
}

fn matching_mode(segment: bool) -> PathMatching {
    if segment {
        PathMatching::Segment
    } else {
        PathMatching::Contains
    }
}

/// Resolve the country for a URL path.
///
/// # Arguments
/// * `path` - Current pathname, e.g. `/malaysia/services`
/// * `segment` - Use strict path-segment matching instead of substring matching
///
/// # Returns
/// JSON string of the matched country (the default region when nothing matches)
#[wasm_bindgen(js_name = resolveByPath)]
pub fn resolve_path(path: &str, segment: bool) -> Result<String, JsValue> {
    let country = resolve_by_path(path, matching_mode(segment));
    serde_json::to_string(country)
        .map_err(json_error)
}

/// Build a country-aware link for the page currently at `current_path`.
#[wasm_bindgen(js_name = navLinkForPath)]
pub fn link_for_path(base: &str, current_path: &str, segment: bool) -> String {
    nav_link_for_path(base, current_path, matching_mode(segment))
}

/// Build a link for an explicit country code.
///
/// Unknown codes produce the unprefixed base path.
#[wasm_bindgen(js_name = navLinkForCountry)]
pub fn link_for_country(base: &str, code: &str) -> String {
    match lookup_by_code(code) {
        Some(country) => nav_link(base, country),
        None => base.to_string(),
    }
}

/// Look up the country for an IANA timezone.
///
/// # Returns
/// JSON string of the country, or `null` if the zone is unmapped
#[wasm_bindgen(js_name = countryForTimezone)]
pub fn timezone_country(tz: &str) -> Result<String, JsValue> {
    match country_for_timezone(tz) {
        Some(country) => serde_json::to_string(country).map_err(json_error),
        None => Ok("null".to_string()),
    }
}

/// Detect the country from the browser's resolved timezone.
#[wasm_bindgen(js_name = detectCountryByTimezone)]
pub fn detect_timezone_country() -> Result<String, JsValue> {
    let country = detect_country_by_timezone(&HostTimezone);
    serde_json::to_string(country)
        .map_err(json_error)
}

/// Every registered country, as an array of JSON strings in registry order.
#[wasm_bindgen(js_name = allCountries)]
pub fn all_countries() -> Result<js_sys::Array, JsValue> {
    all()
        .iter()
        .map(|country| {
            serde_json::to_string(country)
                .map(|json| JsValue::from_str(&json))
                .map_err(json_error)
        })
        .collect()
}
