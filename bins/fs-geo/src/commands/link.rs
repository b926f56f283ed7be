//! Link command - build a country-aware navigation link

use super::Context;
use anyhow::Result;
use freightsite_cli::output::print_json;
use freightsite_geo::{
    CountryInfo, PathMatching, default_country, nav_link, resolve_by_path, validate_base_path,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LinkOutput<'a> {
    base: &'a str,
    country: &'static str,
    link: String,
}

/// Run link command
pub fn run(
    ctx: &Context,
    base: &str,
    path: Option<&str>,
    country: Option<&str>,
    matching: Option<PathMatching>,
) -> Result<()> {
    validate_base_path(base)?;

    let country = match (country, path) {
        (Some(code), _) => CountryInfo::from_code(code)?,
        (None, Some(path)) => resolve_by_path(path, ctx.matching(matching)),
        (None, None) => default_country(),
    };
    let link = nav_link(base, country);

    if ctx.format.is_json() {
        print_json(&LinkOutput {
            base,
            country: country.code,
            link,
        })?;
    } else {
        println!("{link}");
    }
    Ok(())
}
