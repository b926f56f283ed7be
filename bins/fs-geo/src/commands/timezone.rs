//! Timezone command - show host timezone detection

use super::Context;
use anyhow::Result;
use freightsite_cli::output::{Status, print_json};
use freightsite_geo::{country_for_timezone, detect_country_by_timezone};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TimezoneOutput {
    timezone: Option<String>,
    overridden: bool,
    mapped: bool,
    country: &'static str,
    route: &'static str,
}

/// Run timezone command
pub fn run(ctx: &Context) -> Result<()> {
    let source = ctx.timezone_source();
    let timezone = source.resolved_timezone();
    let country = detect_country_by_timezone(source.as_ref());

    let output = TimezoneOutput {
        mapped: timezone.as_deref().and_then(country_for_timezone).is_some(),
        overridden: ctx.config.schema.timezone.override_zone.is_some(),
        timezone,
        country: country.code,
        route: country.route,
    };

    if ctx.format.is_json() {
        print_json(&output)?;
        return Ok(());
    }

    Status::header("Timezone Detection");
    let zone = match output.timezone {
        Some(ref tz) if output.overridden => format!("{tz} {}", "(override)".dimmed()),
        Some(ref tz) => tz.clone(),
        None => "unavailable".yellow().to_string(),
    };
    Status::field("Timezone", zone);
    Status::field("Country", format!("{} ({})", country.name.green(), country.code));
    Status::field("Landing", country.route);

    if !output.mapped {
        println!();
        Status::warning("Timezone has no site, using the default region");
    }
    println!();
    Ok(())
}
