//! Countries command - list the registry

use super::Context;
use anyhow::Result;
use freightsite_cli::output::{Status, format_count, print_json};
use freightsite_geo::CountryInfo;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CountryRow {
    code: &'static str,
    name: &'static str,
    slug: String,
    route: &'static str,
    timezone: Option<&'static str>,
    default: bool,
}

impl From<&CountryInfo> for CountryRow {
    fn from(country: &CountryInfo) -> Self {
        Self {
            code: country.code,
            name: country.name,
            slug: country.slug(),
            route: country.route,
            timezone: country.timezone,
            default: country.is_default(),
        }
    }
}

/// Run countries command
pub fn run(ctx: &Context) -> Result<()> {
    let rows: Vec<CountryRow> = freightsite_geo::all().iter().map(CountryRow::from).collect();

    if ctx.format.is_json() {
        print_json(&rows)?;
        return Ok(());
    }

    Status::header("Supported Countries");
    println!(
        "  {:<5} {:<12} {:<12} {:<18} {}",
        "Code".dimmed(),
        "Name".dimmed(),
        "Slug".dimmed(),
        "Route".dimmed(),
        "Timezone".dimmed()
    );

    for row in &rows {
        let code = if row.default {
            row.code.cyan().to_string()
        } else {
            row.code.green().to_string()
        };
        println!(
            "  {:<5} {:<12} {:<12} {:<18} {}",
            code,
            row.name,
            row.slug,
            row.route,
            row.timezone.unwrap_or("-")
        );
    }

    println!();
    println!("  Total: {}", format_count(rows.len(), "country", "countries"));
    println!();
    Ok(())
}
