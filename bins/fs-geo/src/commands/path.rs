//! Path command - resolve the country a path belongs to

use super::Context;
use anyhow::Result;
use freightsite_cli::output::{Status, print_json};
use freightsite_geo::{PathMatching, match_country, resolve_by_path};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PathOutput<'a> {
    path: &'a str,
    matching: PathMatching,
    scoped: bool,
    country: &'static str,
    name: &'static str,
}

/// Run path command
pub fn run(ctx: &Context, path: &str, matching: Option<PathMatching>) -> Result<()> {
    let matching = ctx.matching(matching);
    let country = resolve_by_path(path, matching);

    let output = PathOutput {
        path,
        matching,
        scoped: match_country(path, matching).is_some(),
        country: country.code,
        name: country.name,
    };

    if ctx.format.is_json() {
        print_json(&output)?;
        return Ok(());
    }

    Status::field("Path", path);
    Status::field("Matching", matching);
    Status::field("Country", format!("{} ({})", country.name.green(), country.code));
    if !output.scoped {
        Status::field("Scoped", "no, default region".dimmed());
    }
    Ok(())
}
