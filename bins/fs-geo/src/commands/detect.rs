//! Detect command - run the detection chain

use super::Context;
use anyhow::Result;
use freightsite_cli::output::{Status, format_duration, print_json};
use freightsite_cli::progress;
use freightsite_routing::{DetectionChain, DetectionSource};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Serialize)]
struct DetectOutput {
    country: &'static str,
    name: &'static str,
    route: &'static str,
    source: DetectionSource,
    strategies: Vec<DetectionSource>,
    elapsed_ms: u128,
}

/// Run detect command
pub async fn run(ctx: &Context, offline: bool) -> Result<()> {
    let chain = DetectionChain::from_config(&ctx.detection_config(offline))?;
    let strategies = chain.sources();

    let spinner = if ctx.format.is_json() {
        progress::hidden()
    } else {
        progress::spinner("Detecting country...")
    };

    let start = Instant::now();
    let detection = chain.resolve().await;
    let elapsed = start.elapsed();
    progress::finish_clear(&spinner);

    let country = detection.country;
    if ctx.format.is_json() {
        print_json(&DetectOutput {
            country: country.code,
            name: country.name,
            route: country.route,
            source: detection.source,
            strategies,
            elapsed_ms: elapsed.as_millis(),
        })?;
        return ctx.print_metrics();
    }

    Status::success(&format!(
        "{} ({}) in {}",
        country.name.green(),
        country.code,
        format_duration(elapsed)
    ));
    Status::field("Source", detection.source.cyan());
    Status::field("Landing", country.route);
    Status::field(
        "Chain",
        strategies
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" -> "),
    );

    ctx.print_metrics()
}
