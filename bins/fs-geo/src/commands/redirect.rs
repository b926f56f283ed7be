//! Redirect command - simulate the landing redirect for one path change

use super::Context;
use anyhow::Result;
use freightsite_cli::output::{Status, print_json};
use freightsite_geo::PathMatching;
use freightsite_routing::{
    Detection, DetectionChain, IdleReason, RecordingNavigator, RedirectController,
    RedirectOutcome, RedirectRules, SharedDetection,
};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize)]
struct RedirectOutput<'a> {
    path: &'a str,
    outcome: RedirectOutcome,
    navigations: Vec<String>,
    detection: Option<Detection>,
}

/// Run redirect command
pub async fn run(
    ctx: &Context,
    path: &str,
    offline: bool,
    cancel_after_ms: Option<u64>,
    matching: Option<PathMatching>,
) -> Result<()> {
    let config = ctx.detection_config(offline);
    let detection = SharedDetection::new(DetectionChain::from_config(&config)?);
    let rules =
        RedirectRules::from_config(&config.schema.routing).with_matching(ctx.matching(matching));

    let navigator = RecordingNavigator::default();
    let controller = RedirectController::new(detection.clone(), navigator.clone(), rules);

    let token = CancellationToken::new();
    if let Some(ms) = cancel_after_ms {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            token.cancel();
        });
    }

    let outcome = controller.on_path_change(path, &token).await;

    let output = RedirectOutput {
        path,
        navigations: navigator.calls(),
        detection: detection.peek(),
        outcome,
    };

    if ctx.format.is_json() {
        print_json(&output)?;
        return ctx.print_metrics();
    }

    match output.outcome {
        RedirectOutcome::Redirected { ref to, country } => {
            Status::success(&format!("{} -> {} ({})", path, to.green(), country));
        }
        RedirectOutcome::Idle { reason } => {
            Status::info(&format!("{} stays put: {}", path, describe(reason)));
        }
        RedirectOutcome::Cancelled => {
            Status::warning(&format!("{path}: trigger cancelled before navigating"));
        }
    }

    if let Some(detection) = output.detection {
        Status::field("Detected", format!("{} via {}", detection.country.code, detection.source));
    }

    ctx.print_metrics()
}

fn describe(reason: IdleReason) -> &'static str {
    match reason {
        IdleReason::CountryScoped => "already under a country slug",
        IdleReason::GlobalPath => "global page",
        IdleReason::NotRoot => "not the landing page",
        IdleReason::DefaultRegion => "visitor is in the default region",
        IdleReason::ResolverFailed => "country could not be resolved",
    }
}
