//! Logging and metrics for freightsite country detection
//!
//! - [`init_with_config`] installs a `tracing` subscriber writing compact
//!   text or JSON lines to stderr, so command output on stdout stays clean.
//! - [`metrics()`] is a process-wide registry of detection counters and
//!   lookup latencies, exported as JSON by `fs-geo --verbose`.
//! - [`session_id`] tags the process so log lines from one run can be
//!   grouped.

mod metrics;

pub use metrics::{LatencySummary, MetricsRegistry, Timer, metrics};

use once_cell::sync::Lazy;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use uuid::Uuid;

static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Install a subscriber built from `config`.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Fails if a global
/// subscriber is already set.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Invalid log filter {:?}: {}", config.log_level, e))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.show_target)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(config.show_target)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );
    Ok(())
}

/// Identifier of this process, stable for its lifetime
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Subscriber settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive, e.g. `warn` or `warn,freightsite_routing=debug`
    pub log_level: String,
    /// JSON lines instead of compact text
    pub json: bool,
    /// Include the event target (module path)
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Configuration with an explicit filter and format
    pub fn new(log_level: impl Into<String>, json: bool) -> Self {
        Self {
            log_level: log_level.into(),
            json,
            ..Self::default()
        }
    }
}
