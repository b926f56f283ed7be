//! CLI command implementations

pub mod countries;
pub mod detect;
pub mod link;
pub mod path;
pub mod redirect;
pub mod timezone;

use freightsite_cli::OutputFormat;
use freightsite_core::config::Config;
use freightsite_geo::{FixedTimezone, HostTimezone, PathMatching, TimezoneSource};

/// State shared by every command
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl Context {
    /// The `--matching` flag, or the configured mode
    pub fn matching(&self, flag: Option<PathMatching>) -> PathMatching {
        flag.unwrap_or(self.config.schema.routing.path_matching)
    }

    /// The configured timezone override, or the host's zone
    pub fn timezone_source(&self) -> Box<dyn TimezoneSource> {
        match self.config.schema.timezone.override_zone {
            Some(ref tz) => Box::new(FixedTimezone::new(tz.clone())),
            None => Box::new(HostTimezone),
        }
    }

    /// A copy of the configuration with the IP lookup switched off when `offline`
    pub fn detection_config(&self, offline: bool) -> Config {
        let mut config = self.config.clone();
        if offline {
            config.schema.geolocation.enabled = false;
        }
        config
    }

    /// Print the in-process metrics when running verbose
    pub fn print_metrics(&self) -> anyhow::Result<()> {
        if self.verbose {
            let metrics = freightsite_telemetry::metrics().export_json();
            eprintln!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        Ok(())
    }
}
