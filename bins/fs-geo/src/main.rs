//! fs-geo - freightsite country detection CLI
//!
//! Runs the detection chain, path resolver, link builder and landing
//! redirect from the terminal, with the same configuration the site uses.

use clap::{Parser, Subcommand};
use freightsite_cli::OutputFormat;
use freightsite_core::config::Config;
use freightsite_core::exit_codes;
use freightsite_geo::PathMatching;
use freightsite_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{Context, countries, detect, link, redirect, timezone};

/// Filter used by `--verbose`; keeps HTTP internals quiet
const VERBOSE_FILTER: &str =
    "warn,fs_geo=debug,freightsite_routing=debug,freightsite_geoip=debug,freightsite_geo=debug";

/// Country detection and locale-aware routing for freightsite
#[derive(Parser)]
#[command(name = "fs-geo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging and print collected metrics
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to .freightsite.toml and friends)
    #[arg(short, long, global = true, env = "FREIGHTSITE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported countries
    Countries,

    /// Show the host timezone and the country it maps to
    Timezone,

    /// Resolve the country a URL path belongs to
    Path {
        /// Site path, e.g. /india/services
        path: String,

        /// Slug matching mode (contains, segment)
        #[arg(short, long)]
        matching: Option<PathMatching>,
    },

    /// Build a country-aware navigation link
    Link {
        /// Base path, e.g. /about-us
        base: String,

        /// Scope the link to the country of this path
        #[arg(short, long, conflicts_with = "country")]
        path: Option<String>,

        /// Scope the link to this country code
        #[arg(short = 'C', long)]
        country: Option<String>,

        /// Slug matching mode used with --path
        #[arg(short, long)]
        matching: Option<PathMatching>,
    },

    /// Run the detection chain
    Detect {
        /// Skip the IP lookup and use the timezone only
        #[arg(long)]
        offline: bool,
    },

    /// Simulate the landing redirect for a path
    Redirect {
        /// Current path
        path: String,

        /// Skip the IP lookup and use the timezone only
        #[arg(long)]
        offline: bool,

        /// Cancel the trigger after this many milliseconds
        #[arg(long)]
        cancel_after_ms: Option<u64>,

        /// Slug matching mode for the country-scoped check
        #[arg(short, long)]
        matching: Option<PathMatching>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e, format),
    }
}

/// Print `e` and pick the exit status; configuration errors get their own code
fn report_error(e: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let Some(config_error) = e.downcast_ref::<freightsite_core::Error>() else {
        eprintln!("{} {}", "Error:".red().bold(), e);
        return ExitCode::from(exit_codes::FAILURE);
    };

    match serde_json::to_string_pretty(&config_error.to_report()) {
        Ok(json) if format.is_json() => eprintln!("{json}"),
        _ => eprintln!("{} {}", "Error:".red().bold(), config_error),
    }
    ExitCode::from(config_error.exit_code())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let telemetry = if cli.verbose {
        TelemetryConfig::new(VERBOSE_FILTER, config.schema.logging.json)
    } else {
        TelemetryConfig::new(&config.schema.logging.level, config.schema.logging.json)
    };
    freightsite_telemetry::init_with_config(telemetry)?;

    tracing::debug!(config = ?config.path, "Configuration loaded");

    let ctx = Context {
        config,
        format: cli.format,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Countries => countries::run(&ctx),
        Commands::Timezone => timezone::run(&ctx),
        Commands::Path { path, matching } => commands::path::run(&ctx, &path, matching),
        Commands::Link {
            base,
            path,
            country,
            matching,
        } => link::run(&ctx, &base, path.as_deref(), country.as_deref(), matching),
        Commands::Detect { offline } => detect::run(&ctx, offline).await,
        Commands::Redirect {
            path,
            offline,
            cancel_after_ms,
            matching,
        } => redirect::run(&ctx, &path, offline, cancel_after_ms, matching).await,
    }
}
