//! Core utilities for freightsite country detection
//!
//! This crate provides shared functionality used by the detection, routing
//! and CLI crates:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with environment overrides and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use freightsite_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("Geolocation endpoint: {}", config.schema.geolocation.endpoint);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, ErrorReport, Result, ResultExt, exit_codes};
