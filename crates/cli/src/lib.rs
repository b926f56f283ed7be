//! Terminal helpers for the freightsite command line tools
//!
//! Provides shared CLI functionality:
//! - Output format selection (text or JSON)
//! - Status messages and small formatters
//! - Spinners for network-bound commands

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{OutputFormat, Status};
