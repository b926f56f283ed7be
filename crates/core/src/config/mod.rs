//! Configuration loading and schema definitions
//!
//! Shared configuration types used across the detection, routing and CLI crates.

mod loader;
mod schema;

pub use loader::{Config, ENV_GEOIP_TIMEOUT_SECS, ENV_GEOIP_URL, ENV_PATH_MATCHING, ENV_TZ};
pub use schema::*;
