//! IP geolocation lookup client
//!
//! This crate performs the single outbound request used to guess a visitor's
//! country from their IP address. It does not retry and does not cache: the
//! caller decides what to do when a lookup fails (normally, fall back to
//! timezone detection).
//!
//! # Example
//!
//! ```rust,no_run
//! use freightsite_geoip::{GeoIpClient, GeoIpConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeoIpClient::with_config(GeoIpConfig::default())?;
//!
//!     let lookup = client.lookup().await?;
//!     println!("Visitor country: {}", lookup.country_code);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;

pub use client::{GeoIpClient, GeoIpLookup, parse_country_code};
pub use config::GeoIpConfig;
pub use error::{GeoIpError, GeoIpErrorCode, GeoIpResult};
