//! Country detection and landing-page redirects
//!
//! This crate wires the pieces from `freightsite-geo` and `freightsite-geoip`
//! into the flow the site runs on page load:
//!
//! - **Detection chain**: an ordered list of strategies (IP lookup, host
//!   timezone) where the first answer wins and the default region is the
//!   floor
//! - **Shared detection**: one memoized resolution per session, shared by
//!   every widget that needs the visitor's country
//! - **Redirect controller**: moves visitors from `/` to their country's
//!   landing page, exempting global and already-scoped paths, and never
//!   navigating after its trigger has been cancelled
//!
//! # Example
//!
//! ```rust,no_run
//! use freightsite_core::config::Config;
//! use freightsite_routing::{
//!     DetectionChain, RecordingNavigator, RedirectController, RedirectRules, SharedDetection,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None)?;
//!     let detection = SharedDetection::new(DetectionChain::from_config(&config)?);
//!
//!     let navigator = RecordingNavigator::default();
//!     let controller = RedirectController::new(
//!         detection,
//!         navigator.clone(),
//!         RedirectRules::from_config(&config.schema.routing),
//!     );
//!
//!     let outcome = controller.on_path_change("/", &CancellationToken::new()).await;
//!     println!("{outcome:?} -> {:?}", navigator.calls());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod detect;
pub mod error;
pub mod redirect;
pub mod strategy;

pub use detect::{
    CountryResolver, Detection, DetectionChain, SharedDetection, detect_country_by_ip,
};
pub use error::{RoutingError, RoutingErrorCode, RoutingResult};
pub use redirect::{
    IdleReason, Navigator, RecordingNavigator, RedirectController, RedirectOutcome, RedirectRules,
};
pub use strategy::{DetectionSource, DetectionStrategy, IpStrategy, TimezoneStrategy};
