//! Landing-page redirect controller
//!
//! On every path change the controller decides whether a visitor on the
//! generic landing page (`/`) should be sent to their country's landing
//! page. Global pages and pages already under a country slug are left
//! alone, and a trigger that has been cancelled (the visitor navigated
//! elsewhere while detection was in flight) never navigates.

use crate::detect::CountryResolver;
use freightsite_core::config::{DEFAULT_GLOBAL_PATHS, RoutingConfig};
use freightsite_geo::{PathMatching, is_country_scoped};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

const ROOT_PATH: &str = "/";

/// Host history API.
pub trait Navigator: Send + Sync {
    /// Navigate to `route`, replacing the current history entry
    fn replace(&self, route: &str);
}

/// A navigator that records calls instead of navigating.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    /// Routes navigated to so far, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, route: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(route.to_string());
        }
    }
}

/// Why the controller stayed put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleReason {
    /// Path is already under a country slug
    CountryScoped,
    /// Path starts with a global prefix
    GlobalPath,
    /// Path is not the landing page
    NotRoot,
    /// Visitor resolved to the default region, whose landing page is `/`
    DefaultRegion,
    /// The resolver failed
    ResolverFailed,
}

/// Result of handling one path change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RedirectOutcome {
    /// No navigation
    Idle {
        /// Why
        reason: IdleReason,
    },
    /// Navigated with history replacement
    Redirected {
        /// Target route
        to: String,
        /// Detected country code
        country: &'static str,
    },
    /// The trigger was cancelled before navigation
    Cancelled,
}

impl RedirectOutcome {
    fn idle(reason: IdleReason) -> Self {
        Self::Idle { reason }
    }

    /// Returns true if a navigation happened
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirected { .. })
    }
}

/// Which paths are exempt from the landing redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRules {
    matching: PathMatching,
    global_paths: Vec<String>,
}

impl Default for RedirectRules {
    fn default() -> Self {
        Self {
            matching: PathMatching::default(),
            global_paths: DEFAULT_GLOBAL_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl RedirectRules {
    /// Rules from the `[routing]` config section
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            matching: config.path_matching,
            global_paths: config.global_paths.clone(),
        }
    }

    /// Builder-style method to set the path matching mode
    #[must_use]
    pub fn with_matching(mut self, matching: PathMatching) -> Self {
        self.matching = matching;
        self
    }

    /// The path matching mode used for country-scoped checks
    pub fn matching(&self) -> PathMatching {
        self.matching
    }

    /// The first rule that exempts `path`, checked in order:
    /// country-scoped, global prefix, not root.
    pub fn exemption(&self, path: &str) -> Option<IdleReason> {
        if is_country_scoped(path, self.matching) {
            return Some(IdleReason::CountryScoped);
        }

        if self.global_paths.iter().any(|prefix| path.starts_with(prefix.as_str())) {
            return Some(IdleReason::GlobalPath);
        }

        if path != ROOT_PATH {
            return Some(IdleReason::NotRoot);
        }

        None
    }
}

/// Sends visitors on `/` to their country's landing page.
pub struct RedirectController<R, N> {
    resolver: R,
    navigator: N,
    rules: RedirectRules,
}

impl<R: CountryResolver, N: Navigator> RedirectController<R, N> {
    /// Create a controller
    pub fn new(resolver: R, navigator: N, rules: RedirectRules) -> Self {
        Self {
            resolver,
            navigator,
            rules,
        }
    }

    /// The exemption rules in use
    pub fn rules(&self) -> &RedirectRules {
        &self.rules
    }

    /// Handle a path change.
    ///
    /// Navigates at most once. Cancelling `cancel` at any point before the
    /// navigation suppresses it.
    #[instrument(skip(self, cancel))]
    pub async fn on_path_change(&self, path: &str, cancel: &CancellationToken) -> RedirectOutcome {
        if let Some(reason) = self.rules.exemption(path) {
            debug!(?reason, "No redirect");
            return RedirectOutcome::idle(reason);
        }

        let resolved = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Redirect cancelled while resolving country");
                return RedirectOutcome::Cancelled;
            }
            result = self.resolver.resolve_country() => result,
        };

        let country = match resolved {
            Ok(country) => country,
            Err(e) => {
                warn!(error = %e, "Country resolution failed, staying on landing page");
                return RedirectOutcome::idle(IdleReason::ResolverFailed);
            }
        };

        if country.route == ROOT_PATH {
            debug!(country = country.code, "Default region, no redirect");
            return RedirectOutcome::idle(IdleReason::DefaultRegion);
        }

        if cancel.is_cancelled() {
            info!(country = country.code, "Redirect cancelled after country resolved");
            return RedirectOutcome::Cancelled;
        }

        self.navigator.replace(country.route);
        info!(country = country.code, to = country.route, "Redirected to country landing page");

        RedirectOutcome::Redirected {
            to: country.route.to_string(),
            country: country.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RoutingError, RoutingResult};
    use async_trait::async_trait;
    use freightsite_geo::{CountryInfo, lookup_by_code};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct MockResolver {
        code: Option<&'static str>,
        delay: Duration,
        calls: Arc<AtomicUsize>,
        cancel_on_resolve: Option<CancellationToken>,
    }

    impl MockResolver {
        fn country(code: &'static str) -> Self {
            Self {
                code: Some(code),
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
                cancel_on_resolve: None,
            }
        }

        fn failing() -> Self {
            Self {
                code: None,
                ..Self::country("SG")
            }
        }
    }

    #[async_trait]
    impl CountryResolver for MockResolver {
        async fn resolve_country(&self) -> RoutingResult<&'static CountryInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if let Some(ref token) = self.cancel_on_resolve {
                token.cancel();
            }
            self.code
                .and_then(lookup_by_code)
                .ok_or_else(|| RoutingError::resolver("lookup exploded"))
        }
    }

    fn controller(
        resolver: MockResolver,
    ) -> (
        RedirectController<MockResolver, RecordingNavigator>,
        RecordingNavigator,
    ) {
        let navigator = RecordingNavigator::default();
        let controller =
            RedirectController::new(resolver, navigator.clone(), RedirectRules::default());
        (controller, navigator)
    }

    #[tokio::test]
    async fn test_root_redirects_to_country_home() {
        let (controller, navigator) = controller(MockResolver::country("IN"));

        let outcome = controller.on_path_change("/", &CancellationToken::new()).await;

        assert_eq!(
            outcome,
            RedirectOutcome::Redirected {
                to: "/india/home".to_string(),
                country: "IN"
            }
        );
        assert_eq!(navigator.calls(), vec!["/india/home"]);
    }

    #[tokio::test]
    async fn test_global_path_is_exempt() {
        let resolver = MockResolver::country("IN");
        let calls = resolver.calls.clone();
        let (controller, navigator) = controller(resolver);

        for path in ["/contact", "/login", "/signup", "/blog/ocean-freight", "/services/air"] {
            let outcome = controller.on_path_change(path, &CancellationToken::new()).await;
            assert_eq!(outcome, RedirectOutcome::Idle { reason: IdleReason::GlobalPath }, "{path}");
        }

        assert!(navigator.calls().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_country_scoped_path_is_exempt() {
        let (controller, navigator) = controller(MockResolver::country("MY"));

        let outcome = controller
            .on_path_change("/sri-lanka/about-us", &CancellationToken::new())
            .await;

        assert_eq!(outcome, RedirectOutcome::Idle { reason: IdleReason::CountryScoped });
        assert!(navigator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scoped_check_runs_before_global_check() {
        let (controller, _) = controller(MockResolver::country("MY"));
        let outcome = controller
            .on_path_change("/blog/india-customs-update", &CancellationToken::new())
            .await;
        assert_eq!(outcome, RedirectOutcome::Idle { reason: IdleReason::CountryScoped });
    }

    #[tokio::test]
    async fn test_non_root_path_is_exempt() {
        let (controller, navigator) = controller(MockResolver::country("TH"));

        let outcome = controller.on_path_change("/about-us", &CancellationToken::new()).await;

        assert_eq!(outcome, RedirectOutcome::Idle { reason: IdleReason::NotRoot });
        assert!(navigator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_default_region_stays() {
        let (controller, navigator) = controller(MockResolver::country("SG"));

        let outcome = controller.on_path_change("/", &CancellationToken::new()).await;

        assert_eq!(outcome, RedirectOutcome::Idle { reason: IdleReason::DefaultRegion });
        assert!(navigator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resolver_failure_stays_idle() {
        let (controller, navigator) = controller(MockResolver::failing());

        let outcome = controller.on_path_change("/", &CancellationToken::new()).await;

        assert_eq!(outcome, RedirectOutcome::Idle { reason: IdleReason::ResolverFailed });
        assert!(navigator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rerun_after_redirect_is_noop() {
        let (controller, navigator) = controller(MockResolver::country("ID"));
        let token = CancellationToken::new();

        let first = controller.on_path_change("/", &token).await;
        assert!(first.is_redirect());

        let landed = navigator.calls()[0].clone();
        let second = controller.on_path_change(&landed, &token).await;
        assert!(!second.is_redirect());
        assert_eq!(navigator.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_while_resolving_suppresses_navigation() {
        let resolver = MockResolver {
            delay: Duration::from_secs(5),
            ..MockResolver::country("IN")
        };
        let (controller, navigator) = controller(resolver);
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let outcome = controller.on_path_change("/", &token).await;

        assert_eq!(outcome, RedirectOutcome::Cancelled);
        assert!(navigator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_after_resolution_suppresses_navigation() {
        let token = CancellationToken::new();
        let resolver = MockResolver {
            cancel_on_resolve: Some(token.clone()),
            ..MockResolver::country("LK")
        };
        let (controller, navigator) = controller(resolver);

        let outcome = controller.on_path_change("/", &token).await;

        assert_eq!(outcome, RedirectOutcome::Cancelled);
        assert!(navigator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_already_cancelled_token() {
        let (controller, navigator) = controller(MockResolver::country("IN"));
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(controller.on_path_change("/", &token).await, RedirectOutcome::Cancelled);
        assert!(navigator.calls().is_empty());
    }

    #[test]
    fn test_rules_from_config() {
        let config = RoutingConfig {
            path_matching: PathMatching::Segment,
            global_paths: vec!["/careers".to_string()],
        };
        let rules = RedirectRules::from_config(&config);

        assert_eq!(rules.matching(), PathMatching::Segment);
        assert_eq!(rules.exemption("/careers/open-roles"), Some(IdleReason::GlobalPath));
        assert_eq!(rules.exemption("/contact"), Some(IdleReason::NotRoot));
        assert_eq!(rules.exemption("/thailand-office"), Some(IdleReason::NotRoot));
        assert_eq!(rules.exemption("/"), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = RedirectOutcome::Redirected {
            to: "/malaysia/home".to_string(),
            country: "MY",
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["state"], "redirected");
        assert_eq!(json["to"], "/malaysia/home");

        let idle = serde_json::to_value(RedirectOutcome::Idle {
            reason: IdleReason::GlobalPath,
        })
        .unwrap();
        assert_eq!(idle["reason"], "global_path");
    }
}
