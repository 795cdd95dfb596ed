//! Client configuration options.

use std::time::Duration;

use crate::{ApiVersion, Environment};

/// Configuration for the TastyTrade client.
///
/// # Example
///
/// ```
/// use tastytrade_oms::{ClientConfig, Environment};
/// use std::time::Duration;
///
/// let config = ClientConfig::for_environment(Environment::Sandbox)
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is joined onto
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Optional API version to pin to
    pub api_version: Option<ApiVersion>,
    /// Authenticated calls fail with `SessionExpired` once the token is
    /// this close to its expiry
    pub token_safety_margin: Duration,
    /// Polling policy used after a cancel-replace
    pub reconcile: ReconcileConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Production)
    }
}

impl ClientConfig {
    /// Create a configuration targeting `base_url`, with default values
    /// for everything else.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("tastytrade-oms/{} (Rust)", env!("CARGO_PKG_VERSION")),
            api_version: None,
            token_safety_margin: Duration::from_secs(5 * 60),
            reconcile: ReconcileConfig::default(),
        }
    }

    /// Create a configuration for one of the hosted environments.
    pub fn for_environment(env: Environment) -> Self {
        Self::new(env.api_base_url())
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Pin to a specific API version.
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Set the token expiry safety margin.
    pub fn with_token_safety_margin(mut self, margin: Duration) -> Self {
        self.token_safety_margin = margin;
        self
    }

    /// Set the cancel-replace reconciliation policy.
    pub fn with_reconcile(mut self, reconcile: ReconcileConfig) -> Self {
        self.reconcile = reconcile;
        self
    }
}

/// Polling policy for locating the replacement order after a
/// cancel-replace.
///
/// The client polls the live orders up to `max_attempts` times, sleeping
/// `backoff_step * attempt` before attempt `attempt` (1-based).
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Maximum number of live-order polls
    pub max_attempts: u32,
    /// Linear backoff step
    pub backoff_step: Duration,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_millis(500),
        }
    }
}

impl ReconcileConfig {
    /// Disable reconciliation; cancel-replace returns the PUT response.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 0,
            ..Default::default()
        }
    }

    /// Set the maximum number of polls.
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set the backoff step.
    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }

    /// Delay before the given (1-based) attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_step.saturating_mul(attempt)
    }
}
