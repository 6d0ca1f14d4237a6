//! Client configuration
//!
//! Provides the configuration the API client and the session-expiry handler
//! are constructed from: service base URL, per-request timeout, login route,
//! and the delay between an expiry notice and the redirect.

use std::time::Duration;

use thiserror::Error;

/// Default service URL, overridable with the `ICS_API_URL` environment variable
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Default per-request timeout enforced by the transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Route the expiry handler navigates to after the notice
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Delay between the expiry notice and the login redirect, long enough for
/// the notice to render before the route changes
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1200);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    timeout: Duration,
    login_path: String,
    redirect_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let base_url =
            std::env::var("ICS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ConfigBuilder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout enforced by the transport
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Route the user is sent to when the session expires
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Delay before the expiry redirect fires
    pub fn redirect_delay(&self) -> Duration {
        self.redirect_delay
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    login_path: Option<String>,
    redirect_delay: Option<Duration>,
}

impl ConfigBuilder {
    /// Set the service base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the login route used for the expiry redirect
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Set the delay before the expiry redirect
    pub fn redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = Some(delay);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        let defaults = Config::default();
        let base_url = self.base_url.unwrap_or(defaults.base_url);
        if base_url.is_empty() {
            return Err(ConfigError::MissingValue("base_url"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(base_url));
        }
        Ok(Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            login_path: self.login_path.unwrap_or(defaults.login_path),
            redirect_delay: self.redirect_delay.unwrap_or(defaults.redirect_delay),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
