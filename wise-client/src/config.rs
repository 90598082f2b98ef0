//! Configuration for the Wise client.

use std::time::Duration;

/// Base URL of the Wise sandbox.
pub const SANDBOX_URL: &str = "https://api.sandbox.transferwise.tech";

/// Base URL of live Wise.
pub const PRODUCTION_URL: &str = "https://api.transferwise.com";

/// Which Wise deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    /// Picks the environment from a sandbox flag.
    pub fn from_sandbox_flag(is_sandbox: bool) -> Self {
        if is_sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    /// Returns the API base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_URL,
            Environment::Production => PRODUCTION_URL,
        }
    }
}

/// Everything the client needs, passed in explicitly at construction.
#[derive(Clone)]
pub struct WiseConfig {
    /// Personal or business API token
    pub api_token: String,
    pub base_url: String,
    /// Per-request timeout; `None` leaves timing to the caller
    pub timeout: Option<Duration>,
}

impl WiseConfig {
    /// Creates a configuration for the given environment.
    pub fn new(api_token: impl Into<String>, environment: Environment) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: environment.base_url().to_string(),
            timeout: None,
        }
    }

    /// Overrides the base URL (useful for proxies and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl std::fmt::Debug for WiseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WiseConfig")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_urls() {
        assert_eq!(Environment::from_sandbox_flag(true).base_url(), SANDBOX_URL);
        assert_eq!(
            Environment::from_sandbox_flag(false).base_url(),
            PRODUCTION_URL
        );
        assert_eq!(Environment::default(), Environment::Sandbox);
    }

    #[test]
    fn test_config_builder() {
        let config = WiseConfig::new("token", Environment::Production)
            .with_base_url("http://localhost:9000")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = WiseConfig::new("super-secret", Environment::Sandbox);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
    }
}
