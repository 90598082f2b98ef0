//! Configuration loading from environment.

use std::env;

use wise_client::{Environment, WiseConfig};
use wise_types::ProfileType;

/// Application configuration.
pub struct Config {
    pub api_token: String,
    pub is_sandbox: bool,
    pub api_url: Option<String>,
    pub default_profile_type: ProfileType,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_token = lookup("WISE_API_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("WISE_API_TOKEN environment variable is required"))?;

        // Anything but "true" selects production.
        let is_sandbox = lookup("WISE_IS_SANDBOX")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        let api_url = lookup("WISE_API_URL").filter(|u| !u.trim().is_empty());

        let default_profile_type = match lookup("WISE_DEFAULT_PROFILE_TYPE") {
            Some(t) => t.parse()?,
            None => ProfileType::Personal,
        };

        Ok(Self {
            api_token,
            is_sandbox,
            api_url,
            default_profile_type,
        })
    }

    /// Builds the HTTP client configuration.
    pub fn wise_config(&self) -> WiseConfig {
        let config = WiseConfig::new(
            self.api_token.clone(),
            Environment::from_sandbox_flag(self.is_sandbox),
        );
        match &self.api_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }
}
