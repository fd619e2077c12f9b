//! API client configuration.
//!
//! Defaults match the production endpoint; both fields can be overridden
//! through environment variables for development builds.

use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://trademystuffmarketplace.com/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings shared by every remote collaborator.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub base_url: String,
    /// Fixed client-level request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `SWAPMARKET_API_URL` and
    /// `SWAPMARKET_API_TIMEOUT_SECS`. An unparsable timeout falls back to
    /// the default rather than failing startup.
    pub fn from_env() -> Self {
        let base_url = env::var("SWAPMARKET_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = env::var("SWAPMARKET_API_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self { base_url, timeout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
