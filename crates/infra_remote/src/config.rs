//! Remote endpoint configuration

use serde::Deserialize;

/// Connection settings for the remote bill service
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the service, e.g. `https://bills.example.com/api`
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl RemoteConfig {
    /// Loads configuration from `BILLSPLIT_`-prefixed environment
    /// variables (`BILLSPLIT_BASE_URL`, `BILLSPLIT_TIMEOUT_MS`)
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        config::Config::builder()
            .add_source(config::Environment::with_prefix("BILLSPLIT"))
            .build()?
            .try_deserialize()
    }
}
