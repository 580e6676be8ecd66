use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Primary Binance REST endpoint. `api1` through `api3` serve the same
/// API and can be substituted under degraded conditions.
pub const DEFAULT_REST_URL: &str = "https://api.binance.com";

/// Configuration for the exchange REST client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// REST API base URL
    #[serde(default = "default_rest_url")]
    pub rest_url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Request-weight quota per minute granted by the exchange
    #[serde(default = "default_quota_limit")]
    pub quota_limit: u32,
    /// Fraction of the quota at which usage is logged as a warning
    #[serde(default = "default_quota_warn_threshold")]
    pub quota_warn_threshold: f64,
}

impl ClientConfig {
    pub fn with_rest_url(rest_url: impl Into<String>) -> Self {
        ClientConfig {
            rest_url: rest_url.into(),
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            rest_url: default_rest_url(),
            request_timeout_ms: default_request_timeout_ms(),
            quota_limit: default_quota_limit(),
            quota_warn_threshold: default_quota_warn_threshold(),
        }
    }
}

// Default value functions for serde

fn default_rest_url() -> String {
    DEFAULT_REST_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_quota_limit() -> u32 {
    1200
}

fn default_quota_warn_threshold() -> f64 {
    0.7
}
