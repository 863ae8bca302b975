//! Client configuration.

use std::time::Duration;

use watchdesk_core::defaults;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the back-office API.
    pub base_url: String,
    /// Request timeout in seconds (the transport default; no per-call
    /// timeouts are enforced).
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `WATCHDESK_BASE_URL` | `http://localhost:8080` | API base URL |
    /// | `WATCHDESK_TIMEOUT_SECS` | `30` | Request timeout |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("WATCHDESK_BASE_URL").unwrap_or_else(|_| defaults::BASE_URL.to_string());
        let timeout_seconds = std::env::var("WATCHDESK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout_seconds,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
