//! Client configuration.

use std::time::Duration;

/// Configuration for [`crate::EdrClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the EDR service, without a trailing slash
    /// (e.g., `https://opendata.fmi.fi/edr`).
    pub base_url: String,

    /// Optional per-request budget. When set, a request that has not
    /// completed within this duration is abandoned and reported as a
    /// timeout failure. `None` means no explicit budget beyond the
    /// transport's own limits.
    pub request_timeout: Option<Duration>,

    /// TCP connect timeout for the underlying HTTP client.
    pub connect_timeout: Duration,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opendata.fmi.fi/edr".to_string(),
            request_timeout: None,
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("coverage-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with defaults otherwise.
    /// A trailing slash is stripped so URL assembly stays predictable.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Set the per-request timeout budget.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ClientConfig::new("https://example.fi/edr/");
        assert_eq!(config.base_url, "https://example.fi/edr");
    }

    #[test]
    fn test_default_has_no_timeout_budget() {
        assert!(ClientConfig::default().request_timeout.is_none());
        let config = ClientConfig::default().with_request_timeout(Duration::from_millis(1500));
        assert_eq!(config.request_timeout, Some(Duration::from_millis(1500)));
    }
}
