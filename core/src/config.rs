//! Client configuration.
//!
//! Values are read once when the client is built and never change afterwards.

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://ukw0y1.laf.run/create-unibest-v3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

pub const BASE_URL_ENV: &str = "BEACON_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "BEACON_HTTP_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `BEACON_API_BASE_URL` and `BEACON_HTTP_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|s| !s.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(ms) = lookup(TIMEOUT_ENV).and_then(|s| s.trim().parse::<u64>().ok()) {
            config.timeout = Duration::from_millis(ms);
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
