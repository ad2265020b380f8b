//! # Client Configuration
//!
//! Configuration for the payrail HTTP client.
//! Values are fixed once the config is built; the client keeps its own copy.

use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.payrail.io";

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Errors raised while building a client, before any network activity
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid timeout {0:?}: expected milliseconds")]
    InvalidTimeout(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Payment API client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the default base URL and timeout.
    ///
    /// Fails with [`ConfigError::MissingApiKey`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// - `PAYRAIL_API_KEY` (required)
    /// - `PAYRAIL_BASE_URL` (optional)
    /// - `PAYRAIL_TIMEOUT_MS` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var("PAYRAIL_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key)?;

        if let Ok(base_url) = env::var("PAYRAIL_BASE_URL") {
            config = config.with_base_url(base_url);
        }

        if let Ok(raw) = env::var("PAYRAIL_TIMEOUT_MS") {
            let millis: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_timeout(Duration::from_millis(millis));
        }

        Ok(config)
    }

    /// Builder: override the API base URL (for sandboxes and tests)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for an API path such as `/v1/orders`
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reject base URLs reqwest would fail on at request time
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let parsed = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn redact(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    if key.chars().count() > 8 {
        format!("{}****", prefix)
    } else {
        "****".to_string()
    }
}
