//! # Application State
//!
//! Receiver configuration and the handler events are dispatched to.

use payrail_webhook::{LoggingWebhookHandler, WebhookHandler, DEFAULT_TOLERANCE};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PAYRAIL_WEBHOOK_SECRET is not set")]
    MissingSecret,

    #[error("Invalid PAYRAIL_WEBHOOK_TOLERANCE_SECS: {0}")]
    InvalidTolerance(String),

    #[error("Invalid listen address {0}")]
    InvalidAddress(String),
}

/// Receiver configuration
#[derive(Clone)]
pub struct ReceiverConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Shared secret used to sign webhooks
    pub webhook_secret: String,
    /// Replay window
    pub tolerance: Duration,
}

impl ReceiverConfig {
    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            webhook_secret: webhook_secret.into(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let webhook_secret = std::env::var("PAYRAIL_WEBHOOK_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let tolerance = match std::env::var("PAYRAIL_WEBHOOK_TOLERANCE_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTolerance(raw.clone()))?,
            ),
            Err(_) => DEFAULT_TOLERANCE,
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            webhook_secret,
            tolerance,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

impl std::fmt::Debug for ReceiverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiverConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("webhook_secret", &"[REDACTED]")
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ReceiverConfig>,
    /// Receives every verified event
    pub handler: Arc<dyn WebhookHandler>,
}

impl AppState {
    pub fn new(config: ReceiverConfig, handler: Arc<dyn WebhookHandler>) -> Self {
        Self {
            config: Arc::new(config),
            handler,
        }
    }

    /// State that only logs incoming events
    pub fn logging(config: ReceiverConfig) -> Self {
        Self::new(config, Arc::new(LoggingWebhookHandler))
    }
}
