//! Error types for webhook verification.

use thiserror::Error;

/// Why a webhook was rejected.
///
/// Signature mismatches of any shape (wrong digest, wrong length, wrong case)
/// all surface as [`WebhookError::InvalidSignature`].
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature header has no usable digest or an unparsable timestamp
    #[error("Invalid signature header: {0}")]
    InvalidFormat(String),

    /// Signed timestamp is further from now than the tolerance window
    #[error("Webhook timestamp outside tolerance: {skew_ms}ms from now, tolerance {tolerance_secs}s")]
    Expired { skew_ms: u64, tolerance_secs: u64 },

    /// Digest does not match the payload
    #[error("Webhook signature mismatch")]
    InvalidSignature,

    /// Payload is not a valid event
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// A handler rejected a verified event
    #[error("Webhook handler failed: {0}")]
    Handler(String),
}

impl WebhookError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            WebhookError::InvalidFormat(_) => "invalid_format",
            WebhookError::Expired { .. } => "expired",
            WebhookError::InvalidSignature => "invalid_signature",
            WebhookError::InvalidPayload(_) => "invalid_payload",
            WebhookError::Handler(_) => "handler_error",
        }
    }

    /// HTTP status a webhook endpoint should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            WebhookError::InvalidFormat(_) | WebhookError::InvalidPayload(_) => 400,
            WebhookError::Expired { .. } | WebhookError::InvalidSignature => 401,
            WebhookError::Handler(_) => 500,
        }
    }
}
