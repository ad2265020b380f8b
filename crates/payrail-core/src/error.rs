//! # Payment Error Types
//!
//! Typed error taxonomy for the payrail client.
//! All API operations return `Result<T, PaymentError>`.
//!
//! Every variant exposes the same three fields through [`PaymentError::code`],
//! [`PaymentError::message`] and [`PaymentError::status`], so callers can
//! either match on the variant or inspect the error generically.

use thiserror::Error;

/// Resource name used for 404 responses.
///
/// The transport only sees a status code, so it cannot tell which resource
/// a path addressed.
pub const GENERIC_RESOURCE: &str = "Resource";

/// Core error type for all payment API operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Unrecognized backend failure, carried verbatim
    #[error("{message} ({code}, status {status})")]
    Api {
        code: String,
        message: String,
        status: u16,
    },

    /// API key rejected (401)
    #[error("{message}")]
    Authentication { message: String },

    /// Request rejected by backend validation (400)
    #[error("{message}")]
    Validation { message: String },

    /// Addressed resource does not exist (404)
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Rate limited by the backend (429)
    #[error("{message}")]
    RateLimit { message: String },

    /// Downstream payment processor declined or failed (400)
    #[error("{message}")]
    Processor {
        message: String,
        processor_code: Option<String>,
    },

    /// No response within the configured timeout
    #[error("{message}")]
    Timeout { message: String },

    /// Transport failure before any response was received
    #[error("Network error: {message}")]
    Network { message: String },
}

/// Discriminant of [`PaymentError`], for branching without destructuring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Api,
    Authentication,
    Validation,
    NotFound,
    RateLimit,
    Processor,
    Timeout,
    Network,
}

impl PaymentError {
    /// Generic error with backend-supplied fields
    pub fn api(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        PaymentError::Api {
            code: code.into(),
            message: message.into(),
            status,
        }
    }

    /// Authentication error with the default message
    pub fn authentication() -> Self {
        PaymentError::Authentication {
            message: "Invalid API key".to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PaymentError::Validation {
            message: message.into(),
        }
    }

    /// Not-found error for the named resource (e.g. "Order")
    pub fn not_found(resource: impl Into<String>) -> Self {
        PaymentError::NotFound {
            resource: resource.into(),
        }
    }

    /// Rate limit error with the default message
    pub fn rate_limit() -> Self {
        PaymentError::RateLimit {
            message: "Too many requests".to_string(),
        }
    }

    pub fn processor(message: impl Into<String>, processor_code: Option<String>) -> Self {
        PaymentError::Processor {
            message: message.into(),
            processor_code,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        PaymentError::Timeout {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        PaymentError::Network {
            message: message.into(),
        }
    }

    /// Returns the variant discriminant
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::Api { .. } => ErrorKind::Api,
            PaymentError::Authentication { .. } => ErrorKind::Authentication,
            PaymentError::Validation { .. } => ErrorKind::Validation,
            PaymentError::NotFound { .. } => ErrorKind::NotFound,
            PaymentError::RateLimit { .. } => ErrorKind::RateLimit,
            PaymentError::Processor { .. } => ErrorKind::Processor,
            PaymentError::Timeout { .. } => ErrorKind::Timeout,
            PaymentError::Network { .. } => ErrorKind::Network,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &str {
        match self {
            PaymentError::Api { code, .. } => code,
            PaymentError::Authentication { .. } => "authentication_error",
            PaymentError::Validation { .. } => "validation_error",
            PaymentError::NotFound { .. } => "not_found",
            PaymentError::RateLimit { .. } => "rate_limit",
            PaymentError::Processor { .. } => "processor_error",
            PaymentError::Timeout { .. } => "timeout",
            PaymentError::Network { .. } => "network_error",
        }
    }

    /// Human-readable message (same text as `Display` for all but `Api` and `Network`)
    pub fn message(&self) -> String {
        match self {
            PaymentError::Api { message, .. }
            | PaymentError::Authentication { message }
            | PaymentError::Validation { message }
            | PaymentError::RateLimit { message }
            | PaymentError::Processor { message, .. }
            | PaymentError::Timeout { message }
            | PaymentError::Network { message } => message.clone(),
            PaymentError::NotFound { resource } => format!("{} not found", resource),
        }
    }

    /// HTTP status associated with this error.
    ///
    /// Network failures never produced a response and report `0`.
    pub fn status(&self) -> u16 {
        match self {
            PaymentError::Api { status, .. } => *status,
            PaymentError::Authentication { .. } => 401,
            PaymentError::Validation { .. } => 400,
            PaymentError::NotFound { .. } => 404,
            PaymentError::RateLimit { .. } => 429,
            PaymentError::Processor { .. } => 400,
            PaymentError::Timeout { .. } => 408,
            PaymentError::Network { .. } => 0,
        }
    }

    /// Processor-specific sub-code, only set on `Processor` errors
    pub fn processor_code(&self) -> Option<&str> {
        match self {
            PaymentError::Processor { processor_code, .. } => processor_code.as_deref(),
            _ => None,
        }
    }

    /// Returns true if a caller may reasonably try the call again.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            PaymentError::Timeout { .. }
            | PaymentError::Network { .. }
            | PaymentError::RateLimit { .. } => true,
            PaymentError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
