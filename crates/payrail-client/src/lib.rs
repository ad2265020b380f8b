//! # payrail-client
//!
//! Async HTTP client for the payrail payment API.
//!
//! Every call is a single attempt bounded by the configured timeout, and
//! every failure comes back as a [`PaymentError`](payrail_core::PaymentError).
//! The client does not retry. The published API documentation advertises
//! automatic retries for transient failures; this client makes exactly one
//! attempt, and [`PaymentError::is_retryable`](payrail_core::PaymentError::is_retryable)
//! is there for callers who want their own retry policy.
//!
//! HTTP 400 responses map to `Validation`. The one exception is a body whose
//! `code` is `processor_error`, which maps to `Processor` with the backend's
//! `processorCode`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payrail_client::{ClientConfig, PayrailClient};
//! use payrail_core::CreateOrderRequest;
//!
//! let client = PayrailClient::new(ClientConfig::new("pk_live_...")?)?;
//!
//! let order = client
//!     .orders()
//!     .create(&CreateOrderRequest::new(2999, "USD").with_external_id("cart-42"))
//!     .await?;
//! ```
//!
//! Or load the configuration from `PAYRAIL_API_KEY`, `PAYRAIL_BASE_URL`
//! and `PAYRAIL_TIMEOUT_MS`:
//!
//! ```rust,ignore
//! let client = PayrailClient::from_env()?;
//! ```

pub mod checkout;
pub mod config;
pub mod orders;
pub mod transport;

// Re-exports
pub use checkout::Checkout;
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use orders::Orders;
pub use transport::{Transport, API_KEY_HEADER, CLIENT_IDENTIFIER};

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, CONTROLS};

/// Characters that cannot appear raw inside one path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encode a resource id as a single path segment
pub(crate) fn path_segment(id: &str) -> PercentEncode<'_> {
    utf8_percent_encode(id, PATH_SEGMENT)
}

/// Payment API client.
///
/// Holds only immutable configuration and a connection handle, so it can be
/// cloned freely and shared across tasks.
#[derive(Debug, Clone)]
pub struct PayrailClient {
    transport: Transport,
}

impl PayrailClient {
    /// Create a client. Fails before any network activity if the config is unusable.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Orders endpoints
    pub fn orders(&self) -> Orders<'_> {
        Orders::new(&self.transport)
    }

    /// Checkout session endpoints
    pub fn checkout(&self) -> Checkout<'_> {
        Checkout::new(&self.transport)
    }

    /// Raw transport, for endpoints without a typed binding
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }
}
