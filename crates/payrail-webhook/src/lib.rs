//! # payrail-webhook
//!
//! Verification of webhooks sent by the payrail backend.
//!
//! The backend signs each delivery with HMAC-SHA256 and sends the result in
//! a header of the form `t=<epoch_ms>,v1=<hex>`. [`verify`] checks the
//! timestamp window and the digest before handing back a parsed
//! [`WebhookEvent`](payrail_core::WebhookEvent).
//!
//! ## Example
//!
//! ```rust,ignore
//! use payrail_webhook::{dispatch_webhook_event, verify, LoggingWebhookHandler};
//!
//! // `body` must be the raw request bytes, not re-serialized JSON
//! let event = verify(&body, signature_header, &secret)?;
//! dispatch_webhook_event(&LoggingWebhookHandler, &event)?;
//! ```

pub mod error;
pub mod handler;
pub mod signature;
pub mod verify;

// Re-exports
pub use error::WebhookError;
pub use handler::{dispatch_webhook_event, LoggingWebhookHandler, WebhookHandler};
pub use signature::{
    compute_signature, generate_header, generate_unbound_header, signatures_match,
    SignatureHeader, SIGNATURE_SCHEME,
};
pub use verify::{construct_event, verify, verify_at, verify_with_tolerance, DEFAULT_TOLERANCE};

pub use payrail_core::{EventTimestamp, WebhookEvent, WebhookEventType};
