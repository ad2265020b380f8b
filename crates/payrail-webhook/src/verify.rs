//! # Webhook Verification
//!
//! Authenticate a webhook body against its signature header, then parse it.
//!
//! Checks run in a fixed order: header format, timestamp window, digest,
//! payload. A request that fails an earlier check never reaches a later one.

use crate::error::WebhookError;
use crate::signature::{compute_signature, signatures_match, SignatureHeader};
use chrono::{DateTime, Utc};
use payrail_core::WebhookEvent;
use std::time::Duration;
use tracing::{debug, warn};

/// Replay window used by [`verify`]
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Verify a webhook using the default 5 minute tolerance
pub fn verify(
    payload: impl AsRef<[u8]>,
    signature_header: &str,
    secret: &str,
) -> Result<WebhookEvent, WebhookError> {
    verify_with_tolerance(payload, signature_header, secret, DEFAULT_TOLERANCE)
}

/// Verify a webhook with a custom replay window
pub fn verify_with_tolerance(
    payload: impl AsRef<[u8]>,
    signature_header: &str,
    secret: &str,
    tolerance: Duration,
) -> Result<WebhookEvent, WebhookError> {
    verify_at(payload, signature_header, secret, tolerance, Utc::now())
}

/// Verify a webhook against an explicit clock.
///
/// The timestamp window applies in both directions: events signed too far
/// in the future are rejected the same as stale ones. Headers without a
/// `t` entry skip the window check entirely.
pub fn verify_at(
    payload: impl AsRef<[u8]>,
    signature_header: &str,
    secret: &str,
    tolerance: Duration,
    now: DateTime<Utc>,
) -> Result<WebhookEvent, WebhookError> {
    let payload = payload.as_ref();
    let header = SignatureHeader::parse(signature_header)?;

    if let Some(signed_at) = header.timestamp_ms()? {
        let skew_ms = now.timestamp_millis().abs_diff(signed_at);
        let tolerance_ms = u64::try_from(tolerance.as_millis()).unwrap_or(u64::MAX);

        if skew_ms > tolerance_ms {
            warn!(
                "Rejecting webhook: timestamp {}ms from now exceeds {}s tolerance",
                skew_ms,
                tolerance.as_secs()
            );
            return Err(WebhookError::Expired {
                skew_ms,
                tolerance_secs: tolerance.as_secs(),
            });
        }
    }

    let expected = compute_signature(secret, header.timestamp.as_deref(), payload);
    if !signatures_match(&expected, &header.digest) {
        warn!("Rejecting webhook: signature mismatch");
        return Err(WebhookError::InvalidSignature);
    }

    let event = parse_event(payload)?;
    debug!("Verified webhook event: id={}, type={}", event.id, event.event_type);

    Ok(event)
}

/// Parse a webhook body WITHOUT checking its signature.
///
/// Anyone can POST to a webhook endpoint. Never make trust decisions
/// (marking orders paid, shipping goods) on an event obtained this way.
pub fn construct_event(payload: impl AsRef<[u8]>) -> Result<WebhookEvent, WebhookError> {
    parse_event(payload.as_ref())
}

fn parse_event(payload: &[u8]) -> Result<WebhookEvent, WebhookError> {
    Ok(serde_json::from_slice(payload)?)
}
