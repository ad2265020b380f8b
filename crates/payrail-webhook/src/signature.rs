//! # Webhook Signatures
//!
//! Header format: `t=<epoch_ms>,v1=<hex hmac-sha256>`, or a bare
//! `v1=<hex>` with no timestamp binding.
//!
//! When a timestamp is present the signed message is `"<t>.<payload>"`,
//! otherwise the payload alone.

use crate::error::WebhookError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Digest scheme this crate understands
pub const SIGNATURE_SCHEME: &str = "v1";

/// Parsed signature header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Raw `t` value, kept verbatim because it is part of the signed bytes
    pub timestamp: Option<String>,
    /// Raw `v1` value
    pub digest: String,
}

impl SignatureHeader {
    /// Parse a signature header.
    ///
    /// Entries are split on `,` and trimmed; the last `t` and `v1` win and
    /// empty values count as absent. Fails with
    /// [`WebhookError::InvalidFormat`] when no digest is present.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp = None;
        let mut digest = None;

        for part in header.split(',') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim() {
                "t" => timestamp = Some(value.to_string()),
                SIGNATURE_SCHEME => digest = Some(value.to_string()),
                _ => {}
            }
        }

        // Older senders emit the digest alone
        if digest.is_none() {
            digest = header
                .strip_prefix("v1=")
                .filter(|rest| !rest.is_empty())
                .map(String::from);
        }

        let digest = digest.ok_or_else(|| {
            WebhookError::InvalidFormat("no v1 signature found".to_string())
        })?;

        Ok(Self { timestamp, digest })
    }

    /// Signed timestamp in epoch milliseconds, if the header carries one
    pub fn timestamp_ms(&self) -> Result<Option<i64>, WebhookError> {
        self.timestamp
            .as_deref()
            .map(|raw| {
                raw.parse::<i64>().map_err(|_| {
                    WebhookError::InvalidFormat(format!("timestamp {:?} is not an integer", raw))
                })
            })
            .transpose()
    }
}

/// Compute the lower-case hex HMAC-SHA256 of a payload.
///
/// `timestamp` must be the exact text that appears in the header.
pub fn compute_signature(secret: &str, timestamp: Option<&str>, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    if let Some(timestamp) = timestamp {
        mac.update(timestamp.as_bytes());
        mac.update(b".");
    }
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Build a timestamp-bound header, as the backend sends it
pub fn generate_header(secret: &str, timestamp_ms: i64, payload: &[u8]) -> String {
    let timestamp = timestamp_ms.to_string();
    let digest = compute_signature(secret, Some(&timestamp), payload);
    format!("t={},{}={}", timestamp, SIGNATURE_SCHEME, digest)
}

/// Build a header with no timestamp binding
pub fn generate_unbound_header(secret: &str, payload: &[u8]) -> String {
    format!("{}={}", SIGNATURE_SCHEME, compute_signature(secret, None, payload))
}

/// Constant-time digest comparison.
///
/// Digests of different lengths compare unequal.
pub fn signatures_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
