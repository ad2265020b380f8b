//! # Webhook Event Types
//!
//! Events delivered asynchronously by the backend.
//! Instances are only built by parsing a webhook body; see the
//! `payrail-webhook` crate for verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Webhook event types the client knows about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WebhookEventType {
    OrderCreated,
    OrderCompleted,
    OrderFailed,
    OrderRefunded,
    CheckoutCompleted,
    CheckoutExpired,
    /// Unknown event (passthrough)
    Unknown(String),
}

impl WebhookEventType {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventType::OrderCreated => "order.created",
            WebhookEventType::OrderCompleted => "order.completed",
            WebhookEventType::OrderFailed => "order.failed",
            WebhookEventType::OrderRefunded => "order.refunded",
            WebhookEventType::CheckoutCompleted => "checkout.session.completed",
            WebhookEventType::CheckoutExpired => "checkout.session.expired",
            WebhookEventType::Unknown(other) => other,
        }
    }
}

impl From<&str> for WebhookEventType {
    fn from(value: &str) -> Self {
        match value {
            "order.created" => WebhookEventType::OrderCreated,
            "order.completed" => WebhookEventType::OrderCompleted,
            "order.failed" => WebhookEventType::OrderFailed,
            "order.refunded" => WebhookEventType::OrderRefunded,
            "checkout.session.completed" => WebhookEventType::CheckoutCompleted,
            "checkout.session.expired" => WebhookEventType::CheckoutExpired,
            other => WebhookEventType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event creation time as the backend sent it.
///
/// Kept verbatim so a parsed event serializes back to the same JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTimestamp {
    /// Epoch milliseconds
    Millis(i64),
    /// RFC 3339 or any other textual form
    Text(String),
    Other(Value),
}

impl EventTimestamp {
    /// Interpret as a UTC instant, when the representation allows it
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            EventTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            EventTimestamp::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            EventTimestamp::Other(_) => None,
        }
    }
}

/// A parsed webhook event.
///
/// Parsing accepts any JSON object: missing fields take their defaults,
/// `amount` keeps whatever number was sent, and unrecognised top-level keys
/// land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Event ID (unique per delivery subject, usable for deduplication)
    #[serde(default)]
    pub id: String,

    /// Raw event type, e.g. `order.completed`
    #[serde(default)]
    pub event_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Amount as sent; see [`WebhookEvent::amount_minor`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<EventTimestamp>,

    /// Event-specific data
    #[serde(default)]
    pub payload: Map<String, Value>,

    /// Top-level keys this type does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookEvent {
    /// Typed view of `event_type`
    pub fn kind(&self) -> WebhookEventType {
        WebhookEventType::from(self.event_type.as_str())
    }

    /// Amount in the smallest currency unit, if it was sent as an integer
    pub fn amount_minor(&self) -> Option<i64> {
        self.amount.as_ref().and_then(Number::as_i64)
    }

    /// Creation time, if `createdAt` holds RFC 3339 text or epoch milliseconds
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_ref().and_then(EventTimestamp::to_datetime)
    }
}
