//! # Checkout Session Types
//!
//! Wire types for the `/v1/checkout/sessions` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body for `POST /v1/checkout/sessions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    /// Existing order to collect payment for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Amount in smallest currency unit (when no order exists yet)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// URL to redirect after successful payment
    pub success_url: String,

    /// URL to redirect if customer cancels
    pub cancel_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl CreateCheckoutSessionRequest {
    /// Session for an order that already exists
    pub fn for_order(
        order_id: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            order_id: Some(order_id.into()),
            amount: None,
            currency: None,
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
            customer_email: None,
            metadata: HashMap::new(),
        }
    }

    /// Session that creates its order from an amount
    pub fn for_amount(
        amount: i64,
        currency: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            order_id: None,
            amount: Some(amount),
            currency: Some(currency.into()),
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
            customer_email: None,
            metadata: HashMap::new(),
        }
    }

    /// Builder: prefill customer email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Builder: add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A hosted checkout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub id: String,

    /// URL to redirect the customer to
    #[serde(default)]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// `open`, `complete` or `expired`
    #[serde(default)]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CheckoutSession {
    /// Check if session is still usable
    pub fn is_active(&self) -> bool {
        self.status == "open" && self.expires_at.map(|exp| exp > Utc::now()).unwrap_or(true)
    }
}
