//! # Checkout Sessions API
//!
//! Hosted checkout sessions. Redirect the customer to `session.url`.

use crate::path_segment;
use crate::transport::Transport;
use payrail_core::{CheckoutSession, CreateCheckoutSessionRequest, PaymentResult};
use tracing::{info, instrument};

/// Checkout resource, borrowed from a [`crate::PayrailClient`]
#[derive(Debug, Clone, Copy)]
pub struct Checkout<'a> {
    transport: &'a Transport,
}

impl<'a> Checkout<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// `POST /v1/checkout/sessions`
    #[instrument(skip(self, request), fields(order_id = ?request.order_id))]
    pub async fn create_session(
        &self,
        request: &CreateCheckoutSessionRequest,
    ) -> PaymentResult<CheckoutSession> {
        let session: CheckoutSession = self.transport.post("/v1/checkout/sessions", request).await?;

        info!("Created checkout session: id={}, url={}", session.id, session.url);

        Ok(session)
    }

    /// `GET /v1/checkout/sessions/{id}`
    pub async fn get_session(&self, session_id: &str) -> PaymentResult<CheckoutSession> {
        self.transport
            .get(&format!("/v1/checkout/sessions/{}", path_segment(session_id)))
            .await
    }
}
