//! # Webhook Dispatch
//!
//! Route verified events to per-type hooks.

use crate::error::WebhookError;
use payrail_core::{WebhookEvent, WebhookEventType};
use tracing::{debug, info, warn};

/// Webhook event handler trait
///
/// Implement this trait to react to events. Every hook defaults to logging,
/// so implementors only override what they care about.
#[allow(unused_variables)]
pub trait WebhookHandler: Send + Sync {
    fn on_order_created(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        info!("Order created: {:?}", event.order_id);
        Ok(())
    }

    /// Called when an order is fully paid
    fn on_order_completed(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        info!(
            "Order completed: order={:?}, amount={:?} {}",
            event.order_id,
            event.amount_minor(),
            event.currency.as_deref().unwrap_or("")
        );
        Ok(())
    }

    fn on_order_failed(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        warn!(
            "Order failed: order={:?}, processor={:?}",
            event.order_id, event.processor
        );
        Ok(())
    }

    fn on_order_refunded(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        info!("Order refunded: order={:?}, amount={:?}", event.order_id, event.amount_minor());
        Ok(())
    }

    /// Called when a hosted checkout session is paid
    fn on_checkout_completed(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        info!("Checkout completed: order={:?}", event.order_id);
        Ok(())
    }

    fn on_checkout_expired(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        debug!("Checkout expired: order={:?}", event.order_id);
        Ok(())
    }

    /// Called for unknown/unhandled events
    fn on_unknown_event(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        debug!("Unhandled webhook event: {}", event.event_type);
        Ok(())
    }
}

/// Default webhook handler (just logs events)
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {}

/// Dispatch a webhook event to the appropriate handler method
pub fn dispatch_webhook_event(
    handler: &dyn WebhookHandler,
    event: &WebhookEvent,
) -> Result<(), WebhookError> {
    match event.kind() {
        WebhookEventType::OrderCreated => handler.on_order_created(event),
        WebhookEventType::OrderCompleted => handler.on_order_completed(event),
        WebhookEventType::OrderFailed => handler.on_order_failed(event),
        WebhookEventType::OrderRefunded => handler.on_order_refunded(event),
        WebhookEventType::CheckoutCompleted => handler.on_checkout_completed(event),
        WebhookEventType::CheckoutExpired => handler.on_checkout_expired(event),
        WebhookEventType::Unknown(_) => handler.on_unknown_event(event),
    }
}
