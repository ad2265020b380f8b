//! # payrail-receiver
//!
//! Minimal HTTP endpoint for payrail webhooks. Verifies each delivery and
//! dispatches it to a [`WebhookHandler`](payrail_webhook::WebhookHandler).

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, ConfigError, ReceiverConfig};
