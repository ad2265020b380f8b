//! # payrail-core
//!
//! Core types for the payrail payment client.
//!
//! This crate provides:
//! - `PaymentError` and `ErrorKind`, the closed error taxonomy every API call reports
//! - `Order`, `Transaction`, `Refund` and their request bodies
//! - `CheckoutSession` and `CreateCheckoutSessionRequest`
//! - `WebhookEvent`, the payload of asynchronously delivered notifications
//!
//! ## Example
//!
//! ```rust,ignore
//! use payrail_core::{ErrorKind, PaymentError};
//!
//! match client.orders().get("ord_123").await {
//!     Ok(order) => println!("status: {:?}", order.status),
//!     Err(err) if err.kind() == ErrorKind::NotFound => println!("no such order"),
//!     Err(err) => eprintln!("{} ({}): {}", err.code(), err.status(), err.message()),
//! }
//! ```

pub mod checkout;
pub mod error;
pub mod event;
pub mod order;

// Re-exports for convenience
pub use checkout::{CheckoutSession, CreateCheckoutSessionRequest};
pub use error::{ErrorKind, PaymentError, PaymentResult, GENERIC_RESOURCE};
pub use event::{EventTimestamp, WebhookEvent, WebhookEventType};
pub use order::{
    CreateOrderRequest, Order, OrderStatus, PayOrderRequest, Refund, RefundRequest, Transaction,
};
