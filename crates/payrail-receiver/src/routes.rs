//! # Routes
//!
//! - `GET  /health`   - liveness
//! - `POST /webhooks` - signed event deliveries

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the receiver router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/webhooks", post(handlers::receive_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
