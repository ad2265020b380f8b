//! # Request Handlers

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use payrail_webhook::{dispatch_webhook_event, verify_with_tolerance, WebhookError};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

/// Header carrying `t=<epoch_ms>,v1=<hex>`
pub const SIGNATURE_HEADER: &str = "x-payrail-signature";

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn webhook_error_to_response(err: WebhookError) -> ErrorReply {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code).with_details(err.code());
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "payrail-receiver",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Verify a webhook and hand it to the configured handler.
///
/// The body is taken as raw bytes; re-serializing it would break the
/// signature.
#[instrument(skip_all, fields(body_len = body.len()))]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ErrorReply> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Missing X-Payrail-Signature header", 400)),
            )
        })?;

    let event = verify_with_tolerance(
        &body,
        signature,
        &state.config.webhook_secret,
        state.config.tolerance,
    )
    .map_err(|e| {
        warn!("Webhook verification failed: {}", e);
        webhook_error_to_response(e)
    })?;

    info!("Received webhook: type={}, id={}", event.event_type, event.id);

    dispatch_webhook_event(&*state.handler, &event).map_err(|e| {
        error!("Webhook handler failed for {}: {}", event.id, e);
        webhook_error_to_response(e)
    })?;

    Ok(Json(json!({ "received": true })))
}
