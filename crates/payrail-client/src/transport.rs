//! # Transport
//!
//! Issues a single HTTP request against the payment API and classifies the
//! outcome into a decoded value or a [`PaymentError`].
//!
//! Each call is one attempt bounded by the configured timeout. There are no
//! retries; see [`PaymentError::is_retryable`] if the caller wants to retry.
//!
//! A 400 maps to `Validation`, except when the body's `code` is exactly
//! `processor_error`: that case becomes `Processor` and keeps the body's
//! `processorCode`.

use crate::config::{ClientConfig, ConfigError};
use payrail_core::{PaymentError, PaymentResult, GENERIC_RESOURCE};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use tracing::{debug, error, instrument, warn};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Fixed client identifier sent as `User-Agent`
pub const CLIENT_IDENTIFIER: &str = concat!("payrail-rust/", env!("CARGO_PKG_VERSION"));

/// Body sent on mutating calls that have nothing to say
const EMPTY_JSON_OBJECT: &[u8] = b"{}";

/// HTTP transport bound to one [`ClientConfig`].
///
/// Cheap to clone; clones share the underlying connection handle.
#[derive(Debug, Clone)]
pub struct Transport {
    config: ClientConfig,
    client: Client,
}

impl Transport {
    /// Build a transport, validating the config before any network activity
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one request and decode the response.
    ///
    /// For non-GET methods the body is serialized to JSON, and a missing body
    /// is sent as `{}`. A 204 response is decoded from JSON `null`, so use
    /// `()` or `Option<_>` for endpoints without content.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> PaymentResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.url_for(path);

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.config.api_key())
            .header(USER_AGENT, CLIENT_IDENTIFIER);

        if method != Method::GET {
            let payload = match body {
                Some(body) => serde_json::to_vec(body).map_err(|e| {
                    PaymentError::api(
                        "invalid_request",
                        format!("Failed to serialize request body: {}", e),
                        0,
                    )
                })?,
                None => EMPTY_JSON_OBJECT.to_vec(),
            };
            builder = builder.body(payload);
        }

        let timeout = self.config.timeout();

        // The timer lives inside this future; dropping it on either branch
        // also drops the in-flight request.
        let (status, bytes) = match tokio::time::timeout(timeout, exchange(builder)).await {
            Err(_) => {
                warn!("Request timed out after {}ms", timeout.as_millis());
                return Err(PaymentError::timeout(format!(
                    "Request timed out after {}ms",
                    timeout.as_millis()
                )));
            }
            Ok(Err(e)) => return Err(classify_transport_error(&e, timeout.as_millis())),
            Ok(Ok(parts)) => parts,
        };

        debug!("Response received: status={}", status);

        classify_response(status, &bytes)
    }

    /// GET a resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PaymentResult<T> {
        self.request::<T, Value>(Method::GET, path, None).await
    }

    /// POST a JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> PaymentResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// POST with no body (sent as `{}`)
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> PaymentResult<T> {
        self.request::<T, Value>(Method::POST, path, None).await
    }
}

/// Send the request and buffer the body (skipped for 204)
async fn exchange(builder: RequestBuilder) -> Result<(StatusCode, Vec<u8>), reqwest::Error> {
    let response = builder.send().await?;
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok((status, Vec::new()));
    }
    let bytes = response.bytes().await?;
    Ok((status, bytes.to_vec()))
}

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default = "unknown_code")]
    code: String,
    #[serde(default = "unknown_message")]
    message: String,
    #[serde(default)]
    processor_code: Option<String>,
}

impl Default for ErrorBody {
    fn default() -> Self {
        Self {
            code: unknown_code(),
            message: unknown_message(),
            processor_code: None,
        }
    }
}

fn unknown_code() -> String {
    "unknown_error".to_string()
}

fn unknown_message() -> String {
    "An unknown error occurred".to_string()
}

/// Map a received response to a decoded value or a classified error
fn classify_response<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> PaymentResult<T> {
    if !status.is_success() {
        return Err(error_from_response(status, bytes));
    }

    let decoded = if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(bytes)
    };

    decoded.map_err(|e| {
        error!("Failed to decode response: status={}, error={}", status, e);
        PaymentError::api(
            "invalid_response",
            format!("Failed to parse response: {}", e),
            status.as_u16(),
        )
    })
}

fn error_from_response(status: StatusCode, bytes: &[u8]) -> PaymentError {
    let body: ErrorBody = serde_json::from_slice(bytes).unwrap_or_default();

    warn!(
        "API error: status={}, code={}, message={}",
        status, body.code, body.message
    );

    match status {
        StatusCode::UNAUTHORIZED => PaymentError::authentication(),
        StatusCode::BAD_REQUEST if body.code == "processor_error" => {
            PaymentError::processor(body.message, body.processor_code)
        }
        StatusCode::BAD_REQUEST => PaymentError::validation(body.message),
        StatusCode::NOT_FOUND => PaymentError::not_found(GENERIC_RESOURCE),
        StatusCode::TOO_MANY_REQUESTS => PaymentError::rate_limit(),
        other => PaymentError::api(body.code, body.message, other.as_u16()),
    }
}

/// Map a failure that happened before any response arrived
fn classify_transport_error(err: &reqwest::Error, timeout_ms: u128) -> PaymentError {
    if err.is_timeout() {
        warn!("Request timed out after {}ms", timeout_ms);
        return PaymentError::timeout(format!("Request timed out after {}ms", timeout_ms));
    }

    let message = describe(err);
    error!("Network error: {}", message);
    PaymentError::network(message)
}

/// Flatten an error and its sources into one line
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use payrail_core::ErrorKind;
    use serde_json::json;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> Transport {
        let config = ClientConfig::new("test_key_123")
            .unwrap()
            .with_base_url(server.uri());
        Transport::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_success_decodes_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/ping"))
            .and(header("X-API-Key", "test_key_123"))
            .and(header("Content-Type", "application/json"))
            .and(header("User-Agent", CLIENT_IDENTIFIER))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let value: Value = transport.get("/v1/ping").await.unwrap();

        assert_eq!(value, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_get_sends_no_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let _: Value = transport.get("/v1/anything").await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_post_without_body_sends_empty_object() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders/ord_1/pay"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ord_1" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let value: Value = transport.post_empty("/v1/orders/ord_1/pay").await.unwrap();

        assert_eq!(value["id"], "ord_1");
    }

    #[tokio::test]
    async fn test_no_content_skips_decoding() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);

        let _: () = transport.post_empty("/v1/noop").await.unwrap();

        let nothing: Option<Value> = transport.post_empty("/v1/noop").await.unwrap();
        assert!(nothing.is_none());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_generic_resource() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/orders/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "order_not_found",
                "message": "No order missing"
            })))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let err = transport.get::<Value>("/v1/orders/missing").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status(), 404);
        assert_eq!(err.message(), "Resource not found");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let mock_server = MockServer::start().await;

        Mock::given(path("/401"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "bad_key", "message": "nope"
            })))
            .mount(&mock_server)
            .await;
        Mock::given(path("/400"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "validation_error", "message": "amount must be positive"
            })))
            .mount(&mock_server)
            .await;
        Mock::given(path("/429"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;
        Mock::given(path("/409"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "order_already_paid", "message": "Order is already paid"
            })))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);

        let err = transport.get::<Value>("/401").await.unwrap_err();
        assert_eq!(err, PaymentError::authentication());

        let err = transport.get::<Value>("/400").await.unwrap_err();
        assert_eq!(err, PaymentError::validation("amount must be positive"));

        let err = transport.get::<Value>("/429").await.unwrap_err();
        assert_eq!(err, PaymentError::rate_limit());

        let err = transport.get::<Value>("/409").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.code(), "order_already_paid");
        assert_eq!(err.message(), "Order is already paid");
        assert_eq!(err.status(), 409);
    }

    #[tokio::test]
    async fn test_processor_error_carries_sub_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "processor_error",
                "message": "Card declined",
                "processorCode": "insufficient_funds"
            })))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let err = transport.post_empty::<Value>("/v1/orders/ord_1/pay").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Processor);
        assert_eq!(err.status(), 400);
        assert_eq!(err.processor_code(), Some("insufficient_funds"));
    }

    #[tokio::test]
    async fn test_other_bad_requests_stay_validation() {
        let mock_server = MockServer::start().await;

        let bodies = [
            ("/validation", json!({ "code": "validation_error", "message": "amount must be positive" })),
            ("/declined", json!({ "code": "card_declined", "message": "Card declined", "processorCode": "do_not_honor" })),
            ("/upper", json!({ "code": "PROCESSOR_ERROR", "message": "Card declined" })),
            ("/no-code", json!({ "message": "Card declined" })),
        ];
        for (route, body) in &bodies {
            Mock::given(path(*route))
                .respond_with(ResponseTemplate::new(400).set_body_json(body.clone()))
                .mount(&mock_server)
                .await;
        }
        Mock::given(path("/empty"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);

        for route in ["/validation", "/declined", "/upper", "/no-code", "/empty"] {
            let err = transport.get::<Value>(route).await.unwrap_err();

            assert_eq!(err.kind(), ErrorKind::Validation, "{}", route);
            assert_eq!(err.code(), "validation_error", "{}", route);
            assert_eq!(err.status(), 400, "{}", route);
            assert_eq!(err.processor_code(), None, "{}", route);
        }

        let err = transport.get::<Value>("/empty").await.unwrap_err();
        assert_eq!(err.message(), "An unknown error occurred");
    }

    #[tokio::test]
    async fn test_retryable_failure_is_attempted_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let err = transport.post_empty::<Value>("/v1/orders").await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(err.status(), 503);
        mock_server.verify().await;
    }

    #[tokio::test]
    async fn test_unparseable_error_body_uses_unknown_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let err = transport.get::<Value>("/v1/orders/ord_1").await.unwrap_err();

        assert_eq!(
            err,
            PaymentError::api("unknown_error", "An unknown error occurred", 502)
        );
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_invalid_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let err = transport.get::<Value>("/v1/orders/ord_1").await.unwrap_err();

        assert_eq!(err.code(), "invalid_response");
        assert_eq!(err.status(), 200);
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let config = ClientConfig::new("test_key_123")
            .unwrap()
            .with_base_url(mock_server.uri())
            .with_timeout(Duration::from_millis(100));
        let transport = Transport::new(config).unwrap();

        let started = Instant::now();
        let err = transport.get::<Value>("/v1/slow").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err.status(), 408);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Nothing listens on port 1
        let config = ClientConfig::new("test_key_123")
            .unwrap()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(5));
        let transport = Transport::new(config).unwrap();

        let err = transport.get::<Value>("/v1/orders").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), 0);
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_invalid_base_url_rejected_at_construction() {
        let config = ClientConfig::new("key").unwrap().with_base_url("::nope::");
        assert!(matches!(
            Transport::new(config),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
