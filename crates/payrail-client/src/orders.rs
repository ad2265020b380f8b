//! # Orders API
//!
//! Thin bindings of the `/v1/orders` endpoints onto the [`Transport`].

use crate::transport::Transport;
use crate::path_segment;
use payrail_core::{
    CreateOrderRequest, Order, PayOrderRequest, PaymentResult, Refund, RefundRequest, Transaction,
};
use tracing::instrument;

/// Orders resource, borrowed from a [`crate::PayrailClient`]
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    transport: &'a Transport,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// `POST /v1/orders`
    #[instrument(skip(self, request), fields(amount = request.amount, currency = %request.currency))]
    pub async fn create(&self, request: &CreateOrderRequest) -> PaymentResult<Order> {
        self.transport.post("/v1/orders", request).await
    }

    /// `GET /v1/orders/{id}`
    pub async fn get(&self, order_id: &str) -> PaymentResult<Order> {
        self.transport
            .get(&format!("/v1/orders/{}", path_segment(order_id)))
            .await
    }

    /// `POST /v1/orders/{id}/pay`
    #[instrument(skip(self, request))]
    pub async fn pay(&self, order_id: &str, request: &PayOrderRequest) -> PaymentResult<Order> {
        self.transport
            .post(&format!("/v1/orders/{}/pay", path_segment(order_id)), request)
            .await
    }

    /// `GET /v1/orders/{id}/transactions`
    pub async fn transactions(&self, order_id: &str) -> PaymentResult<Vec<Transaction>> {
        self.transport
            .get(&format!("/v1/orders/{}/transactions", path_segment(order_id)))
            .await
    }

    /// `POST /v1/orders/{id}/refund`
    #[instrument(skip(self, request), fields(amount = ?request.amount))]
    pub async fn refund(&self, order_id: &str, request: &RefundRequest) -> PaymentResult<Refund> {
        self.transport
            .post(&format!("/v1/orders/{}/refund", path_segment(order_id)), request)
            .await
    }

    /// `GET /v1/orders/{id}/refunds`
    pub async fn refunds(&self, order_id: &str) -> PaymentResult<Vec<Refund>> {
        self.transport
            .get(&format!("/v1/orders/{}/refunds", path_segment(order_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClientConfig, PayrailClient};
    use payrail_core::{
        CreateOrderRequest, ErrorKind, OrderStatus, PayOrderRequest, RefundRequest,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PayrailClient {
        let config = ClientConfig::new("test_key_123")
            .unwrap()
            .with_base_url(server.uri());
        PayrailClient::new(config).unwrap()
    }

    fn order_json(status: &str) -> serde_json::Value {
        json!({
            "id": "ord_1",
            "externalId": "cart-42",
            "amount": 2999,
            "currency": "USD",
            "status": status,
            "createdAt": "2026-01-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_create_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .and(header("X-API-Key", "test_key_123"))
            .and(body_json(json!({
                "amount": 2999,
                "currency": "USD",
                "externalId": "cart-42"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(order_json("pending")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let request = CreateOrderRequest::new(2999, "USD").with_external_id("cart-42");
        let order = client.orders().create(&request).await.unwrap();

        assert_eq!(order.id, "ord_1");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.external_id.as_deref(), Some("cart-42"));
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/orders/ord_404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.orders().get("ord_404").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status(), 404);
    }

    #[tokio::test]
    async fn test_pay_with_default_request_sends_empty_object() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders/ord_1/pay"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json("processing")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let order = client
            .orders()
            .pay("ord_1", &PayOrderRequest::default())
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_list_transactions_and_refunds() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/orders/ord_1/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "txn_1", "orderId": "ord_1", "amount": 2999, "currency": "USD",
                  "status": "failed", "processor": "adyen" },
                { "id": "txn_2", "orderId": "ord_1", "amount": 2999, "currency": "USD",
                  "status": "succeeded", "processor": "stripe", "processorReference": "pi_123" }
            ])))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/orders/ord_1/refunds"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        let transactions = client.orders().transactions("ord_1").await.unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].processor_reference.as_deref(), Some("pi_123"));

        let refunds = client.orders().refunds("ord_1").await.unwrap();
        assert!(refunds.is_empty());
    }

    #[tokio::test]
    async fn test_partial_refund() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders/ord_1/refund"))
            .and(body_json(json!({ "amount": 500, "reason": "damaged" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "re_1", "orderId": "ord_1", "amount": 500, "status": "pending"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let refund = client
            .orders()
            .refund("ord_1", &RefundRequest::partial(500).with_reason("damaged"))
            .await
            .unwrap();

        assert_eq!(refund.id, "re_1");
        assert_eq!(refund.amount, 500);
    }

    #[tokio::test]
    async fn test_order_id_is_encoded_as_one_segment() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/orders/a%2Fb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.orders().get("a/b").await.unwrap();
    }
}
