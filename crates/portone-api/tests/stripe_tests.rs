//! Router tests with the real Stripe client pointed at a mock Stripe API.

use std::sync::Arc;

use axum_test::TestServer;
use portone_api::{create_router, AppConfig, AppState};
use portone_stripe::{StripeClient, StripeConfig};
use serde_json::{json, Value};
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_for(stripe: &MockServer) -> TestServer {
    let config = StripeConfig::new("sk_test_portone").with_api_base_url(stripe.uri());
    let client = StripeClient::new(config).unwrap();

    let state = AppState::with_provider(Arc::new(client), AppConfig::new("127.0.0.1", 0));
    TestServer::new(create_router(state)).unwrap()
}

async fn mount_customers_trap(stripe: &MockServer) {
    Mock::given(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cus_leak" })))
        .expect(0)
        .mount(stripe)
        .await;
}

#[tokio::test]
async fn capture_id_cannot_reach_another_resource() {
    let stripe = MockServer::start().await;
    mount_customers_trap(&stripe).await;
    let server = server_for(&stripe).await;

    let response = server
        .post("/payment/api/v1/capture-payment_intent/..%2Fcustomers%3Fx%3D")
        .await;

    // The encoded id matches nothing on the mock, which answers 404
    response.assert_status_not_found();
    assert!(response.json::<Value>()["Error"].is_string());

    let requests = stripe.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url.path(),
        "/v1/payment_intents/..%2Fcustomers%3Fx=/confirm"
    );
}

#[tokio::test]
async fn refund_id_cannot_reach_another_resource() {
    let stripe = MockServer::start().await;
    mount_customers_trap(&stripe).await;
    let server = server_for(&stripe).await;

    let response = server
        .post("/payment/api/v1/create-refund/..%2Fcustomers")
        .await;

    response.assert_status_not_found();
    let requests = stripe.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/v1/payment_intents/..%2Fcustomers");
}

#[tokio::test]
async fn capture_passes_through_stripe_intent() {
    let stripe = MockServer::start().await;
    let intent = |status: &str| {
        json!({
            "id": "pi_1",
            "object": "payment_intent",
            "amount": 1000,
            "currency": "inr",
            "status": status,
            "next_action": null,
            "client_secret": "pi_1_secret"
        })
    };
    Mock::given(path("/v1/payment_intents/pi_1/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intent("requires_capture")))
        .expect(1)
        .mount(&stripe)
        .await;
    Mock::given(path("/v1/payment_intents/pi_1/capture"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intent("succeeded")))
        .expect(1)
        .mount(&stripe)
        .await;
    let server = server_for(&stripe).await;

    let response = server
        .post("/payment/api/v1/capture-payment_intent/pi_1")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["paymentIntent"]["status"], "succeeded");
    assert_eq!(body["paymentIntent"]["client_secret"], "pi_1_secret");
}
