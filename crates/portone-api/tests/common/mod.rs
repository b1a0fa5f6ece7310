//! Shared test harness: an in-memory payment provider behind the real router.

#![allow(dead_code)] // Not every test file uses every helper

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use portone_api::{create_router, AppConfig, AppState};
use portone_core::{
    CreatePaymentIntent, Customer, IntentStatus, PaymentError, PaymentIntent, PaymentMethod,
    PaymentProvider, PaymentResult, Refund,
};
use serde_json::{json, Value};

pub const RETURN_URL: &str = "https://shop.example.com/return";

/// Provider double that records each call and answers from canned state.
#[derive(Default)]
pub struct MockProvider {
    /// Every call made, in order, as `name:arg:...`
    pub calls: Mutex<Vec<String>>,
    /// Params of every created intent
    pub created_intents: Mutex<Vec<CreatePaymentIntent>>,
    /// Status the intent reports after confirmation
    pub confirm_status: Option<String>,
    /// Intent returned by retrieve
    pub stored_intent: Option<Value>,
    /// Intents returned by list
    pub intents: Vec<Value>,
    /// When set, every call fails with this error
    pub failure: Option<(Option<u16>, String)>,
}

impl MockProvider {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(name))
    }

    pub fn created_intents(&self) -> Vec<CreatePaymentIntent> {
        self.created_intents.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> PaymentResult<()> {
        self.calls.lock().unwrap().push(call.into());
        match &self.failure {
            Some((status, message)) => Err(PaymentError::Provider {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn intent(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "object": "payment_intent",
        "amount": 1000,
        "currency": "inr",
        "status": status,
        "customer": "cus_1",
        "next_action": null
    })
}

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> PaymentResult<T> {
    serde_json::from_value(value).map_err(|e| PaymentError::Serialization(e.to_string()))
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn create_customer(&self, email: &str) -> PaymentResult<Customer> {
        self.record(format!("create_customer:{}", email))?;
        parse(json!({ "id": "cus_new", "email": email }))
    }

    async fn create_card_payment_method(&self, token: &str) -> PaymentResult<PaymentMethod> {
        self.record(format!("create_card_payment_method:{}", token))?;
        parse(json!({ "id": "pm_new", "type": "card", "customer": null }))
    }

    async fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> PaymentResult<PaymentMethod> {
        self.record(format!("attach_payment_method:{}:{}", payment_method_id, customer_id))?;
        parse(json!({ "id": payment_method_id, "type": "card", "customer": customer_id }))
    }

    async fn create_payment_intent(
        &self,
        params: &CreatePaymentIntent,
    ) -> PaymentResult<PaymentIntent> {
        self.record("create_payment_intent")?;
        self.created_intents.lock().unwrap().push(params.clone());
        parse(json!({
            "id": "pi_new",
            "object": "payment_intent",
            "amount": params.price.amount,
            "currency": params.price.currency.as_str(),
            "status": "requires_confirmation",
            "customer": params.customer,
            "payment_method": params.payment_method,
            "client_secret": "pi_new_secret"
        }))
    }

    async fn confirm_payment_intent(
        &self,
        intent_id: &str,
        return_url: &str,
    ) -> PaymentResult<PaymentIntent> {
        self.record(format!("confirm_payment_intent:{}:{}", intent_id, return_url))?;
        let status = self.confirm_status.as_deref().unwrap_or("requires_capture");
        let mut body = intent(intent_id, status);
        if status == IntentStatus::RequiresAction.as_str() {
            body["next_action"] = json!({
                "type": "redirect_to_url",
                "redirect_to_url": { "url": "https://hooks.stripe.com/3d_secure" }
            });
        }
        parse(body)
    }

    async fn capture_payment_intent(&self, intent_id: &str) -> PaymentResult<PaymentIntent> {
        self.record(format!("capture_payment_intent:{}", intent_id))?;
        parse(intent(intent_id, "succeeded"))
    }

    async fn retrieve_payment_intent(&self, intent_id: &str) -> PaymentResult<PaymentIntent> {
        self.record(format!("retrieve_payment_intent:{}", intent_id))?;
        parse(
            self.stored_intent
                .clone()
                .unwrap_or_else(|| intent(intent_id, "succeeded")),
        )
    }

    async fn create_refund(&self, payment_intent_id: &str) -> PaymentResult<Refund> {
        self.record(format!("create_refund:{}", payment_intent_id))?;
        parse(json!({
            "id": "re_1",
            "object": "refund",
            "amount": 1000,
            "status": "succeeded",
            "payment_intent": payment_intent_id
        }))
    }

    async fn list_payment_intents(&self) -> PaymentResult<Vec<PaymentIntent>> {
        self.record("list_payment_intents")?;
        self.intents.iter().cloned().map(parse::<PaymentIntent>).collect()
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Test server wired to a mock provider the test can inspect afterwards.
pub struct TestHarness {
    pub server: TestServer,
    pub provider: Arc<MockProvider>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_provider(MockProvider::default())
    }

    pub fn with_provider(provider: MockProvider) -> Self {
        let provider = Arc::new(provider);

        let mut config = AppConfig::new("127.0.0.1", 0);
        config.return_url = RETURN_URL.to_string();

        let state = AppState::with_provider(provider.clone(), config);
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        Self { server, provider }
    }
}
