//! # Request Handlers
//!
//! Axum request handlers for the payment API. Each one forwards to the
//! payment provider and shapes what comes back; failures propagate as
//! `ApiError`.

use crate::error::{ApiError, ApiJson, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portone_core::{CreatePaymentIntent, Currency, PaymentError, PaymentIntent, Price, Refund};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

pub const WELCOME_MESSAGE: &str = "Welcome to Portone API 💖";

/// Test card token the customer's payment method is created from
pub const TEST_CARD_TOKEN: &str = "tok_visa";

/// Payment method the intent is created with.
///
/// This is the provider's shared test method, not the one created and
/// attached to the customer in the same request. Existing test fixtures
/// depend on it.
pub const INTENT_PAYMENT_METHOD: &str = "pm_card_visa";

pub const INTENT_CURRENCY: Currency = Currency::INR;

pub const INTENT_DESCRIPTION: &str = "Payment for your order from portone";

pub const REFUND_REQUIRES_ACTION: &str =
    "Payment intent requires further action, refund not possible";

pub const REFUND_NO_SUCCESSFUL_CHARGE: &str =
    "No successful charge found for this payment intent";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment intent request
#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Customer email
    pub email: String,
    /// Amount in major currency units
    pub amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub payment_intent: PaymentIntent,
}

/// Capture outcome: either the captured intent, or what the customer must do first
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CaptureResponse {
    RequiresAction {
        requires_action: bool,
        next_action: Option<Value>,
    },
    Captured(PaymentIntentResponse),
}

#[derive(Debug, Serialize)]
pub struct RefundResponse {
    pub refund: Refund,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentListResponse {
    pub payment_intents: Vec<PaymentIntent>,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn welcome() -> impl IntoResponse {
    Json(serde_json::json!({ "message": WELCOME_MESSAGE }))
}

/// Fallback for every unmatched path or method
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Page not found")))
}

/// Create a customer with an attached test card, then a manually confirmed
/// payment intent for them.
///
/// Nothing is rolled back if a later step fails.
#[instrument(skip(state, request))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreatePaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(PaymentError::InvalidRequest(format!(
            "amount must be a positive number, got {}",
            request.amount
        ))
        .into());
    }

    let provider = &state.provider;
    let price = Price::new(request.amount, INTENT_CURRENCY);

    let customer = provider.create_customer(&request.email).await?;

    let payment_method = provider.create_card_payment_method(TEST_CARD_TOKEN).await?;
    provider
        .attach_payment_method(&payment_method.id, &customer.id)
        .await?;
    debug!(
        "Attached payment method {} to customer {}",
        payment_method.id, customer.id
    );

    let params = CreatePaymentIntent::manual(price, &customer.id, INTENT_PAYMENT_METHOD)
        .with_description(INTENT_DESCRIPTION);
    let payment_intent = provider.create_payment_intent(&params).await?;

    info!(
        "Created payment intent: id={}, customer={}, amount={} {}",
        payment_intent.id, customer.id, price.amount, price.currency
    );

    Ok(Json(PaymentIntentResponse { payment_intent }))
}

/// Confirm an intent and, unless the customer still has to act, capture it.
#[instrument(skip(state))]
pub async fn capture_payment_intent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CaptureResponse>, ApiError> {
    let confirmed = state
        .provider
        .confirm_payment_intent(&id, &state.config.return_url)
        .await?;

    if confirmed.requires_action() {
        info!("Payment intent {} requires action, not capturing", id);
        return Ok(Json(CaptureResponse::RequiresAction {
            requires_action: true,
            next_action: confirmed.next_action,
        }));
    }

    let payment_intent = state.provider.capture_payment_intent(&id).await?;
    info!(
        "Captured payment intent: id={}, status={}",
        payment_intent.id, payment_intent.status
    );

    Ok(Json(CaptureResponse::Captured(PaymentIntentResponse {
        payment_intent,
    })))
}

/// Refund an intent that has a successful charge.
///
/// Intents still waiting on the customer, and intents without a successful
/// charge, are refused with 400.
#[instrument(skip(state))]
pub async fn create_refund(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let intent = state.provider.retrieve_payment_intent(&id).await?;

    if intent.requires_action() {
        info!("Refusing refund for {}: intent requires action", id);
        let body = ErrorResponse::new(REFUND_REQUIRES_ACTION).with_next_action(intent.next_action);
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    if !intent.has_succeeded_charge() {
        info!("Refusing refund for {}: no successful charge", id);
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(REFUND_NO_SUCCESSFUL_CHARGE)),
        )
            .into_response());
    }

    let refund = state.provider.create_refund(&intent.id).await?;
    info!("Refunded payment intent {}: refund={}", intent.id, refund.id);

    Ok(Json(RefundResponse { refund }).into_response())
}

/// List every payment intent the provider knows about
#[instrument(skip(state))]
pub async fn list_payment_intents(
    State(state): State<AppState>,
) -> Result<Json<PaymentIntentListResponse>, ApiError> {
    let payment_intents = state.provider.list_payment_intents().await?;
    debug!("Listing {} payment intents", payment_intents.len());

    Ok(Json(PaymentIntentListResponse { payment_intents }))
}
