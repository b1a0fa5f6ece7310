//! # Payment Provider Trait
//!
//! The payment processor the API forwards to. The HTTP layer only ever talks
//! to this trait, so tests swap in an in-memory implementation while the
//! binary uses the Stripe client.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PaymentProvider (trait)                    │
//! │  ├── create_customer()         ├── confirm_payment_intent() │
//! │  ├── create_card_payment_method├── capture_payment_intent() │
//! │  ├── attach_payment_method()   ├── retrieve_payment_intent()│
//! │  ├── create_payment_intent()   ├── create_refund()          │
//! │  └── provider_name()           └── list_payment_intents()   │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │ StripeClient  │
//!                    └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::intent::{CreatePaymentIntent, Customer, PaymentIntent, PaymentMethod, Refund};
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the API needs from a payment processor.
///
/// Every call maps to exactly one provider round trip, except
/// `list_payment_intents` which may page through several.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a customer record keyed by email.
    async fn create_customer(&self, email: &str) -> PaymentResult<Customer>;

    /// Create a card payment method from a card token (e.g. `tok_visa`).
    async fn create_card_payment_method(&self, token: &str) -> PaymentResult<PaymentMethod>;

    /// Attach a payment method to a customer.
    async fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> PaymentResult<PaymentMethod>;

    /// Create a payment intent.
    async fn create_payment_intent(
        &self,
        params: &CreatePaymentIntent,
    ) -> PaymentResult<PaymentIntent>;

    /// Confirm a payment intent.
    ///
    /// # Arguments
    /// * `intent_id` - The intent to confirm
    /// * `return_url` - Where the customer lands after any required authentication
    async fn confirm_payment_intent(
        &self,
        intent_id: &str,
        return_url: &str,
    ) -> PaymentResult<PaymentIntent>;

    /// Capture the funds of a confirmed intent.
    async fn capture_payment_intent(&self, intent_id: &str) -> PaymentResult<PaymentIntent>;

    /// Fetch the current state of an intent.
    async fn retrieve_payment_intent(&self, intent_id: &str) -> PaymentResult<PaymentIntent>;

    /// Refund the captured amount of an intent.
    async fn create_refund(&self, payment_intent_id: &str) -> PaymentResult<Refund>;

    /// List every payment intent the provider knows about.
    async fn list_payment_intents(&self) -> PaymentResult<Vec<PaymentIntent>>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
