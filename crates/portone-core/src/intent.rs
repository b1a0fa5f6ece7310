//! # Payment Intent Types
//!
//! Provider-side objects as the API receives them. Only the fields the
//! handlers branch on are typed; everything else the provider sends is kept
//! in `extra` and serialized back out untouched.

use crate::currency::Price;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payment intent status as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    Unknown(String),
}

impl IntentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            IntentStatus::RequiresPaymentMethod => "requires_payment_method",
            IntentStatus::RequiresConfirmation => "requires_confirmation",
            IntentStatus::RequiresAction => "requires_action",
            IntentStatus::Processing => "processing",
            IntentStatus::RequiresCapture => "requires_capture",
            IntentStatus::Canceled => "canceled",
            IntentStatus::Succeeded => "succeeded",
            IntentStatus::Unknown(other) => other.as_str(),
        }
    }
}

impl From<String> for IntentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "requires_payment_method" => IntentStatus::RequiresPaymentMethod,
            "requires_confirmation" => IntentStatus::RequiresConfirmation,
            "requires_action" => IntentStatus::RequiresAction,
            "processing" => IntentStatus::Processing,
            "requires_capture" => IntentStatus::RequiresCapture,
            "canceled" => IntentStatus::Canceled,
            "succeeded" => IntentStatus::Succeeded,
            _ => IntentStatus::Unknown(value),
        }
    }
}

impl From<IntentStatus> for String {
    fn from(status: IntentStatus) -> Self {
        match status {
            IntentStatus::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A paginated provider list (`{"object": "list", "data": [...], "has_more": ...}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct List<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            has_more: false,
            extra: Map::new(),
        }
    }
}

/// A customer record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A tokenized funding instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Customer the method is attached to, if any
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A charge made against a payment intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Charge {
    pub fn succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

/// An attempt to collect a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,

    /// Amount in the smallest currency unit
    #[serde(default)]
    pub amount: i64,

    #[serde(default)]
    pub currency: String,

    pub status: IntentStatus,

    #[serde(default)]
    pub customer: Option<String>,

    /// What the customer must do next (e.g. 3-D Secure), when status is `requires_action`
    #[serde(default)]
    pub next_action: Option<Value>,

    /// Charges embedded by older API versions; absent on newer ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<List<Charge>>,

    /// Unix timestamp
    #[serde(default)]
    pub created: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentIntent {
    /// True when the customer has to act (authenticate) before the intent can proceed
    pub fn requires_action(&self) -> bool {
        self.status == IntentStatus::RequiresAction
    }

    /// True when at least one embedded charge succeeded.
    ///
    /// A missing or empty charge list counts as nothing to refund.
    pub fn has_succeeded_charge(&self) -> bool {
        self.charges
            .as_ref()
            .is_some_and(|charges| charges.data.iter().any(Charge::succeeded))
    }
}

/// A reversal of a captured charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refund {
    pub id: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub status: Option<String>,
    /// Intent the refund was issued against
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How an intent gets confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationMethod {
    Automatic,
    Manual,
}

impl ConfirmationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationMethod::Automatic => "automatic",
            ConfirmationMethod::Manual => "manual",
        }
    }
}

/// Parameters for creating a payment intent
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePaymentIntent {
    pub price: Price,
    pub customer: String,
    pub payment_method: String,
    pub confirmation_method: ConfirmationMethod,
    pub description: Option<String>,
    /// Let the client SDK handle next actions
    pub use_stripe_sdk: bool,
    /// Confirm immediately on creation
    pub confirm: bool,
}

impl CreatePaymentIntent {
    /// An unconfirmed intent that is confirmed later by an explicit call
    pub fn manual(
        price: Price,
        customer: impl Into<String>,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            price,
            customer: customer.into(),
            payment_method: payment_method.into(),
            confirmation_method: ConfirmationMethod::Manual,
            description: None,
            use_stripe_sdk: true,
            confirm: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
