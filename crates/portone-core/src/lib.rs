//! # portone-core
//!
//! Core types and traits for the portone payment API.
//!
//! This crate provides:
//! - `PaymentProvider` trait for the payment processor the API proxies to
//! - `PaymentIntent`, `Customer`, `PaymentMethod` and `Refund` as the provider returns them
//! - `Currency` and `Price` for major/minor unit conversion
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use portone_core::{CreatePaymentIntent, Currency, Price, PaymentProvider};
//!
//! let customer = provider.create_customer("buyer@example.com").await?;
//!
//! let params = CreatePaymentIntent::manual(Price::new(10.0, Currency::INR), &customer.id, "pm_card_visa");
//! let intent = provider.create_payment_intent(&params).await?;
//!
//! assert_eq!(intent.amount, 1000);
//! ```

pub mod currency;
pub mod error;
pub mod intent;
pub mod provider;

// Re-exports for convenience
pub use currency::{Currency, Price};
pub use error::{PaymentError, PaymentResult};
pub use intent::{
    Charge, ConfirmationMethod, CreatePaymentIntent, Customer, IntentStatus, List,
    PaymentIntent, PaymentMethod, Refund,
};
pub use provider::{BoxedPaymentProvider, PaymentProvider};
