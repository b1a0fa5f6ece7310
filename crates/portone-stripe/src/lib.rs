//! # portone-stripe
//!
//! Stripe implementation of `PaymentProvider` for the portone payment API.
//!
//! `StripeClient` talks to the Stripe REST API directly with `reqwest`:
//! form-encoded request bodies, bearer authentication and a pinned
//! `Stripe-Version` header.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use portone_stripe::StripeClient;
//! use portone_core::PaymentProvider;
//!
//! // Create client from environment
//! let stripe = StripeClient::from_env()?;
//!
//! let intent = stripe.retrieve_payment_intent("pi_123").await?;
//! if intent.requires_action() {
//!     // hand intent.next_action back to the caller
//! }
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::StripeClient;
pub use config::StripeConfig;
