//! # portone-api
//!
//! HTTP API layer for the portone payment API.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Endpoints that forward payment intent operations to the configured `PaymentProvider`
//! - A uniform `{"Error": message}` envelope for failures
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Welcome message |
//! | POST | `/payment/api/v1/create-payment_intent` | Create customer, card and payment intent |
//! | POST | `/payment/api/v1/capture-payment_intent/{id}` | Confirm and capture an intent |
//! | POST | `/payment/api/v1/create-refund/{id}` | Refund a captured intent |
//! | GET | `/payment/api/v1/list-payment_intent` | List all payment intents |

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::{create_router, API_PREFIX};
pub use state::{AppConfig, AppState};
