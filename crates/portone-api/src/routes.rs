//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Prefix every payment route is mounted under
pub const API_PREFIX: &str = "/payment/api/v1";

/// Create the main application router
///
/// Routes:
/// - GET  / - Welcome message
/// - POST /payment/api/v1/create-payment_intent
/// - POST /payment/api/v1/capture-payment_intent/{id}
/// - POST /payment/api/v1/create-refund/{id}
/// - GET  /payment/api/v1/list-payment_intent
///
/// Anything else, including a known path with the wrong method, is a 404.
pub fn create_router(state: AppState) -> Router {
    // Any origin may call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let payment_routes = Router::new()
        .route(
            "/create-payment_intent",
            post(handlers::create_payment_intent).fallback(handlers::not_found),
        )
        .route(
            "/capture-payment_intent/{id}",
            post(handlers::capture_payment_intent).fallback(handlers::not_found),
        )
        .route(
            "/create-refund/{id}",
            post(handlers::create_refund).fallback(handlers::not_found),
        )
        .route(
            "/list-payment_intent",
            get(handlers::list_payment_intents).fallback(handlers::not_found),
        );

    Router::new()
        .route("/", get(handlers::welcome).fallback(handlers::not_found))
        .nest(API_PREFIX, payment_routes)
        .fallback(handlers::not_found)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
