//! # Portone Pay
//!
//! Payment intent API in front of Stripe.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export PORT=5000
//!
//! # Run the server
//! portone-pay
//! ```

use portone_api::{routes, state::AppState, API_PREFIX};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.provider.provider_name());

    let app = routes::create_router(state);

    info!("Server is running on http://{}", addr);

    if !is_prod {
        info!("Create intent: POST http://{}{}/create-payment_intent", addr, API_PREFIX);
        info!("List intents: GET http://{}{}/list-payment_intent", addr, API_PREFIX);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Portone Pay
  ━━━━━━━━━━━━━━━━━━━━━━━
  Payment intent API
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
