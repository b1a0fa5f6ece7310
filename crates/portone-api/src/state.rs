//! # Application State
//!
//! Shared state for the Axum application: the payment provider handle and
//! the listener configuration.

use anyhow::Context;
use portone_core::BoxedPaymentProvider;
use portone_stripe::StripeClient;
use std::sync::Arc;

/// Return URL sent when confirming an intent, unless overridden
pub const DEFAULT_RETURN_URL: &str = "https://portone.example.com/payment/return";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Where the customer is sent back to after authenticating a confirmation
    pub return_url: String,
}

impl AppConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            environment: "development".to_string(),
            return_url: DEFAULT_RETURN_URL.to_string(),
        }
    }

    /// Load from environment variables. `PORT` is required.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = var("PORT").context("PORT not set")?;
        let port = port
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT is not a valid port number: {}", port))?;

        let mut config = Self::new(var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()), port);
        if let Some(environment) = var("ENVIRONMENT") {
            config.environment = environment;
        }
        if let Some(return_url) = var("PAYMENT_RETURN_URL") {
            config.return_url = return_url;
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider every handler forwards to
    pub provider: BoxedPaymentProvider,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Stripe, configured from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let stripe = StripeClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        if stripe.config().is_live_mode() {
            tracing::warn!("Stripe is running with a live key");
        } else {
            tracing::info!("Stripe is running in test mode");
        }

        Ok(Self::with_provider(Arc::new(stripe), config))
    }

    /// Create state around an existing provider
    pub fn with_provider(provider: BoxedPaymentProvider, config: AppConfig) -> Self {
        Self { provider, config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_vars(vars(&[("PORT", "5000")])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.return_url, DEFAULT_RETURN_URL);
        assert!(!config.is_production());
    }

    #[test]
    fn test_app_config_overrides() {
        let config = AppConfig::from_vars(vars(&[
            ("PORT", "8081"),
            ("HOST", "127.0.0.1"),
            ("ENVIRONMENT", "production"),
            ("PAYMENT_RETURN_URL", "https://shop.example.com/done"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.return_url, "https://shop.example.com/done");
        assert!(config.is_production());
    }

    #[test]
    fn test_port_is_required() {
        let err = AppConfig::from_vars(vars(&[])).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(AppConfig::from_vars(vars(&[("PORT", "eighty")])).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig::new("0.0.0.0", 3000);
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
