//! # Payment Error Types
//!
//! Typed error handling for the portone payment API.
//! All provider operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data, rejected before reaching the provider
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider API error.
    ///
    /// `status` is the HTTP status the provider answered with, when it declared one.
    #[error("{message}")]
    Provider { status: Option<u16>, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// The HTTP status this error declares, if any
    pub fn declared_status(&self) -> Option<u16> {
        match self {
            PaymentError::InvalidRequest(_) => Some(400),
            PaymentError::Provider { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the HTTP status code for this error: the declared one, or 500
    pub fn status_code(&self) -> u16 {
        self.declared_status().unwrap_or(500)
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
