//! # API Errors
//!
//! Everything a handler can fail with ends up as `{"Error": message}` with
//! the error's declared status, or 500.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portone_core::PaymentError;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            next_action: None,
        }
    }

    pub fn with_next_action(mut self, next_action: Option<Value>) -> Self {
        self.next_action = Some(next_action.unwrap_or(Value::Null));
        self
    }
}

/// Handler failure
#[derive(Debug)]
pub enum ApiError {
    /// The provider (or input validation) failed
    Payment(PaymentError),
    /// The request body was not the JSON the handler expects
    Json(JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Payment(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Json(rejection) => rejection.status(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Payment(err) => err.to_string(),
            ApiError::Json(rejection) => rejection.body_text(),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError::Payment(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Json(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!("Request failed: status={}, error={}", status, message);
        } else {
            warn!("Request rejected: status={}, error={}", status, message);
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// `Json` extractor whose rejection renders as the error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
