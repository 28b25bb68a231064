//! Unified error handling
//!
//! Client-class errors (validation, unknown slot, capacity) carry their
//! message verbatim into the response body; server-class errors are logged
//! and surfaced as a generic message without leaking internals. Every error
//! response is `{ "error": <message> }`, the shape the booking front end
//! expects.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::ledger::LedgerError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    InvalidSlot(String),

    #[error("{0}")]
    CapacityExceeded(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Payment session failed: {0}")]
    Payment(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidSlot(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::CapacityExceeded(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Payment(msg) => {
                tracing::error!(error = %msg, "Payment session creation failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Payment session could not be created".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody { error: message };
        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InvalidSlot { .. } => AppError::InvalidSlot(message),
            LedgerError::CapacityExceeded { .. } => AppError::CapacityExceeded(message),
            LedgerError::Storage(storage) => AppError::Internal(anyhow::Error::new(storage)),
        }
    }
}

/// Handler result type alias
pub type AppResult<T> = Result<T, AppError>;
