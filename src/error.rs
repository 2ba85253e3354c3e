//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned when a required field is absent or falsy.
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Request data rejected before any storage call.
    #[error("{0}")]
    Validation(String),
    /// The gateway reported a failure; opaque to the application.
    #[error("{0}")]
    Storage(#[from] sqlx::Error),
}

impl AppError {
    pub fn missing_required_fields() -> Self {
        AppError::Validation(MISSING_REQUIRED_FIELDS.into())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Every failure is a 500 with `{"error": message}`; validation and storage
/// failures are not distinguished by status.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) => tracing::warn!(error = %msg, "request rejected"),
            AppError::Storage(e) => tracing::error!(error = %e, "storage failure"),
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
