//! Error taxonomy surfaced by the service core.
//!
//! The core propagates the distinguished kind and nothing else: no logging,
//! no retries, no silent degradation apart from the documented pagination
//! default fallback (which is not an error at all). The HTTP status mapping
//! lives here so the REST layer stays a thin translation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::hooks::HookError;
use crate::store::StoreError;

/// Result type for service operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a CRUD or list operation can surface
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Document fails schema constraints at create/update
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Identifier has no matching (visible) document
    #[error("Resource not found")]
    NotFound,

    /// Explicitly requested page starts at or past the last matching
    /// document
    #[error("This page does not exist (skip {skip} >= total {total})")]
    PageOutOfRange { skip: u64, total: u64 },

    /// A lifecycle hook vetoed the operation
    #[error("Operation aborted by hook: {0}")]
    HookAbort(String),

    /// Filter document the store cannot evaluate
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Unexpected failure inside the store
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::HookAbort(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PageOutOfRange { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HookError> for ApiError {
    fn from(err: HookError) -> Self {
        ApiError::HookAbort(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => {
                ApiError::Validation(format!("duplicate value for unique field: {}", field))
            }
            StoreError::InvalidFilter(detail) => ApiError::InvalidFilter(detail),
            StoreError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

/// Failure envelope: `{"status": "fail", "error": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            status: "fail",
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody::from(&self));
        (status, body).into_response()
    }
}
