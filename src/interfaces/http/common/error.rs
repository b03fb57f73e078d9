//! Domain error → HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by handlers; renders the failure envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        DomainError::not_found(entity, field, value).into()
    }

    /// Keep code and message, answer with another status.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict { .. } => StatusCode::CONFLICT,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &err {
            DomainError::Database(db_err) => {
                error!("Database error: {}", db_err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        Self {
            status,
            code: err.code(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(self.message).with_code(self.code);
        (self.status, Json(body)).into_response()
    }
}
