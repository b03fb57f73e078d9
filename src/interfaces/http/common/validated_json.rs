//! JSON body extractor that also runs `validator` rules
//!
//! Rejections use the same failure envelope as every other handler error:
//! malformed bodies keep the status axum picked (400, 415, 422) under
//! `INVALID_JSON`, rule violations answer 422 `VALIDATION_ERROR` with one
//! `field: message` entry per broken rule, sorted by field.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiError;

pub const INVALID_JSON: &str = "INVALID_JSON";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// `Json<T>` whose payload passed `Validate::validate`.
pub struct ValidatedJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), INVALID_JSON, rejection.body_text())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();

        let message = if messages.is_empty() {
            "Validation failed".to_string()
        } else {
            messages.join("; ")
        };
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, VALIDATION_ERROR, message)
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
