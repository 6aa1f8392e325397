use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use bridge_confirm::error::{ConfirmError, TokenError};
use bridge_core::error::ValidationError;

use crate::pipeline::PipelineError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Gone(String),
    Conflict(String),
    Unprocessable { message: String, field: Option<String> },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, field) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Gone(msg) => (StatusCode::GONE, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Unprocessable { message, field } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, field)
            }
        };

        (status, Json(ErrorBody { error, field })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Unprocessable {
            field: Some(e.field().to_string()),
            message: e.to_string(),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Unknown(_) => ApiError::NotFound(e.to_string()),
            TokenError::Expired(_) => ApiError::Gone(e.to_string()),
            TokenError::Consumed(_) => ApiError::Conflict(e.to_string()),
        }
    }
}

impl From<ConfirmError> for ApiError {
    fn from(e: ConfirmError) -> Self {
        match e {
            ConfirmError::Token(e) => e.into(),
            ConfirmError::Validation(e) => e.into(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Confirm(e) => e.into(),
            PipelineError::Validation(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        match e {
            JsonRejection::JsonDataError(e) => ApiError::Unprocessable {
                message: e.body_text(),
                field: None,
            },
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}
