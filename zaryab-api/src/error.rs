//! Error types for zaryab-api
//!
//! Error bodies follow the shape CMS front-ends already parse:
//! `{"code": ..., "message": ..., "data": {"status": ...}}`. Conflict and
//! failure responses of the newsletter endpoint carry only a `message`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Slug or id does not resolve to an item of the expected type (404)
    #[error("{message}")]
    NotFound {
        code: &'static str,
        message: String,
    },

    /// Request parameter failed validation (400)
    #[error("Invalid parameter(s): {param}")]
    InvalidParam {
        param: &'static str,
        message: String,
    },

    /// Resource already exists (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Write failed (500), reported without detail
    #[error("{0}")]
    Failure(String),

    /// zaryab-common error
    #[error("Common error: {0}")]
    Common(#[from] zaryab_common::Error),
}

impl ApiError {
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound { code, message } => (
                StatusCode::NOT_FOUND,
                json!({
                    "code": code,
                    "message": message,
                    "data": { "status": 404 },
                }),
            ),
            ApiError::InvalidParam { param, message } => {
                let mut params = serde_json::Map::new();
                params.insert(param.to_string(), message.into());
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "code": "rest_invalid_param",
                        "message": format!("Invalid parameter(s): {}", param),
                        "data": {
                            "status": 400,
                            "params": params,
                        },
                    }),
                )
            }
            ApiError::Conflict(message) => (StatusCode::CONFLICT, json!({ "message": message })),
            ApiError::Failure(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": message }))
            }
            ApiError::Common(err) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "code": "internal_error",
                        "message": "Internal server error",
                        "data": { "status": 500 },
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
