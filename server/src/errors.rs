use std::env::VarError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tripboard_core::CoreError;

/// Failures that stop the server from starting or serving
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Missing or invalid environment variable {1}: {0}")]
    EnvError(VarError, String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot serve: {0}")]
    CannotServe(std::io::Error),
}

/// Request-level errors, rendered as `{ "error": ... }`
#[derive(Debug, Error)]
pub enum RestError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Authorization header is missing")]
    Unauthorized,
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RestResult<T> = Result<T, RestError>;

impl From<CoreError> for RestError {
    fn from(error: CoreError) -> Self {
        RestError::BadRequest(error.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = match &self {
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RestError::Unauthorized => StatusCode::UNAUTHORIZED,
            RestError::Internal(message) => {
                tracing::error!(error = %message, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
