//! Unified error types for the debate service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("{0}")]
    InvalidField(String),

    #[error("User has already voted on this item")]
    DuplicateVote,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid JSON body")]
    MalformedBody,

    #[error("duplicate record id: {0}")]
    DuplicateId(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields
            | AppError::InvalidField(_)
            | AppError::DuplicateVote
            | AppError::MalformedBody => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateId(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            // Cause stays in the log, never in the body.
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
