// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Authorization header missing or not a Bearer credential.
    #[error("Unauthorized")]
    Unauthorized,

    /// Same as `Unauthorized` but without a detail message in the body.
    #[error("Unauthorized")]
    MissingCredentials,

    #[error("Invalid Session")]
    InvalidSession,

    #[error("User not found")]
    ProfileNotFound,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::MissingCredentials | AppError::InvalidSession => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ProfileNotFound => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error, detail) = match &self {
            AppError::Unauthorized => ("unauthorized", Some("Unauthorized".to_string())),
            AppError::MissingCredentials => ("unauthorized", None),
            AppError::InvalidSession => ("invalid_session", Some("Invalid Session".to_string())),
            AppError::ProfileNotFound => ("profile_not_found", Some("User not found".to_string())),
            AppError::BadRequest(msg) => ("bad_request", Some(msg.clone())),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                ("database_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            detail,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
