// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::StorageError;
use crate::services::account::{AccountError, AuthError};
use crate::services::listing::PageError;
use crate::services::validation::ValidationError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Login required")]
    Unauthorized,

    #[error("{0}")]
    Validation(ValidationError),

    #[error("{0}")]
    Auth(AuthError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Catalog API error: {0}")]
    CatalogApi(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(e) => AppError::Validation(e),
            AccountError::Auth(e) => AppError::Auth(e),
            AccountError::NotLoggedIn => AppError::Unauthorized,
            AccountError::NotSaved(id) => AppError::NotFound(format!("Game {} is not saved", id)),
            AccountError::Storage(e) => AppError::Storage(e.to_string()),
            AccountError::Password(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.code(), Some(e.to_string())),
            AppError::Auth(e) => {
                let code = match e {
                    AuthError::UserNotFound => "user_not_found",
                    AuthError::IncorrectPassword => "incorrect_password",
                };
                (StatusCode::UNAUTHORIZED, code, Some(e.to_string()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::CatalogApi(msg) => {
                tracing::warn!(error = %msg, "Catalog API error");
                (StatusCode::BAD_GATEWAY, "catalog_error", Some(msg.clone()))
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
