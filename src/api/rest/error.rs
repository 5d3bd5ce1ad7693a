//! # API Errors
//!
//! Maps application errors onto HTTP status codes and the
//! `{"errors": [{"details": "..."}]}` body.
//!
//! | Error                                   | Status |
//! |-----------------------------------------|--------|
//! | not found (entity, link, link target)   | 404    |
//! | field validation, malformed body        | 400    |
//! | invalid search criteria, duplicate link | 422    |
//! | infrastructure / internal               | 500    |

use crate::application::error::ApplicationError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

/// One error entry in an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable description.
    pub details: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Reported errors.
    pub errors: Vec<ErrorDetail>,
}

impl ErrorResponse {
    /// Creates a body carrying a single error.
    #[must_use]
    pub fn single(details: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorDetail {
                details: details.into(),
            }],
        }
    }
}

/// An error ready to be returned from a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    details: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    #[must_use]
    pub fn new(status: StatusCode, details: impl Into<String>) -> Self {
        Self {
            status,
            details: details.into(),
        }
    }

    /// Creates a 400 error.
    #[must_use]
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, details)
    }

    /// Creates a 404 error.
    #[must_use]
    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, details)
    }

    /// Creates the 400 error for a missing or empty top-level parameter.
    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self::bad_request(format!("param is missing or the value is empty: {name}"))
    }

    /// Returns the HTTP status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the detail message.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        if err.is_internal() {
            error!(error = %err, "request failed");
            return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }

        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_invalid_criteria() || err.is_conflict() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::single(self.details))).into_response()
    }
}
