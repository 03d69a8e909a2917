//! HTTP error responses.
//!
//! Every failed request is rendered as:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": { ... } } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::LinkError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Unavailable { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Unavailable { message, details } => {
                ("service_unavailable", message, details)
            }
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl From<LinkError> for AppError {
    fn from(e: LinkError) -> Self {
        let message = e.to_string();
        let kind = e.kind();

        match e {
            LinkError::Validation(_) | LinkError::InvalidFilter(_) => {
                AppError::bad_request(message, json!({ "kind": kind }))
            }
            LinkError::QuotaExceeded { owner, max } => AppError::bad_request(
                message,
                json!({ "kind": kind, "owner": owner, "max_links_per_user": max }),
            ),
            LinkError::InvalidOwner(owner) => {
                AppError::bad_request(message, json!({ "kind": kind, "owner": owner }))
            }
            LinkError::DuplicateLink { owner, url } => {
                AppError::conflict(message, json!({ "kind": kind, "owner": owner, "url": url }))
            }
            LinkError::NotFound { owner, url } => {
                AppError::not_found(message, json!({ "kind": kind, "owner": owner, "url": url }))
            }
            LinkError::StoreUnavailable(_) | LinkError::SocialGraphUnavailable(_) => {
                tracing::error!(error = %message, kind, "Dependency unavailable");
                AppError::unavailable("Dependency unavailable", json!({ "kind": kind }))
            }
            LinkError::EventPublishFailed(_) => {
                tracing::error!(error = %message, kind, "Unexpected error");
                AppError::internal("Internal error", json!({ "kind": kind }))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
