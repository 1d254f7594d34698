//! API error types with flat `{error, detail?}` JSON bodies.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::assistant::AssistantError;
use crate::db::DatabaseError;
use crate::journal::JournalError;
use crate::scans::UploadError;
use crate::symptom_checker::SymptomCheckError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: u64 },
    /// Upstream service failure, relayed with its status when it gave one.
    #[error("Upstream error ({status}): {error}")]
    Upstream {
        status: StatusCode,
        error: String,
        detail: Option<String>,
    },
    #[error("{0}")]
    NotConfigured(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn upstream(status: u16, error: impl Into<String>, detail: Option<String>) -> Self {
        ApiError::Upstream {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            error: error.into(),
            detail,
        }
    }

    fn bad_gateway(error: impl Into<String>, detail: Option<String>) -> Self {
        ApiError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            error: error.into(),
            detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match &self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone(), None),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone(), None),
            ApiError::RateLimited { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("Rate limit exceeded. Retry after {retry_after}s"),
                None,
            ),
            ApiError::Upstream {
                status,
                error,
                detail,
            } => {
                tracing::warn!(status = status.as_u16(), error, "Upstream call failed");
                (*status, error.clone(), detail.clone())
            }
            ApiError::NotConfigured(message) => {
                tracing::error!(reason = %message, "Service not configured");
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone(), None)
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut response = (status, Json(ErrorBody { error, detail })).into_response();
        if let ApiError::RateLimited { retry_after } = &self {
            if let Ok(val) = axum::http::HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert("Retry-After", val);
            }
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity_type, id } => {
                ApiError::NotFound(format!("{entity_type} {id} not found"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JournalError> for ApiError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::Invalid(message) => ApiError::BadRequest(message),
            JournalError::Database(e) => e.into(),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::NotConfigured(_) => ApiError::NotConfigured(err.to_string()),
            AssistantError::Upstream { status, body } => {
                ApiError::upstream(status, "OpenRouter API Error", Some(body))
            }
            AssistantError::Connection(_)
            | AssistantError::Timeout(_)
            | AssistantError::HttpClient(_) => {
                ApiError::bad_gateway("Chat provider unavailable", Some(err.to_string()))
            }
        }
    }
}

impl From<SymptomCheckError> for ApiError {
    fn from(err: SymptomCheckError) -> Self {
        match err {
            SymptomCheckError::NoSymptoms => ApiError::BadRequest(err.to_string()),
            SymptomCheckError::NotConfigured(_) => ApiError::NotConfigured(err.to_string()),
            SymptomCheckError::Upstream { status, .. } => {
                ApiError::upstream(status, err.to_string(), None)
            }
            SymptomCheckError::InvalidJson => ApiError::bad_gateway(err.to_string(), None),
            SymptomCheckError::Connection(_)
            | SymptomCheckError::Timeout(_)
            | SymptomCheckError::HttpClient(_) => {
                ApiError::bad_gateway("Symptom checker unavailable", Some(err.to_string()))
            }
        }
    }
}
