//! HTTP error type
//!
//! Every failure leaves the API as `{"error": "<message>"}`. Server-side
//! failures are logged with their cause and answered with a generic message
//! chosen by the handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Map a domain error; `fallback` replaces the message of internal errors.
    pub fn from_domain(err: DomainError, fallback: &str) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Conflict(msg) => Self::bad_request(msg),
            DomainError::Unauthorized(msg) => Self::unauthorized(msg),
            DomainError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, msg),
            DomainError::NotFound { entity, .. } => {
                Self::new(StatusCode::NOT_FOUND, format!("{} not found", entity))
            }
            DomainError::Internal(cause) => {
                error!(cause = %cause, "{}", fallback);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::Validation("bad".into()), StatusCode::BAD_REQUEST, "bad"),
            (
                DomainError::Conflict("User already exists".into()),
                StatusCode::BAD_REQUEST,
                "User already exists",
            ),
            (
                DomainError::Unauthorized("Invalid credentials".into()),
                StatusCode::UNAUTHORIZED,
                "Invalid credentials",
            ),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN, "no"),
            (DomainError::job_not_found("x"), StatusCode::NOT_FOUND, "Job not found"),
            (
                DomainError::Internal("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create job",
            ),
        ];

        for (err, status, message) in cases {
            let api = ApiError::from_domain(err, "Failed to create job");
            assert_eq!(api.status, status);
            assert_eq!(api.message, message);
        }
    }

    #[tokio::test]
    async fn body_is_error_object() {
        let response = ApiError::bad_request("Invalid email format").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Invalid email format"}));
    }
}
