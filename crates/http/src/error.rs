//! Error handling for the catalog HTTP layer

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub const NOT_FOUND_MESSAGE: &str = "Not found";
pub const BAD_REQUEST_MESSAGE: &str = "Mauvaise requete";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server Error";
pub const TIMEOUT_MESSAGE: &str = "Request Timeout";

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error; `detail` is logged, never returned
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    /// Create a bad request error; `detail` is logged, never returned
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => NOT_FOUND_MESSAGE,
            AppError::BadRequest(_) => BAD_REQUEST_MESSAGE,
            AppError::Timeout => TIMEOUT_MESSAGE,
            AppError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

// Ids are integer-typed; a path that does not parse matches no record.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::not_found(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::now_v7();
        let status = self.status();

        match &self {
            AppError::Internal(e) => tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = ?e,
                "Request error"
            ),
            other => tracing::warn!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                detail = %other,
                "Request error"
            ),
        }

        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.public_message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Fallback handler for unmatched routes
pub async fn not_found_fallback() -> AppError {
    AppError::not_found("no route matched")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_mapping() {
        let response = AppError::not_found("livre 42").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": 404, "message": "Not found"})
        );
    }

    #[tokio::test]
    async fn test_bad_request_mapping() {
        let response = AppError::bad_request("expected value at line 1").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], 400);
        assert_eq!(body["message"], "Mauvaise requete");
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let internal_error = anyhow::anyhow!("UNIQUE constraint failed: livres.isbn");
        let response = AppError::from(internal_error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 500);
        assert_eq!(body["message"], "Internal server Error");
    }
}
