//! Error types for the gateway.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sakura_ml::MlError;
use thiserror::Error;

/// Errors surfaced to HTTP callers as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, unknown field, or wrongly-typed value.
    #[error("{0}")]
    BadRequest(String),

    /// The model could not produce a usable answer.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<MlError> for ApiError {
    fn from(e: MlError) -> Self {
        match e {
            MlError::InvalidInput(msg) => Self::BadRequest(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_ml_errors() {
        let e: ApiError = MlError::invalid_input("bad mood").into();
        assert!(matches!(e, ApiError::BadRequest(ref m) if m == "bad mood"));

        let e: ApiError = MlError::inference("score overflowed").into();
        assert!(matches!(e, ApiError::Internal(ref m) if m.contains("score overflowed")));
    }

    #[test]
    fn test_serde_errors_are_client_errors() {
        let err = serde_json::from_str::<u32>("\"seven\"").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_response_body() {
        let resp = ApiError::BadRequest("missing brace".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(resp.into_body(), 10_000)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "missing brace");
    }
}
