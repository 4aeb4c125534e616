use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::textkernel::{Step, TextkernelError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{step} failed: {message}")]
    Upstream {
        step: Step,
        status: u16,
        message: String,
    },

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<TextkernelError> for AppError {
    fn from(err: TextkernelError) -> Self {
        match err {
            TextkernelError::Api {
                step,
                status,
                message,
            } => AppError::Upstream {
                step,
                status,
                message,
            },
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details: Option<String> = None;
        let mut upstream_status: Option<u16> = None;

        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "Missing API configuration".to_string(),
                )
            }
            AppError::Upstream {
                step,
                status,
                message,
            } => {
                tracing::error!("{step} failed with upstream status {status}: {message}");
                upstream_status = Some(*status);
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    format!("{step} failed: {message}"),
                )
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                details = Some(e.to_string());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The export could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                details = Some(e.to_string());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }
        if let Some(upstream_status) = upstream_status {
            error["upstream_status"] = json!(upstream_status);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let (status, body) = body_of(AppError::Validation("Only PDF files are supported".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Only PDF files are supported");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_upstream_surfaces_status_and_message() {
        let err: AppError = TextkernelError::Api {
            step: Step::Score,
            status: 401,
            message: "Invalid service key".to_string(),
        }
        .into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["upstream_status"], 401);
        assert_eq!(body["error"]["message"], "Scoring failed: Invalid service key");
    }

    #[tokio::test]
    async fn test_internal_includes_details() {
        let (status, body) = body_of(AppError::Internal(anyhow::anyhow!("socket closed"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal server error occurred");
        assert_eq!(body["error"]["details"], "socket closed");
    }

    #[tokio::test]
    async fn test_configuration_error_is_server_error() {
        let (status, body) = body_of(AppError::Configuration("TEXTKERNEL_API_KEY".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
    }
}
