//! HTTP error type for the REST endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::domains::bills::PipelineError;
use crate::kernel::AnalyzerError;

/// Errors surfaced by the REST handlers.
///
/// Client-input problems map to 400; extraction, AI and persistence
/// failures map to 500 with a short generic message. Failure details go
/// to the logs, never to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Only PDF, JPG, PNG allowed")]
    UnsupportedMediaType,

    #[error("File exceeds 25 MB limit")]
    PayloadTooLarge,

    #[error("malformed multipart upload: {0}")]
    BadUpload(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Internal failure with a client-facing summary line.
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Wrap an internal failure, keeping a short message for the client.
    pub fn internal(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        ApiError::Internal {
            message,
            source: source.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::UnsupportedMediaType
            | ApiError::PayloadTooLarge
            | ApiError::BadUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(_) | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::MissingFile => "No file uploaded".to_string(),
            ApiError::UnsupportedMediaType => "Only PDF, JPG, PNG allowed".to_string(),
            ApiError::PayloadTooLarge => "File exceeds 25 MB limit".to_string(),
            ApiError::BadUpload(_) => "Malformed upload".to_string(),
            ApiError::Pipeline(PipelineError::Analyzer(AnalyzerError::EmptyResponse)) => {
                "AI returned no JSON text".to_string()
            }
            ApiError::Pipeline(PipelineError::Analyzer(AnalyzerError::InvalidJson(_))) => {
                "AI returned invalid JSON".to_string()
            }
            ApiError::Pipeline(_) => "Failed to process bill".to_string(),
            ApiError::Internal { message, .. } => (*message).to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(ApiError::MissingFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UnsupportedMediaType.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::PayloadTooLarge.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pipeline_errors_are_500_with_specific_messages() {
        let empty = ApiError::Pipeline(PipelineError::Analyzer(AnalyzerError::EmptyResponse));
        assert_eq!(empty.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(empty.client_message(), "AI returned no JSON text");

        let invalid = ApiError::Pipeline(PipelineError::Analyzer(AnalyzerError::InvalidJson(
            serde_json::from_str::<serde_json::Value>("nope").unwrap_err(),
        )));
        assert_eq!(invalid.client_message(), "AI returned invalid JSON");

        let extraction =
            ApiError::Pipeline(PipelineError::Extraction("broken xref table".to_string()));
        assert_eq!(extraction.client_message(), "Failed to process bill");
    }

    #[test]
    fn test_internal_error_keeps_short_message() {
        let err = ApiError::internal(
            "Failed to fetch summary",
            anyhow::anyhow!("connection refused"),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Failed to fetch summary");
    }
}
