use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::llm_client::LlmError;
use crate::report::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Internal messages are logged, never returned: callers only see a generic
/// message so model output cannot leak through error bodies.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Completion service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Model(LlmError::ServiceUnavailable(msg)) => {
                AppError::ServiceUnavailable(msg)
            }
            other => AppError::Analysis(format!("[{}] {other}", other.stage())),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Completion service error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Unable to process request due to an error with the AI service".to_string(),
                )
            }
            AppError::Analysis(msg) => {
                tracing::error!("Analysis error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ANALYSIS_ERROR",
                    "An error occurred while analyzing career path".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "An error occurred while rendering the report".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extractor::ExtractError;

    #[test]
    fn test_service_unavailable_maps_to_503() {
        let err: AppError =
            AnalysisError::Model(LlmError::ServiceUnavailable("quota exceeded".into())).into();
        assert!(matches!(err, AppError::ServiceUnavailable(ref m) if m == "quota exceeded"));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_processing_failures_collapse_to_500() {
        let failures = [
            AnalysisError::Model(LlmError::EmptyResponse),
            AnalysisError::Extraction(ExtractError::NoJsonFound),
            AnalysisError::Extraction(ExtractError::MalformedJson("bad".into())),
        ];
        for failure in failures {
            let err: AppError = failure.into();
            assert!(matches!(err, AppError::Analysis(_)));
            assert_eq!(
                err.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn test_analysis_message_keeps_stage_for_logs() {
        let err: AppError = AnalysisError::Extraction(ExtractError::NoJsonFound).into();
        assert_eq!(
            err.to_string(),
            "Analysis error: [response_extractor] response extraction failed: no JSON object found in model response"
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("name is blank".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
