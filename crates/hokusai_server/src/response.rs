//! Mapping of pipeline failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use hokusai_core::ErrorResponse;
use hokusai_error::{PipelineError, PipelineErrorKind};
use tracing::error;

const GENERIC_MESSAGE: &str = "An error occurred while generating your comic. Please try again.";

/// A failed `POST /generate`.
#[derive(Debug)]
pub enum ApiError {
    /// The body was missing or not valid JSON
    NoData,
    /// The pipeline failed
    Pipeline(PipelineError),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::Pipeline(err)
    }
}

impl ApiError {
    /// HTTP status and JSON body for this failure.
    ///
    /// Client mistakes map to 400, everything else to 500.
    pub fn to_parts(&self) -> (StatusCode, ErrorResponse) {
        let err = match self {
            ApiError::NoData => {
                return (StatusCode::BAD_REQUEST, ErrorResponse::new("No data provided"));
            }
            ApiError::Pipeline(err) => err,
        };

        match &err.kind {
            PipelineErrorKind::InvalidInput(reason) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(reason.clone()))
            }
            PipelineErrorKind::StoryGenerationFailed(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to generate story").with_message(reason.clone()),
            ),
            PipelineErrorKind::NoPanelsGenerated { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(err.kind.to_string()).with_success_flag(),
            ),
            PipelineErrorKind::ComposeFailed(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to compose final comic").with_message(reason.clone()),
            ),
            PipelineErrorKind::PersistFailed(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to save comic").with_message(reason.clone()),
            ),
            PipelineErrorKind::PanelRenderFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(err.kind.to_string()).with_message(GENERIC_MESSAGE),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %body.error, "Comic generation failed");
        }
        (status, Json(body)).into_response()
    }
}
