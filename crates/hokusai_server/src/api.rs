//! Routes and handlers.

use crate::ApiError;
use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use hokusai_core::{ComicResponse, ErrorResponse, GenerateBody};
use hokusai_pipeline::ComicStudio;
use hokusai_storage::StorageErrorKind;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, instrument, warn};

/// Body of `GET /`.
pub const BANNER: &str = "Hokusai is running";

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    studio: Arc<ComicStudio>,
}

impl AppState {
    /// Creates new API state.
    pub fn new(studio: Arc<ComicStudio>) -> Self {
        Self { studio }
    }

    /// The studio requests are run through.
    pub fn studio(&self) -> &ComicStudio {
        &self.studio
    }
}

/// Creates the comic API router.
///
/// Every route answers cross-origin requests from any origin, including
/// `OPTIONS` preflights.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/status", get(status))
        .route("/generate", post(generate))
        .route("/artifacts/:filename", get(artifact))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn banner() -> &'static str {
    BANNER
}

/// Liveness probe.
async fn status() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Create a comic.
#[instrument(skip_all)]
async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<ComicResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        debug!(error = %rejection, "Rejected request body");
        ApiError::NoData
    })?;
    let request = body.into_request();
    info!(style = %request.style(), quality = %request.quality(), "Received generate request");

    let response = state.studio.create_comic(&request).await?;
    Ok(Json(response))
}

/// Serve a stored page.
#[instrument(skip(state))]
async fn artifact(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    match state.studio.store().load(&filename).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            bytes,
        )
            .into_response(),
        Err(e) if e.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Artifact not found: {}", filename))),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to load artifact");
            let status = match e.kind {
                StorageErrorKind::InvalidPath(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(ErrorResponse::new(e.kind.to_string()))).into_response()
        }
    }
}
