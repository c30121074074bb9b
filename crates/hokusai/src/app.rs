//! Wiring of collaborators from configuration.

use crate::HokusaiConfig;
use hokusai_compose::ComicComposer;
use hokusai_error::HokusaiResult;
use hokusai_models::{ChatStoryProvider, DiffusionPanelRenderer};
use hokusai_pipeline::{ComicStudio, PanelGenerationPipeline};
use hokusai_storage::FileSystemArtifactStore;
use std::sync::Arc;
use tracing::{info, instrument};

/// Build a studio backed by the configured HTTP backends and a filesystem store.
///
/// Creates the storage directory if it does not exist. No backend is
/// contacted until the first request.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built or the storage
/// directory cannot be created.
#[instrument(skip_all)]
pub fn build_studio(config: &HokusaiConfig) -> HokusaiResult<ComicStudio> {
    let story = ChatStoryProvider::new(config.story().clone())?;
    let renderer = DiffusionPanelRenderer::new(config.renderer().clone())?;
    let store = FileSystemArtifactStore::new(
        config.storage().directory().clone(),
        config.storage().public_prefix().clone(),
    )?;
    let composer = ComicComposer::new(config.compose().font_dir().as_deref());

    info!(
        story = %config.story().base_url(),
        renderer = %config.renderer().base_url(),
        storage = %store.base_path().display(),
        "Collaborators ready"
    );

    let pipeline =
        PanelGenerationPipeline::new(Arc::new(story), Arc::new(renderer), *config.pipeline());
    Ok(ComicStudio::new(pipeline, Arc::new(composer), Arc::new(store)))
}
