//! End-to-end comic creation: generate, compose, persist, respond.

use crate::PanelGenerationPipeline;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hokusai_compose::ComicComposer;
use hokusai_core::{ComicResponse, CompositeArtifact, GenerationOutcome, Panel, PanelPayload, StoryRequest};
use hokusai_error::{PipelineError, PipelineErrorKind};
use hokusai_storage::ArtifactStore;
use image::ImageFormat;
use std::io::Cursor;
use std::sync::Arc;
use tracing::{info, instrument};

/// Encode a panel for the response: base64 PNG plus caption and metadata.
///
/// # Errors
///
/// Returns [`PipelineErrorKind::ComposeFailed`] if the image cannot be
/// encoded as PNG.
#[track_caller]
pub fn encode_panel(panel: &Panel) -> Result<PanelPayload, PipelineError> {
    let mut bytes = Vec::new();
    panel
        .image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| {
            PipelineError::new(PipelineErrorKind::ComposeFailed(format!(
                "Panel {} could not be encoded: {}",
                panel.index() + 1,
                e
            )))
        })?;

    Ok(PanelPayload {
        image: STANDARD.encode(bytes),
        text: panel.caption().clone(),
        metadata: panel.metadata().clone(),
    })
}

/// Runs a request from prompt to persisted page.
#[derive(Clone)]
pub struct ComicStudio {
    pipeline: PanelGenerationPipeline,
    composer: Arc<ComicComposer>,
    store: Arc<dyn ArtifactStore>,
}

impl std::fmt::Debug for ComicStudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComicStudio")
            .field("pipeline", &self.pipeline)
            .field("store", &self.store.backend_name())
            .finish()
    }
}

impl ComicStudio {
    /// Create a studio.
    pub fn new(
        pipeline: PanelGenerationPipeline,
        composer: Arc<ComicComposer>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            pipeline,
            composer,
            store,
        }
    }

    /// The panel pipeline.
    pub fn pipeline(&self) -> &PanelGenerationPipeline {
        &self.pipeline
    }

    /// The artifact store pages are saved to.
    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    /// Create a comic for `request`.
    ///
    /// Composition and panel encoding run on the blocking pool. The response
    /// either references a persisted page or the call fails; a partially
    /// composed page is never returned.
    ///
    /// # Errors
    ///
    /// Every pipeline error, plus [`PipelineErrorKind::ComposeFailed`] and
    /// [`PipelineErrorKind::PersistFailed`].
    #[instrument(skip(self, request), fields(style = %request.style(), quality = %request.quality()))]
    pub async fn create_comic(&self, request: &StoryRequest) -> Result<ComicResponse, PipelineError> {
        let outcome = self.pipeline.generate(request).await?;

        let composer = self.composer.clone();
        let style = request.style().clone();
        let quality = *request.quality();
        let (artifact, panels, outcome) = tokio::task::spawn_blocking(
            move || -> Result<(CompositeArtifact, Vec<PanelPayload>, GenerationOutcome), PipelineError> {
                let artifact = composer.compose(&outcome, &style, quality).map_err(|e| {
                    PipelineError::new(PipelineErrorKind::ComposeFailed(format!(
                        "{} while {}",
                        e.kind, e.stage
                    )))
                })?;
                let panels = outcome
                    .panels()
                    .iter()
                    .map(encode_panel)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((artifact, panels, outcome))
            },
        )
        .await
        .map_err(|e| {
            PipelineError::new(PipelineErrorKind::ComposeFailed(format!(
                "Composition task failed: {}",
                e
            )))
        })??;

        let reference = self.store.save(&artifact).await.map_err(|e| {
            PipelineError::new(PipelineErrorKind::PersistFailed(e.kind.to_string()))
        })?;
        info!(
            filename = %reference.filename,
            size = reference.size_bytes,
            panels = panels.len(),
            "Comic saved"
        );

        Ok(ComicResponse {
            success: true,
            panels,
            story: outcome.full_story().clone(),
            artifact_reference: reference.url,
            warnings: outcome.warnings_if_any(),
        })
    }
}
