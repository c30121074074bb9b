//! Story generation and per-panel rendering.

use crate::PipelineConfig;
use futures::stream::{self, StreamExt};
use hokusai_core::{
    GenerationOutcome, Panel, PanelResult, RenderOutcome, Story, StoryBeat, StoryRequest, Style,
};
use hokusai_error::{PipelineError, PipelineErrorKind};
use hokusai_interface::{PanelRenderer, StoryProvider};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Turns a request into a set of rendered panels.
///
/// Stateless between requests: collaborators are shared through `Arc` and
/// every call works on request-local data only.
#[derive(Clone)]
pub struct PanelGenerationPipeline {
    story_provider: Arc<dyn StoryProvider>,
    renderer: Arc<dyn PanelRenderer>,
    config: PipelineConfig,
}

impl std::fmt::Debug for PanelGenerationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelGenerationPipeline")
            .field("story_provider", &self.story_provider.provider_name())
            .field("renderer", &self.renderer.provider_name())
            .field("config", &self.config)
            .finish()
    }
}

impl PanelGenerationPipeline {
    /// Create a pipeline over the given collaborators.
    pub fn new(
        story_provider: Arc<dyn StoryProvider>,
        renderer: Arc<dyn PanelRenderer>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            story_provider,
            renderer,
            config,
        }
    }

    /// Pipeline settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate the story and render every panel.
    ///
    /// Panels that fail to render are dropped and reported as warnings of the
    /// form `"Panel {n}: {reason}"` (one-based). Surviving panels keep their
    /// story order, and the outcome's story is truncated to the number of
    /// surviving panels.
    ///
    /// # Errors
    ///
    /// - [`PipelineErrorKind::InvalidInput`] for a blank prompt, before any
    ///   collaborator is called
    /// - [`PipelineErrorKind::StoryGenerationFailed`] if the provider fails,
    ///   times out, or returns an empty or misaligned story; no panel is
    ///   rendered in that case
    /// - [`PipelineErrorKind::NoPanelsGenerated`] if every panel fails
    #[instrument(skip(self, request), fields(style = %request.style(), quality = %request.quality()))]
    pub async fn generate(&self, request: &StoryRequest) -> Result<GenerationOutcome, PipelineError> {
        request.validate()?;

        let story = self.story(request.prompt()).await?;
        info!(panels = story.len(), "Story generated");

        let results = self.render_all(&story, request.style()).await;
        aggregate(results, &story)
    }

    async fn story(&self, prompt: &str) -> Result<Story, PipelineError> {
        let timeout = self.config.story_timeout();
        let script = match tokio::time::timeout(timeout, self.story_provider.generate(prompt)).await {
            Ok(Ok(script)) => script,
            Ok(Err(e)) => {
                warn!(error = %e, provider = self.story_provider.provider_name(), "Story provider failed");
                return Err(PipelineError::new(PipelineErrorKind::StoryGenerationFailed(
                    e.kind.to_string(),
                )));
            }
            Err(_) => {
                warn!(timeout_secs = timeout.as_secs(), "Story provider timed out");
                return Err(PipelineError::new(PipelineErrorKind::StoryGenerationFailed(
                    format!("Story generation timed out after {} seconds", timeout.as_secs()),
                )));
            }
        };

        Story::from_script(script).map_err(|e| {
            warn!(error = %e, "Story provider returned an unusable story");
            PipelineError::new(PipelineErrorKind::StoryGenerationFailed(e.kind.to_string()))
        })
    }

    /// Render every beat with bounded concurrency, results in story order.
    async fn render_all(&self, story: &Story, style: &Style) -> Vec<PanelResult> {
        // Built eagerly; `buffered` bounds how many are polled at once.
        let renders: Vec<_> = story
            .beats()
            .iter()
            .enumerate()
            .map(|(index, beat)| self.render_one(index, beat, style))
            .collect();

        stream::iter(renders)
            .buffered(self.config.render_concurrency())
            .collect()
            .await
    }

    #[instrument(skip(self, beat, style), fields(panel = index + 1))]
    async fn render_one(&self, index: usize, beat: &StoryBeat, style: &Style) -> PanelResult {
        let timeout = self.config.render_timeout();
        let call = self
            .renderer
            .render(beat.caption(), beat.visual_context(), style);

        let detail = match tokio::time::timeout(timeout, call).await {
            Ok(Ok(RenderOutcome::Rendered(rendered))) => {
                let (image, metadata) = rendered.into_parts();
                debug!(width = image.width(), height = image.height(), "Panel rendered");
                return PanelResult::Success(Panel::new(index, image, beat.caption(), metadata));
            }
            Ok(Ok(RenderOutcome::Rejected { reason, .. })) => reason,
            Ok(Err(e)) => e.kind.to_string(),
            Err(_) => format!("Render timed out after {} seconds", timeout.as_secs()),
        };

        let failure = PipelineErrorKind::PanelRenderFailed {
            index,
            reason: detail.clone(),
        };
        warn!(error = %failure, "Panel failed, continuing");
        PanelResult::Failure {
            index,
            reason: format!("Panel {}: {}", index + 1, detail),
        }
    }
}

/// Split results into surviving panels and warnings, in index order.
fn aggregate(results: Vec<PanelResult>, story: &Story) -> Result<GenerationOutcome, PipelineError> {
    let mut panels = Vec::with_capacity(results.len());
    let mut warnings = Vec::new();

    for result in results {
        match result {
            PanelResult::Success(panel) => panels.push(panel),
            PanelResult::Failure { reason, .. } => warnings.push(reason),
        }
    }

    if panels.is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::NoPanelsGenerated {
            warnings,
        }));
    }

    info!(
        rendered = panels.len(),
        failed = warnings.len(),
        "Panel generation finished"
    );
    Ok(GenerationOutcome::new(panels, warnings, &story.captions()))
}
