//! Trait definitions for story and panel backends.

use async_trait::async_trait;
use hokusai_core::{RenderOutcome, StoryScript, Style};
use hokusai_error::{RenderError, StoryError};

/// Turns a prompt into parallel caption and visual-context sequences.
///
/// Implementations return the raw script; length and emptiness checks are
/// the pipeline's job.
#[async_trait]
pub trait StoryProvider: Send + Sync {
    /// Generate a story script for a prompt.
    async fn generate(&self, prompt: &str) -> Result<StoryScript, StoryError>;

    /// Provider name (e.g., "openai-compatible").
    fn provider_name(&self) -> &str;
}

/// Renders one panel image from a caption and its visual context.
///
/// A backend that answers but declines to draw the panel returns
/// [`RenderOutcome::Rejected`]. Transport faults are `Err`.
#[async_trait]
pub trait PanelRenderer: Send + Sync {
    /// Render a single panel.
    async fn render(
        &self,
        caption: &str,
        visual_context: &str,
        style: &Style,
    ) -> Result<RenderOutcome, RenderError>;

    /// Provider name (e.g., "stable-diffusion").
    fn provider_name(&self) -> &str;
}
