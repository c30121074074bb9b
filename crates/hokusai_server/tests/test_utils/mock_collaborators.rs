//! Minimal story provider and renderer doubles.

use async_trait::async_trait;
use hokusai_core::{PanelMetadata, RenderOutcome, StoryScript, Style};
use hokusai_error::{RenderError, StoryError, StoryErrorKind};
use hokusai_interface::{PanelRenderer, StoryProvider};
use image::{DynamicImage, Rgb, RgbImage};
use std::collections::HashSet;

/// Story provider returning a fixed script, or failing.
#[derive(Debug, Clone)]
pub struct ScriptedStory(pub Option<StoryScript>);

impl ScriptedStory {
    /// The three-panel robot story.
    pub fn robot() -> Self {
        Self(Some(StoryScript::new(
            vec![
                "A robot finds a dusty easel.".to_string(),
                "It dips a claw into bright paint.".to_string(),
                "Its first painting is a sunrise.".to_string(),
            ],
            vec![
                "robot in an attic".to_string(),
                "robot claw over a palette".to_string(),
                "robot holding a sunrise canvas".to_string(),
            ],
        )))
    }

    /// A provider that always fails.
    pub fn broken() -> Self {
        Self(None)
    }
}

#[async_trait]
impl StoryProvider for ScriptedStory {
    async fn generate(&self, _prompt: &str) -> Result<StoryScript, StoryError> {
        self.0.clone().ok_or_else(|| {
            StoryError::new(StoryErrorKind::Http("connection refused".to_string()))
        })
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Renderer that rejects panels whose caption is in `rejected`.
#[derive(Debug, Clone, Default)]
pub struct SelectiveRenderer {
    rejected: HashSet<String>,
}

impl SelectiveRenderer {
    /// Renderer that draws everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Reject this caption.
    pub fn rejecting(mut self, caption: &str) -> Self {
        self.rejected.insert(caption.to_string());
        self
    }
}

#[async_trait]
impl PanelRenderer for SelectiveRenderer {
    async fn render(
        &self,
        caption: &str,
        _visual_context: &str,
        _style: &Style,
    ) -> Result<RenderOutcome, RenderError> {
        if self.rejected.contains(caption) {
            return Ok(RenderOutcome::rejected("content filter"));
        }
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(24, 24, Rgb([200, 120, 40])));
        Ok(RenderOutcome::rendered(image, PanelMetadata::new()))
    }

    fn provider_name(&self) -> &str {
        "selective"
    }
}
