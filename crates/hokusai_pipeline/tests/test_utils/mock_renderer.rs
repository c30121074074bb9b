//! Mock panel renderer.

use async_trait::async_trait;
use hokusai_core::{PanelMetadata, RasterImage, RenderOutcome, Style};
use hokusai_error::{RenderError, RenderErrorKind};
use hokusai_interface::PanelRenderer;
use image::{DynamicImage, Rgb, RgbImage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock does for one caption.
#[derive(Debug, Clone)]
pub enum MockRender {
    /// Return a solid 32x32 image
    Image,
    /// Return an image of the given size
    Sized(u32, u32),
    /// Report an in-band rejection
    Reject(String),
    /// Fail with this error
    Fail(RenderErrorKind),
    /// Sleep, then return a solid image
    Slow(Duration),
}

/// Panel renderer double keyed by caption.
#[derive(Debug, Clone, Default)]
pub struct MockPanelRenderer {
    overrides: HashMap<String, MockRender>,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    styles: Arc<Mutex<Vec<String>>>,
}

impl MockPanelRenderer {
    /// Renderer that draws every panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `behavior` for panels with this caption.
    pub fn on(mut self, caption: impl Into<String>, behavior: MockRender) -> Self {
        self.overrides.insert(caption.into(), behavior);
        self
    }

    /// Number of `render` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of concurrent `render` calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Style tags seen, in call order.
    pub fn styles(&self) -> Vec<String> {
        self.styles.lock().unwrap().clone()
    }

    fn image(width: u32, height: u32) -> RasterImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 160, 220])))
    }
}

#[async_trait]
impl PanelRenderer for MockPanelRenderer {
    async fn render(
        &self,
        caption: &str,
        _visual_context: &str,
        style: &Style,
    ) -> Result<RenderOutcome, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.styles.lock().unwrap().push(style.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let behavior = self
            .overrides
            .get(caption)
            .cloned()
            .unwrap_or(MockRender::Image);

        let mut metadata = PanelMetadata::new();
        metadata.insert("caption".to_string(), caption.into());

        let result = match behavior {
            MockRender::Image => Ok(RenderOutcome::rendered(Self::image(32, 32), metadata)),
            MockRender::Sized(w, h) => Ok(RenderOutcome::rendered(Self::image(w, h), metadata)),
            MockRender::Reject(reason) => Ok(RenderOutcome::Rejected { reason, metadata }),
            MockRender::Fail(kind) => Err(RenderError::new(kind)),
            MockRender::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(RenderOutcome::rendered(Self::image(32, 32), metadata))
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn provider_name(&self) -> &str {
        "mock-renderer"
    }
}
