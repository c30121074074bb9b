//! Panel rendering results.

use crate::RasterImage;

/// Free-form metadata reported by a renderer for one panel (seed, model, timings).
pub type PanelMetadata = serde_json::Map<String, serde_json::Value>;

/// An image a renderer produced for one panel.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct RenderedPanel {
    /// Rendered image, in whatever color mode the renderer produced
    image: RasterImage,
    /// Renderer metadata
    metadata: PanelMetadata,
}

impl RenderedPanel {
    /// Create a rendered panel.
    pub fn new(image: RasterImage, metadata: PanelMetadata) -> Self {
        Self { image, metadata }
    }

    /// Split into image and metadata.
    pub fn into_parts(self) -> (RasterImage, PanelMetadata) {
        (self.image, self.metadata)
    }
}

/// What a renderer returns for a panel it was able to talk to.
///
/// `Rejected` is the soft failure: the backend answered but declined or failed
/// to produce an image for this panel (content filter, empty result). Transport
/// faults are reported as `RenderError` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// The panel was rendered
    Rendered(RenderedPanel),
    /// The backend reported an in-band error for this panel
    Rejected {
        /// Reason reported by the backend
        reason: String,
        /// Whatever metadata came back with the rejection
        metadata: PanelMetadata,
    },
}

impl RenderOutcome {
    /// Shorthand for a successful render.
    pub fn rendered(image: RasterImage, metadata: PanelMetadata) -> Self {
        Self::Rendered(RenderedPanel::new(image, metadata))
    }

    /// Shorthand for a rejection without metadata.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
            metadata: PanelMetadata::new(),
        }
    }
}

/// A successfully rendered panel, tagged with its original story index.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct Panel {
    /// Zero-based index in the original story
    index: usize,
    /// Rendered image
    image: RasterImage,
    /// Caption this panel was rendered for
    caption: String,
    /// Renderer metadata
    metadata: PanelMetadata,
}

impl Panel {
    /// Create a panel.
    pub fn new(
        index: usize,
        image: RasterImage,
        caption: impl Into<String>,
        metadata: PanelMetadata,
    ) -> Self {
        Self {
            index,
            image,
            caption: caption.into(),
            metadata,
        }
    }
}

/// Result of rendering one story index.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelResult {
    /// The panel rendered
    Success(Panel),
    /// The panel failed; the batch continues
    Failure {
        /// Zero-based index in the original story
        index: usize,
        /// Human-readable failure reason
        reason: String,
    },
}

impl PanelResult {
    /// Original story index of this result.
    pub fn index(&self) -> usize {
        match self {
            PanelResult::Success(panel) => panel.index,
            PanelResult::Failure { index, .. } => *index,
        }
    }

    /// Whether the panel rendered.
    pub fn is_success(&self) -> bool {
        matches!(self, PanelResult::Success(_))
    }
}
