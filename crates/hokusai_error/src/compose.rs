//! Page composition error types.

/// Stage of the composition state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ComposeStage {
    /// Nothing has happened yet
    #[display("idle")]
    Idle,
    /// Computing the grid and placing panel images
    #[display("laying out panels")]
    LayingOut,
    /// Rasterizing caption boxes
    #[display("rendering captions")]
    RenderingCaptions,
    /// Converting the canvas to its final color mode
    #[display("normalizing color mode")]
    NormalizingColor,
    /// Composition finished
    #[display("composed")]
    Composed,
}

/// Specific composition failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ComposeErrorKind {
    /// The outcome handed to the composer has no panels
    #[display("No panels to compose")]
    NoPanels,
    /// Outcome panels and story captions are not aligned
    #[display("{} panels but {} captions", panels, captions)]
    Misaligned {
        /// Number of panels
        panels: usize,
        /// Number of captions
        captions: usize,
    },
    /// Panel image or page canvas has unusable dimensions
    #[display("Unsupported dimensions: {}", _0)]
    UnsupportedDimensions(String),
    /// Canvas or caption buffer could not be allocated
    #[display("Failed to allocate canvas: {}", _0)]
    CanvasAllocation(String),
    /// Caption markup could not be rasterized
    #[display("Failed to render caption: {}", _0)]
    CaptionRender(String),
    /// Final image could not be encoded
    #[display("Failed to encode image: {}", _0)]
    Encode(String),
}

/// Composition error with the failing stage and location tracking.
///
/// # Examples
///
/// ```
/// use hokusai_error::{ComposeError, ComposeErrorKind, ComposeStage};
///
/// let err = ComposeError::new(ComposeErrorKind::NoPanels, ComposeStage::Idle);
/// assert!(format!("{}", err).contains("No panels"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Compose Error: {} while {} at line {} in {}", kind, stage, line, file)]
pub struct ComposeError {
    /// The specific failure
    pub kind: ComposeErrorKind,
    /// Stage the composer was in when it failed
    pub stage: ComposeStage,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ComposeError {
    /// Create a new ComposeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ComposeErrorKind, stage: ComposeStage) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            stage,
            line: location.line(),
            file: location.file(),
        }
    }
}
