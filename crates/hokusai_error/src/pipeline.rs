//! Request-level pipeline error types.

use std::fmt;

/// Error taxonomy for a single comic request.
///
/// Every kind except [`PipelineErrorKind::PanelRenderFailed`] aborts the
/// request. Panel failures are recorded as warnings by the pipeline and only
/// surface as an error through [`PipelineErrorKind::NoPanelsGenerated`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PipelineErrorKind {
    /// Request rejected before any collaborator was called
    InvalidInput(String),
    /// Story provider failed or returned an unusable story
    StoryGenerationFailed(String),
    /// A single panel could not be rendered
    PanelRenderFailed {
        /// Zero-based panel index
        index: usize,
        /// Failure reason
        reason: String,
    },
    /// Every panel failed; one reason per failed index
    NoPanelsGenerated {
        /// Per-panel failure reasons in index order
        warnings: Vec<String>,
    },
    /// Page composition failed
    ComposeFailed(String),
    /// Artifact persistence failed
    PersistFailed(String),
}

impl fmt::Display for PipelineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineErrorKind::InvalidInput(reason) => write!(f, "Invalid input: {}", reason),
            PipelineErrorKind::StoryGenerationFailed(reason) => {
                write!(f, "Failed to generate story: {}", reason)
            }
            PipelineErrorKind::PanelRenderFailed { index, reason } => {
                write!(f, "Panel {} failed: {}", index + 1, reason)
            }
            PipelineErrorKind::NoPanelsGenerated { warnings } => {
                write!(f, "Failed to generate any panels. {}", warnings.join("; "))
            }
            PipelineErrorKind::ComposeFailed(reason) => {
                write!(f, "Failed to compose final comic: {}", reason)
            }
            PipelineErrorKind::PersistFailed(reason) => {
                write!(f, "Failed to save comic: {}", reason)
            }
        }
    }
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use hokusai_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::NoPanelsGenerated {
///     warnings: vec!["Panel 1: timeout".to_string(), "Panel 2: nsfw".to_string()],
/// });
/// assert!(format!("{}", err).contains("Panel 1: timeout; Panel 2: nsfw"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PipelineErrorKind {
        &self.kind
    }

    /// Whether the caller supplied bad input (as opposed to a generation fault).
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind, PipelineErrorKind::InvalidInput(_))
    }
}
