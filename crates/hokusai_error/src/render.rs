//! Panel renderer error types.

/// Hard failures from a panel renderer.
///
/// Soft, per-panel rejections are not errors; they travel as
/// `RenderOutcome::Rejected` in `hokusai_core`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RenderErrorKind {
    /// Transport-level failure talking to the image service
    #[display("Render request failed: {}", _0)]
    Http(String),
    /// Image service answered with a non-success status
    #[display("Render API returned HTTP {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Render did not finish within the configured timeout
    #[display("Render timed out after {} seconds", _0)]
    Timeout(u64),
    /// Returned image bytes could not be decoded
    #[display("Failed to decode rendered image: {}", _0)]
    Decode(String),
    /// Renderer is misconfigured
    #[display("Invalid renderer configuration: {}", _0)]
    Configuration(String),
}

impl RenderErrorKind {
    /// Check if this error is worth retrying against the same service.
    pub fn is_retryable(&self) -> bool {
        match self {
            RenderErrorKind::Http(_) | RenderErrorKind::Timeout(_) => true,
            RenderErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Render error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The specific error condition
    pub kind: RenderErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RenderError {
    /// Create a new RenderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
