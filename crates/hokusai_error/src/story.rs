//! Story provider error types.

/// Specific error conditions raised while producing a story script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// Transport-level failure talking to the story service
    #[display("Story request failed: {}", _0)]
    Http(String),
    /// Story service answered with a non-success status
    #[display("Story API returned HTTP {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Story service did not answer within the configured timeout
    #[display("Story generation timed out after {} seconds", _0)]
    Timeout(u64),
    /// Model output could not be parsed into captions and contexts
    #[display("Failed to parse story: {}", _0)]
    Parse(String),
    /// Caption and visual-context sequences differ in length
    #[display("Story has {} captions but {} visual contexts", captions, contexts)]
    LengthMismatch {
        /// Number of captions
        captions: usize,
        /// Number of visual contexts
        contexts: usize,
    },
    /// The story has no panels
    #[display("Story contains no panels")]
    Empty,
    /// Story client is misconfigured
    #[display("Invalid story configuration: {}", _0)]
    Configuration(String),
}

impl StoryErrorKind {
    /// Check if this error is worth retrying against the same service.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoryErrorKind::Http(_) | StoryErrorKind::Timeout(_) => true,
            StoryErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Story error with location tracking.
///
/// # Examples
///
/// ```
/// use hokusai_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::LengthMismatch { captions: 3, contexts: 2 });
/// assert!(format!("{}", err).contains("3 captions but 2"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
