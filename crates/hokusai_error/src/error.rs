//! Top-level error wrapper types.

use crate::{
    ComposeError, ConfigError, JsonError, PipelineError, RenderError, ServerError, StorageError,
    StoryError,
};

/// Every error a Hokusai crate can surface.
///
/// # Examples
///
/// ```
/// use hokusai_error::{ConfigError, HokusaiError};
///
/// let err: HokusaiError = ConfigError::new("port must be non-zero").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HokusaiErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Story provider error
    #[from(StoryError)]
    Story(StoryError),
    /// Panel renderer error
    #[from(RenderError)]
    Render(RenderError),
    /// Page composition error
    #[from(ComposeError)]
    Compose(ComposeError),
    /// Artifact storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Request-level pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Hokusai error with kind discrimination.
///
/// # Examples
///
/// ```
/// use hokusai_error::{HokusaiResult, StorageError, StorageErrorKind};
///
/// fn might_fail() -> HokusaiResult<()> {
///     Err(StorageError::new(StorageErrorKind::NotFound("comic.png".to_string())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Hokusai Error: {}", _0)]
pub struct HokusaiError(Box<HokusaiErrorKind>);

impl HokusaiError {
    /// Create a new error from a kind.
    pub fn new(kind: HokusaiErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HokusaiErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to HokusaiErrorKind
impl<T> From<T> for HokusaiError
where
    T: Into<HokusaiErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Hokusai operations.
pub type HokusaiResult<T> = std::result::Result<T, HokusaiError>;
