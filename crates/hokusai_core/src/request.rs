//! Comic request types.

use hokusai_error::{PipelineError, PipelineErrorKind};
use serde::{Deserialize, Serialize};

/// Visual style tag.
///
/// The tag is passed verbatim to the panel renderer and resolved to a page
/// theme by the composer. Blank tags fall back to `"manga"`.
///
/// # Examples
///
/// ```
/// use hokusai_core::Style;
///
/// assert_eq!(Style::default().as_str(), "manga");
/// assert_eq!(Style::new("  noir ").as_str(), "noir");
/// assert_eq!(Style::new("   ").as_str(), "manga");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct Style(String);

impl Style {
    /// Tag used when the caller does not pick a style.
    pub const DEFAULT_TAG: &'static str = "manga";

    /// Create a style from a tag, trimming whitespace.
    pub fn new(tag: impl AsRef<str>) -> Self {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            Self::default()
        } else {
            Self(tag.to_string())
        }
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Style {
    fn default() -> Self {
        Self(Self::DEFAULT_TAG.to_string())
    }
}

impl From<&str> for Style {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Style {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

/// Output quality tier.
///
/// Controls page resolution. Tags parse case-insensitively.
///
/// # Examples
///
/// ```
/// use hokusai_core::Quality;
///
/// assert_eq!("HIGH".parse::<Quality>().unwrap(), Quality::High);
/// assert_eq!(Quality::from_tag("ultra"), Quality::Standard);
/// assert_eq!(Quality::default().to_string(), "standard");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Quality {
    /// Small, fast pages for previews
    Draft,
    /// Default page resolution
    #[default]
    Standard,
    /// Large pages for print or download
    High,
}

impl Quality {
    /// Resolve a tag, falling back to [`Quality::Standard`] for unknown tags.
    pub fn from_tag(tag: &str) -> Self {
        tag.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(tag, "Unknown quality tag, using standard");
            Self::default()
        })
    }

    /// Whether the tag names a known tier.
    pub fn is_known_tag(tag: &str) -> bool {
        tag.trim().parse::<Quality>().is_ok()
    }
}

/// A request to turn a prompt into a comic.
///
/// The prompt is stored trimmed. Construction never fails; call
/// [`StoryRequest::validate`] before doing any work with it.
///
/// # Examples
///
/// ```
/// use hokusai_core::{Quality, StoryRequest};
///
/// let request = StoryRequest::new("  a robot learns to paint ").with_quality(Quality::High);
/// assert_eq!(request.prompt(), "a robot learns to paint");
/// assert_eq!(request.style().as_str(), "manga");
/// assert!(request.validate().is_ok());
///
/// assert!(StoryRequest::new(" \n\t").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryRequest {
    /// Story prompt, trimmed
    prompt: String,
    /// Visual style tag
    style: Style,
    /// Output quality tier
    quality: Quality,
}

impl StoryRequest {
    /// Create a request with the default style and quality.
    pub fn new(prompt: impl AsRef<str>) -> Self {
        Self {
            prompt: prompt.as_ref().trim().to_string(),
            style: Style::default(),
            quality: Quality::default(),
        }
    }

    /// Replace the style.
    pub fn with_style(mut self, style: impl Into<Style>) -> Self {
        self.style = style.into();
        self
    }

    /// Replace the quality tier.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Reject requests whose prompt is empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::InvalidInput`] for a blank prompt.
    #[track_caller]
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.prompt.trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::InvalidInput(
                "Prompt is required".to_string(),
            )));
        }
        Ok(())
    }
}
