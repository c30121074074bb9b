//! Request and response payloads of the comic endpoint.

use crate::{PanelMetadata, Quality, StoryRequest, Style};
use serde::{Deserialize, Serialize};

/// Body of a comic generation request.
///
/// Missing fields take their defaults; an unknown quality tag resolves to
/// `standard`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateBody {
    /// Story prompt
    #[serde(default)]
    pub prompt: String,
    /// Style tag (default "manga")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Quality tag (default "standard")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl GenerateBody {
    /// Convert into a request, applying defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use hokusai_core::{GenerateBody, Quality};
    ///
    /// let body: GenerateBody = serde_json::from_str(r#"{"prompt": "cats in space"}"#).unwrap();
    /// let request = body.into_request();
    /// assert_eq!(request.style().as_str(), "manga");
    /// assert_eq!(*request.quality(), Quality::Standard);
    /// ```
    pub fn into_request(self) -> StoryRequest {
        let style = self.style.map(Style::new).unwrap_or_default();
        let quality = self
            .quality
            .as_deref()
            .map(Quality::from_tag)
            .unwrap_or_default();
        StoryRequest::new(self.prompt)
            .with_style(style)
            .with_quality(quality)
    }
}

/// One rendered panel as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelPayload {
    /// Base64-encoded PNG
    pub image: String,
    /// Caption the panel was rendered for
    pub text: String,
    /// Renderer metadata
    pub metadata: PanelMetadata,
}

/// Successful comic response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicResponse {
    /// Always true
    pub success: bool,
    /// Rendered panels in story order
    pub panels: Vec<PanelPayload>,
    /// Every generated caption, including those of failed panels
    pub story: Vec<String>,
    /// Where the composed page can be retrieved
    pub artifact_reference: String,
    /// Per-panel failures, or null when every panel rendered
    pub warnings: Option<Vec<String>>,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Present (and false) only when panel generation failed outright
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Short error description
    pub error: String,
    /// Longer, user-facing explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Error without an explanation.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: None,
            error: error.into(),
            message: None,
        }
    }

    /// Attach an explanation.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Mark the response as an explicit failure.
    pub fn with_success_flag(mut self) -> Self {
        self.success = Some(false);
        self
    }
}
