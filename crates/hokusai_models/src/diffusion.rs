//! Panel renderer backed by a Stable Diffusion `txt2img` endpoint.

use crate::RendererConfig;
use crate::retry::backoff;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hokusai_core::{PanelMetadata, RenderOutcome, Style};
use hokusai_error::{RenderError, RenderErrorKind};
use hokusai_interface::PanelRenderer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

/// Prompt prefix for a style tag.
///
/// # Examples
///
/// ```
/// use hokusai_core::Style;
/// use hokusai_models::style_preset;
///
/// assert!(style_preset(&Style::new("manga")).contains("screentone"));
/// assert_eq!(style_preset(&Style::new("pixel art")), "pixel art style illustration");
/// ```
pub fn style_preset(style: &Style) -> String {
    match style.as_str().to_ascii_lowercase().as_str() {
        "manga" => "manga style, black and white ink, screentone shading, expressive faces, \
                    dynamic composition"
            .to_string(),
        "comic" => "american comic book style, bold outlines, flat vibrant colors, halftone dots"
            .to_string(),
        "noir" => "film noir comic, stark black and white, deep shadows, rain-slick streets"
            .to_string(),
        "watercolor" => "watercolor illustration, soft washes, muted palette, paper texture"
            .to_string(),
        other => format!("{} style illustration", other),
    }
}

/// Body of a `txt2img` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Txt2ImgRequest {
    /// Positive prompt
    pub prompt: String,
    /// Negative prompt
    pub negative_prompt: String,
    /// Image width
    pub width: u32,
    /// Image height
    pub height: u32,
    /// Sampling steps
    pub steps: u32,
    /// Guidance scale
    pub cfg_scale: f32,
    /// Seed (-1 picks one at random)
    pub seed: i64,
    /// Images per request
    pub batch_size: u32,
}

/// Body of a `txt2img` response.
///
/// Backends report per-prompt failures (safety filter, bad sampler) in-band
/// through `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Txt2ImgResponse {
    /// Base64-encoded images
    #[serde(default)]
    pub images: Vec<String>,
    /// Generation info, usually a JSON document encoded as a string
    #[serde(default)]
    pub info: Option<Value>,
    /// In-band error
    #[serde(default)]
    pub error: Option<String>,
    /// Longer error detail
    #[serde(default)]
    pub detail: Option<Value>,
}

/// Panel renderer for AUTOMATIC1111-compatible `txt2img` servers.
#[derive(Debug, Clone)]
pub struct DiffusionPanelRenderer {
    config: RendererConfig,
    client: reqwest::Client,
}

impl DiffusionPanelRenderer {
    /// Create a renderer from config.
    ///
    /// # Errors
    ///
    /// Returns [`RenderErrorKind::Configuration`] for a zero image size or if
    /// the HTTP client cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: RendererConfig) -> Result<Self, RenderError> {
        if *config.width() == 0 || *config.height() == 0 {
            return Err(RenderError::new(RenderErrorKind::Configuration(
                "width and height must be non-zero".to_string(),
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| RenderError::new(RenderErrorKind::Configuration(e.to_string())))?;

        debug!("Created diffusion panel renderer");
        Ok(Self { config, client })
    }

    /// Renderer configuration.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Build the request for one panel.
    pub fn request_for(&self, caption: &str, visual_context: &str, style: &Style) -> Txt2ImgRequest {
        Txt2ImgRequest {
            prompt: format!(
                "{}, {}, depicting: {}",
                style_preset(style),
                visual_context.trim(),
                caption.trim()
            ),
            negative_prompt: self.config.negative_prompt().clone(),
            width: *self.config.width(),
            height: *self.config.height(),
            steps: *self.config.steps(),
            cfg_scale: *self.config.cfg_scale(),
            seed: -1,
            batch_size: 1,
        }
    }

    async fn txt2img(&self, request: &Txt2ImgRequest) -> Result<Txt2ImgResponse, RenderError> {
        let url = format!("{}/sdapi/v1/txt2img", self.config.base_url().trim_end_matches('/'));

        let response = self.client.post(&url).json(request).send().await.map_err(|e| {
            if e.is_timeout() {
                RenderError::new(RenderErrorKind::Timeout(*self.config.timeout_secs()))
            } else {
                RenderError::new(RenderErrorKind::Http(e.to_string()))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RenderError::new(RenderErrorKind::Http(e.to_string())))?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                RenderError::new(RenderErrorKind::Decode(format!("Invalid response: {}", e)))
            });
        }

        // A client error that explains itself is a verdict on this prompt
        let rejection = serde_json::from_str::<Txt2ImgResponse>(&body)
            .ok()
            .filter(|parsed| parsed.error.is_some());
        match rejection {
            Some(parsed) if status.is_client_error() && !is_transient_status(status.as_u16()) => {
                Ok(parsed)
            }
            _ => Err(RenderError::new(RenderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            })),
        }
    }
}

fn is_transient_status(status: u16) -> bool {
    matches!(status, 408 | 429)
}

/// Turn a backend response into a render outcome.
fn interpret(response: Txt2ImgResponse, style: &Style) -> Result<RenderOutcome, RenderError> {
    let mut metadata = info_metadata(response.info.as_ref());
    metadata.insert("style".to_string(), Value::String(style.to_string()));

    if let Some(error) = response.error {
        if let Some(detail) = response.detail {
            metadata.insert("detail".to_string(), detail);
        }
        return Ok(RenderOutcome::Rejected {
            reason: error,
            metadata,
        });
    }

    let Some(encoded) = response.images.first().map(String::as_str) else {
        return Ok(RenderOutcome::Rejected {
            reason: "No image returned".to_string(),
            metadata,
        });
    };

    // Some servers prefix a data URL header
    let encoded = encoded
        .split_once(',')
        .filter(|(header, _)| header.starts_with("data:"))
        .map(|(_, data)| data)
        .unwrap_or(encoded);

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| RenderError::new(RenderErrorKind::Decode(format!("base64: {}", e))))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| RenderError::new(RenderErrorKind::Decode(e.to_string())))?;

    metadata.insert("width".to_string(), Value::from(image.width()));
    metadata.insert("height".to_string(), Value::from(image.height()));
    Ok(RenderOutcome::rendered(image, metadata))
}

/// Keep the informative parts of the `info` blob.
fn info_metadata(info: Option<&Value>) -> PanelMetadata {
    let parsed = match info {
        Some(Value::String(raw)) => serde_json::from_str::<Value>(raw).ok(),
        Some(other) => Some(other.clone()),
        None => None,
    };

    let mut metadata = PanelMetadata::new();
    if let Some(Value::Object(map)) = parsed {
        for key in ["seed", "sampler_name", "sd_model_name", "steps", "cfg_scale"] {
            if let Some(value) = map.get(key) {
                metadata.insert(key.to_string(), value.clone());
            }
        }
    }
    metadata
}

#[async_trait]
impl PanelRenderer for DiffusionPanelRenderer {
    #[instrument(skip(self, caption, visual_context), fields(style = %style))]
    async fn render(
        &self,
        caption: &str,
        visual_context: &str,
        style: &Style,
    ) -> Result<RenderOutcome, RenderError> {
        let request = &self.request_for(caption, visual_context, style);
        let strategy = backoff(*self.config.retry_backoff_ms(), *self.config.max_retries());

        let response = Retry::spawn(strategy, || async move {
            match self.txt2img(request).await {
                Ok(response) => Ok(response),
                Err(e) if e.kind.is_retryable() => {
                    warn!(error = %e, "Render request failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        })
        .await?;

        let outcome = interpret(response, style)?;
        if let RenderOutcome::Rejected { reason, .. } = &outcome {
            warn!(reason = %reason, "Backend rejected panel");
        }
        Ok(outcome)
    }

    fn provider_name(&self) -> &str {
        "stable-diffusion"
    }
}
