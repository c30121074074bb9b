//! Backend client configuration.

use serde::{Deserialize, Serialize};

/// Story backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct StoryConfig {
    /// Base URL of the chat completion server (e.g., "http://localhost:8080")
    base_url: String,
    /// Model identifier
    model: String,
    /// Bearer token, if the server wants one
    api_key: Option<String>,
    /// Number of panels to ask for
    panel_count: usize,
    /// Sampling temperature
    temperature: f32,
    /// Per-request HTTP timeout
    timeout_secs: u64,
    /// Retries after the first attempt for transient failures
    max_retries: usize,
    /// Initial backoff between retries
    retry_backoff_ms: u64,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            model: "llama3".to_string(),
            api_key: None,
            panel_count: 4,
            temperature: 0.8,
            timeout_secs: 60,
            max_retries: 2,
            retry_backoff_ms: 500,
        }
    }
}

impl StoryConfig {
    /// Config pointing at `base_url`, defaults elsewhere.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the number of panels
    pub fn with_panel_count(mut self, panel_count: usize) -> Self {
        self.panel_count = panel_count;
        self
    }

    /// Set the retry budget
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial retry backoff
    pub fn with_retry_backoff_ms(mut self, retry_backoff_ms: u64) -> Self {
        self.retry_backoff_ms = retry_backoff_ms;
        self
    }
}

/// Panel renderer backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct RendererConfig {
    /// Base URL of the txt2img server (e.g., "http://127.0.0.1:7860")
    base_url: String,
    /// Image width requested from the backend
    width: u32,
    /// Image height requested from the backend
    height: u32,
    /// Sampling steps
    steps: u32,
    /// Classifier-free guidance scale
    cfg_scale: f32,
    /// Negative prompt sent with every panel
    negative_prompt: String,
    /// Per-request HTTP timeout
    timeout_secs: u64,
    /// Retries after the first attempt for transient failures
    max_retries: usize,
    /// Initial backoff between retries
    retry_backoff_ms: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7860".to_string(),
            width: 512,
            height: 512,
            steps: 25,
            cfg_scale: 7.0,
            negative_prompt: "text, watermark, signature, blurry, deformed hands".to_string(),
            timeout_secs: 120,
            max_retries: 1,
            retry_backoff_ms: 1000,
        }
    }
}

impl RendererConfig {
    /// Config pointing at `base_url`, defaults elsewhere.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the requested image size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the retry budget
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial retry backoff
    pub fn with_retry_backoff_ms(mut self, retry_backoff_ms: u64) -> Self {
        self.retry_backoff_ms = retry_backoff_ms;
        self
    }
}
