//! Story provider backed by an OpenAI-compatible chat completion server.

use crate::retry::backoff;
use crate::{ChatCompletionRequest, ChatCompletionResponse, Message, StoryConfig, extract_json};
use async_trait::async_trait;
use hokusai_core::StoryScript;
use hokusai_error::{StoryError, StoryErrorKind};
use hokusai_interface::StoryProvider;
use serde::Deserialize;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

const SYSTEM_PROMPT: &str = "You are a comic book writer. Split the user's idea into a short \
sequence of comic panels. For every panel write a one or two sentence caption that is printed \
under the panel, and a visual_context describing what the panel shows (characters, setting, \
action, camera angle) without any text or speech bubbles. Output ONLY valid JSON of the form \
{\"panels\": [{\"caption\": \"...\", \"visual_context\": \"...\"}]}.";

/// Story provider that prompts a chat model for panel captions and scenes.
#[derive(Debug, Clone)]
pub struct ChatStoryProvider {
    config: StoryConfig,
    client: reqwest::Client,
}

impl ChatStoryProvider {
    /// Create a provider from config.
    ///
    /// # Errors
    ///
    /// Returns [`StoryErrorKind::Configuration`] if the panel count is zero or
    /// the HTTP client cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url(), model = %config.model()))]
    pub fn new(config: StoryConfig) -> Result<Self, StoryError> {
        if *config.panel_count() == 0 {
            return Err(StoryError::new(StoryErrorKind::Configuration(
                "panel_count must be at least 1".to_string(),
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| StoryError::new(StoryErrorKind::Configuration(e.to_string())))?;

        debug!("Created chat story provider");
        Ok(Self { config, client })
    }

    /// Provider configuration.
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    fn request_for(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model().clone(),
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(format!(
                    "Write a comic in exactly {} panels about: {}",
                    self.config.panel_count(),
                    prompt
                )),
            ],
            max_tokens: Some(1024),
            temperature: Some(*self.config.temperature()),
        }
    }

    /// One round trip to the chat endpoint.
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, StoryError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url().trim_end_matches('/')
        );

        let mut req = self.client.post(&url).json(request);
        if let Some(api_key) = self.config.api_key() {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                StoryError::new(StoryErrorKind::Timeout(*self.config.timeout_secs()))
            } else {
                StoryError::new(StoryErrorKind::Http(e.to_string()))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoryError::new(StoryErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        response
            .json()
            .await
            .map_err(|e| StoryError::new(StoryErrorKind::Parse(format!("Invalid response: {}", e))))
    }
}

#[async_trait]
impl StoryProvider for ChatStoryProvider {
    #[instrument(skip(self, prompt), fields(model = %self.config.model(), prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<StoryScript, StoryError> {
        let request = &self.request_for(prompt);
        let strategy = backoff(*self.config.retry_backoff_ms(), *self.config.max_retries());

        let response = Retry::spawn(strategy, || async move {
            match self.chat_completion(request).await {
                Ok(response) => Ok(response),
                Err(e) if e.kind.is_retryable() => {
                    warn!(error = %e, "Story request failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        })
        .await?;

        let content = response.first_content().ok_or_else(|| {
            StoryError::new(StoryErrorKind::Parse("Response has no choices".to_string()))
        })?;

        let script = parse_story(content)?;
        debug!(
            captions = script.captions.len(),
            contexts = script.contexts.len(),
            "Story generated"
        );
        Ok(script)
    }

    fn provider_name(&self) -> &str {
        "openai-compatible"
    }
}

/// Shapes of story JSON models actually produce.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoryPayload {
    Panels { panels: Vec<PanelBeat> },
    Parallel {
        #[serde(alias = "story")]
        captions: Vec<String>,
        #[serde(alias = "visual_context")]
        contexts: Vec<String>,
    },
    Beats(Vec<PanelBeat>),
}

#[derive(Deserialize)]
struct PanelBeat {
    #[serde(alias = "text")]
    caption: String,
    #[serde(alias = "scene", alias = "description")]
    visual_context: String,
}

/// Parse a model reply into a story script.
///
/// Accepts `{"panels": [{caption, visual_context}]}`, a bare array of such
/// beats, or parallel `{"captions": [...], "contexts": [...]}` lists. Parallel
/// lists are passed through as-is, so unequal lengths reach the caller's
/// validation unchanged.
///
/// # Errors
///
/// Returns [`StoryErrorKind::Parse`] when no known shape matches.
///
/// # Examples
///
/// ```
/// use hokusai_models::parse_story;
///
/// let reply = r#"```json
/// {"panels": [{"caption": "Beep.", "visual_context": "a robot wakes up"}]}
/// ```"#;
/// let script = parse_story(reply).unwrap();
/// assert_eq!(script.captions, vec!["Beep.".to_string()]);
/// assert_eq!(script.contexts, vec!["a robot wakes up".to_string()]);
/// ```
#[track_caller]
pub fn parse_story(reply: &str) -> Result<StoryScript, StoryError> {
    let json = extract_json(reply)?;
    let payload: StoryPayload = serde_json::from_str(&json).map_err(|e| {
        let preview: String = json.chars().take(100).collect();
        StoryError::new(StoryErrorKind::Parse(format!(
            "Unrecognized story JSON: {} (JSON: {}...)",
            e, preview
        )))
    })?;

    let script = match payload {
        StoryPayload::Panels { panels } | StoryPayload::Beats(panels) => {
            let (captions, contexts) = panels
                .into_iter()
                .map(|beat| (beat.caption.trim().to_string(), beat.visual_context.trim().to_string()))
                .unzip();
            StoryScript::new(captions, contexts)
        }
        StoryPayload::Parallel { captions, contexts } => StoryScript::new(captions, contexts),
    };
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let script = parse_story(r#"[{"text": "A", "scene": "x"}, {"caption": "B", "visual_context": "y"}]"#)
            .unwrap();
        assert_eq!(script.captions, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(script.contexts, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_parse_parallel_keeps_lengths() {
        let script =
            parse_story(r#"{"story": ["A", "B", "C"], "visual_context": ["x", "y"]}"#).unwrap();
        assert_eq!(script.captions.len(), 3);
        assert_eq!(script.contexts.len(), 2);
    }

    #[test]
    fn test_parse_unknown_shape() {
        let err = parse_story(r#"{"title": "Untitled"}"#).unwrap_err();
        assert!(matches!(err.kind, StoryErrorKind::Parse(_)));
    }

    #[test]
    fn test_request_mentions_panel_count() {
        let provider =
            ChatStoryProvider::new(StoryConfig::default().with_panel_count(3)).unwrap();
        let request = provider.request_for("a robot learns to paint");
        assert_eq!(request.messages.len(), 2);
        assert!(request.messages[1].content.contains("exactly 3 panels"));
        assert!(request.messages[1].content.contains("a robot learns to paint"));
    }

    #[test]
    fn test_zero_panel_count_is_rejected() {
        let err = ChatStoryProvider::new(StoryConfig::default().with_panel_count(0)).unwrap_err();
        assert!(matches!(err.kind, StoryErrorKind::Configuration(_)));
    }
}
