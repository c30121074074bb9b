//! HTTP backends for story generation and panel rendering.
//!
//! - [`ChatStoryProvider`] asks an OpenAI-compatible chat completion endpoint
//!   for a panel-by-panel story.
//! - [`DiffusionPanelRenderer`] renders panels through a Stable Diffusion
//!   style `txt2img` endpoint.
//!
//! Both clients retry transient failures with exponential backoff and
//! jitter; retries never change how the pipeline classifies a call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod config;
mod diffusion;
mod extraction;
mod retry;
mod story;

pub use chat::{ChatCompletionRequest, ChatCompletionResponse, Choice, Message};
pub use config::{RendererConfig, StoryConfig};
pub use diffusion::{DiffusionPanelRenderer, Txt2ImgRequest, Txt2ImgResponse, style_preset};
pub use extraction::extract_json;
pub use story::{ChatStoryProvider, parse_story};
