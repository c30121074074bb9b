//! Pipeline settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Concurrency and timeout settings for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct PipelineConfig {
    /// Renders in flight at once per request
    max_concurrent_renders: usize,
    /// Bound on the story provider call
    story_timeout_secs: u64,
    /// Bound on each panel render call
    render_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_renders: 2,
            story_timeout_secs: 120,
            render_timeout_secs: 180,
        }
    }
}

impl PipelineConfig {
    /// Set the render concurrency; zero is treated as one.
    pub fn with_max_concurrent_renders(mut self, max_concurrent_renders: usize) -> Self {
        self.max_concurrent_renders = max_concurrent_renders;
        self
    }

    /// Set the story timeout.
    pub fn with_story_timeout_secs(mut self, secs: u64) -> Self {
        self.story_timeout_secs = secs;
        self
    }

    /// Set the per-panel render timeout.
    pub fn with_render_timeout_secs(mut self, secs: u64) -> Self {
        self.render_timeout_secs = secs;
        self
    }

    /// Story timeout as a duration.
    pub fn story_timeout(&self) -> Duration {
        Duration::from_secs(self.story_timeout_secs)
    }

    /// Render timeout as a duration.
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// Effective render concurrency (at least one).
    pub fn render_concurrency(&self) -> usize {
        self.max_concurrent_renders.max(1)
    }
}
