//! Mock story provider.

use async_trait::async_trait;
use hokusai_core::StoryScript;
use hokusai_error::{StoryError, StoryErrorKind};
use hokusai_interface::StoryProvider;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What the mock does when asked for a story.
#[derive(Debug, Clone)]
pub enum MockStory {
    /// Return this script
    Script(StoryScript),
    /// Fail with this error
    Fail(StoryErrorKind),
    /// Sleep, then return the script
    Slow(Duration, StoryScript),
}

/// Story provider double.
#[derive(Debug, Clone)]
pub struct MockStoryProvider {
    behavior: MockStory,
    calls: Arc<AtomicUsize>,
}

impl MockStoryProvider {
    /// Provider with the given behavior.
    pub fn new(behavior: MockStory) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider that always returns `script`.
    pub fn returning(script: StoryScript) -> Self {
        Self::new(MockStory::Script(script))
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoryProvider for MockStoryProvider {
    async fn generate(&self, _prompt: &str) -> Result<StoryScript, StoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockStory::Script(script) => Ok(script.clone()),
            MockStory::Fail(kind) => Err(StoryError::new(kind.clone())),
            MockStory::Slow(delay, script) => {
                tokio::time::sleep(*delay).await;
                Ok(script.clone())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "mock-story"
    }
}
