//! Story types produced by a story provider.

use hokusai_error::{StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};

/// Raw story provider output, before any invariant is checked.
///
/// Captions and contexts are parallel sequences: `contexts[i]` describes what
/// panel `i` should show while `captions[i]` is the text printed under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryScript {
    /// Panel captions in reading order
    pub captions: Vec<String>,
    /// Visual context for each panel, index-aligned with `captions`
    pub contexts: Vec<String>,
}

impl StoryScript {
    /// Create a script from parallel caption and context sequences.
    pub fn new(captions: Vec<String>, contexts: Vec<String>) -> Self {
        Self { captions, contexts }
    }
}

/// One panel of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryBeat {
    /// Text printed with the panel
    caption: String,
    /// Scene description handed to the renderer
    visual_context: String,
}

/// A validated story: a non-empty sequence of index-aligned beats.
///
/// # Examples
///
/// ```
/// use hokusai_core::{Story, StoryScript};
///
/// let script = StoryScript::new(
///     vec!["Beep.".to_string(), "Boop.".to_string()],
///     vec!["a robot wakes".to_string(), "a robot paints".to_string()],
/// );
/// let story = Story::from_script(script).unwrap();
/// assert_eq!(story.len(), 2);
/// assert_eq!(story.captions(), vec!["Beep.".to_string(), "Boop.".to_string()]);
///
/// let lopsided = StoryScript::new(vec!["Beep.".to_string()], vec![]);
/// assert!(Story::from_script(lopsided).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    beats: Vec<StoryBeat>,
}

impl Story {
    /// Validate a script and zip it into beats.
    ///
    /// # Errors
    ///
    /// - [`StoryErrorKind::LengthMismatch`] when the sequences differ in length
    /// - [`StoryErrorKind::Empty`] when both sequences are empty
    #[track_caller]
    pub fn from_script(script: StoryScript) -> Result<Self, StoryError> {
        let StoryScript { captions, contexts } = script;

        if captions.len() != contexts.len() {
            return Err(StoryError::new(StoryErrorKind::LengthMismatch {
                captions: captions.len(),
                contexts: contexts.len(),
            }));
        }
        if captions.is_empty() {
            return Err(StoryError::new(StoryErrorKind::Empty));
        }

        let beats = captions
            .into_iter()
            .zip(contexts)
            .map(|(caption, visual_context)| StoryBeat {
                caption,
                visual_context,
            })
            .collect();

        Ok(Self { beats })
    }

    /// Beats in reading order.
    pub fn beats(&self) -> &[StoryBeat] {
        &self.beats
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    /// Always false for a validated story; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Captions in reading order.
    pub fn captions(&self) -> Vec<String> {
        self.beats.iter().map(|beat| beat.caption.clone()).collect()
    }
}
