//! Aggregated result of panel generation.

use crate::Panel;

/// Surviving panels of a request, ready for composition.
///
/// `panels` holds successful renders in ascending original index order with
/// failed indices removed. `story` is the caption sequence truncated to
/// `panels.len()`, so the composer always sees two aligned, gap-free
/// sequences. `full_story` keeps every generated caption for the caller.
///
/// # Examples
///
/// ```
/// use hokusai_core::{GenerationOutcome, Panel, PanelMetadata, RasterImage};
///
/// let image = RasterImage::new_rgb8(4, 4);
/// let captions = vec!["one".to_string(), "two".to_string(), "three".to_string()];
/// let panels = vec![
///     Panel::new(0, image.clone(), "one", PanelMetadata::new()),
///     Panel::new(2, image, "three", PanelMetadata::new()),
/// ];
///
/// let outcome = GenerationOutcome::new(panels, vec!["Panel 2: refused".to_string()], &captions);
/// assert_eq!(outcome.panels().len(), 2);
/// assert_eq!(outcome.story(), &["one".to_string(), "two".to_string()]);
/// assert_eq!(outcome.full_story(), &captions);
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct GenerationOutcome {
    /// Successful panels in original index order
    panels: Vec<Panel>,
    /// Failure reasons, one per failed panel
    warnings: Vec<String>,
    /// Captions truncated to the number of panels
    story: Vec<String>,
    /// Every caption the story provider produced
    full_story: Vec<String>,
}

impl GenerationOutcome {
    /// Build an outcome from surviving panels and the full caption list.
    ///
    /// `captions` must hold at least as many entries as `panels`, which always
    /// holds when the panels came from that story.
    pub fn new(panels: Vec<Panel>, warnings: Vec<String>, captions: &[String]) -> Self {
        let story = captions.iter().take(panels.len()).cloned().collect();
        Self {
            panels,
            warnings,
            story,
            full_story: captions.to_vec(),
        }
    }

    /// Warnings, or `None` when every panel rendered.
    pub fn warnings_if_any(&self) -> Option<Vec<String>> {
        if self.warnings.is_empty() {
            None
        } else {
            Some(self.warnings.clone())
        }
    }

    /// Split into panels, warnings and story.
    pub fn into_parts(self) -> (Vec<Panel>, Vec<String>, Vec<String>) {
        (self.panels, self.warnings, self.story)
    }
}
