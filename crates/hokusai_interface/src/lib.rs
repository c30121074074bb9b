//! Collaborator traits for the Hokusai pipeline.
//!
//! The pipeline only ever talks to a story provider and a panel renderer
//! through these traits, so backends can be swapped (or mocked in tests)
//! without touching orchestration code.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{PanelRenderer, StoryProvider};
