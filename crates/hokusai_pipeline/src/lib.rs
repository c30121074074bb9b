//! Comic generation orchestration.
//!
//! [`PanelGenerationPipeline`] turns a request into a story and renders one
//! panel per story beat, isolating per-panel failures. [`ComicStudio`] runs
//! the pipeline, composes the surviving panels into a page, persists it and
//! builds the caller-facing response.
//!
//! # Example
//!
//! ```rust,no_run
//! use hokusai_compose::ComicComposer;
//! use hokusai_core::StoryRequest;
//! use hokusai_interface::{PanelRenderer, StoryProvider};
//! use hokusai_pipeline::{ComicStudio, PanelGenerationPipeline, PipelineConfig};
//! use hokusai_storage::FileSystemArtifactStore;
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     story: Arc<dyn StoryProvider>,
//! #     renderer: Arc<dyn PanelRenderer>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = PanelGenerationPipeline::new(story, renderer, PipelineConfig::default());
//! let store = Arc::new(FileSystemArtifactStore::new("static/temp", "/artifacts")?);
//! let studio = ComicStudio::new(pipeline, Arc::new(ComicComposer::new(None)), store);
//!
//! let response = studio
//!     .create_comic(&StoryRequest::new("a robot learns to paint"))
//!     .await?;
//! println!("{}", response.artifact_reference);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod pipeline;
mod studio;

pub use config::PipelineConfig;
pub use pipeline::PanelGenerationPipeline;
pub use studio::{ComicStudio, encode_panel};
