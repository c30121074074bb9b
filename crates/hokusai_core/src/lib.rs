//! Core data types for the Hokusai comic generation pipeline.
//!
//! This crate provides the values that flow between the story provider, the
//! panel renderer, the composer and the artifact store. Every type here is
//! created once per request and never shared for concurrent mutation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod outcome;
mod panel;
mod request;
mod response;
mod story;

pub use artifact::{CompositeArtifact, PanelPlacement, Rect};
pub use outcome::GenerationOutcome;
pub use panel::{Panel, PanelMetadata, PanelResult, RenderOutcome, RenderedPanel};
pub use request::{Quality, StoryRequest, Style};
pub use response::{ComicResponse, ErrorResponse, GenerateBody, PanelPayload};
pub use story::{Story, StoryBeat, StoryScript};

/// Raster image type exchanged between renderer, pipeline and composer.
pub type RasterImage = image::DynamicImage;
