//! Hokusai - prompt to comic page
//!
//! Hokusai asks a story model for a short script, renders one panel per story
//! beat with an image model, composes the surviving panels into a captioned
//! page and persists it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hokusai::{HokusaiConfig, StoryRequest, build_studio};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HokusaiConfig::load(None)?;
//!     let studio = build_studio(&config)?;
//!
//!     let response = studio
//!         .create_comic(&StoryRequest::new("a robot learns to paint"))
//!         .await?;
//!     println!("{}", response.artifact_reference);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Hokusai is organized as a workspace with focused crates:
//!
//! - `hokusai_error` - Error types
//! - `hokusai_core` - Requests, stories, panels and artifacts
//! - `hokusai_interface` - `StoryProvider` and `PanelRenderer` traits
//! - `hokusai_storage` - Artifact stores
//! - `hokusai_models` - HTTP story and panel backends
//! - `hokusai_compose` - Page layout and composition
//! - `hokusai_pipeline` - Panel generation pipeline and comic studio
//! - `hokusai_server` - HTTP surface
//!
//! This crate (`hokusai`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod logging;

pub use app::build_studio;
pub use config::{
    ComposeSettings, ConfigLoader, HokusaiConfig, LoggingSettings, ServerSettings,
    StorageSettings,
};
pub use logging::init_logging;

// Re-export workspace crates
pub use hokusai_compose::*;
pub use hokusai_core::*;
pub use hokusai_error::*;
pub use hokusai_interface::*;
pub use hokusai_models::*;
pub use hokusai_pipeline::*;
pub use hokusai_server::*;
pub use hokusai_storage::*;
