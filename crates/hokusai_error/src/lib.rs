//! Error types for the Hokusai workspace.
//!
//! This crate provides the foundation error types used by every stage of the
//! comic pipeline, from story generation through artifact persistence.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use hokusai_error::{HokusaiResult, StoryError, StoryErrorKind};
//!
//! fn fetch_story() -> HokusaiResult<Vec<String>> {
//!     Err(StoryError::new(StoryErrorKind::Http("connection refused".to_string())))?
//! }
//!
//! match fetch_story() {
//!     Ok(captions) => println!("Got {} captions", captions.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compose;
mod config;
mod error;
mod json;
mod pipeline;
mod render;
mod server;
mod storage;
mod story;

pub use compose::{ComposeError, ComposeErrorKind, ComposeStage};
pub use config::ConfigError;
pub use error::{HokusaiError, HokusaiErrorKind, HokusaiResult};
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use render::{RenderError, RenderErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};
