//! Artifact storage for composed comic pages.
//!
//! Backends persist a [`CompositeArtifact`](hokusai_core::CompositeArtifact)
//! as PNG and hand back an [`ArtifactReference`] that is retrievable as soon
//! as `save` returns.
//!
//! # Example
//!
//! ```rust
//! use hokusai_core::{CompositeArtifact, Quality, Style};
//! use hokusai_storage::{ArtifactStore, MemoryArtifactStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryArtifactStore::new("/artifacts");
//! let artifact = CompositeArtifact::new(
//!     image::RgbImage::new(32, 32),
//!     Vec::new(),
//!     Style::default(),
//!     Quality::Draft,
//! );
//!
//! let reference = store.save(&artifact).await?;
//! assert_eq!(reference.url, format!("/artifacts/{}", artifact.filename()));
//!
//! let png = store.retrieve(&reference).await?;
//! assert_eq!(png.len() as u64, reference.size_bytes);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;
mod reference;
mod storage;

pub use filesystem::FileSystemArtifactStore;
pub use hokusai_error::{StorageError, StorageErrorKind};
pub use memory::MemoryArtifactStore;
pub use reference::{ArtifactReference, compute_hash, validate_filename};
pub use storage::ArtifactStore;
