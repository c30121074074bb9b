//! Storage trait definition.

use crate::ArtifactReference;
use hokusai_core::CompositeArtifact;
use hokusai_error::StorageError;

/// Trait for pluggable artifact storage backends.
///
/// Every artifact occupies its own slot keyed by its collision-resistant
/// filename, so concurrent saves from different requests never contend.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Encode and persist an artifact.
    ///
    /// Once this returns `Ok`, the reference is immediately retrievable.
    async fn save(&self, artifact: &CompositeArtifact) -> Result<ArtifactReference, StorageError>;

    /// Read back a saved artifact, verifying its content hash.
    async fn retrieve(&self, reference: &ArtifactReference) -> Result<Vec<u8>, StorageError>;

    /// Read an artifact by filename, as served to HTTP clients.
    ///
    /// Filenames containing path separators or parent components are rejected
    /// with [`StorageErrorKind::InvalidPath`](hokusai_error::StorageErrorKind::InvalidPath).
    async fn load(&self, filename: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether an artifact with this filename exists.
    async fn exists(&self, filename: &str) -> Result<bool, StorageError>;

    /// Delete a saved artifact.
    async fn delete(&self, reference: &ArtifactReference) -> Result<(), StorageError>;

    /// Backend name recorded in references (e.g., "filesystem").
    fn backend_name(&self) -> &'static str;
}
