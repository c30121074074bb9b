//! In-memory artifact storage.

use crate::reference::{encode_artifact, public_url, verify_hash};
use crate::{ArtifactReference, ArtifactStore, compute_hash, validate_filename};
use hokusai_core::CompositeArtifact;
use hokusai_error::{StorageError, StorageErrorKind};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Artifact store backed by a map, for tests and one-shot CLI runs.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: RwLock<HashMap<String, Vec<u8>>>,
    public_prefix: String,
}

impl MemoryArtifactStore {
    /// Create an empty store serving under `public_prefix`.
    pub fn new(public_prefix: impl Into<String>) -> Self {
        Self {
            artifacts: RwLock::new(HashMap::new()),
            public_prefix: public_prefix.into(),
        }
    }

    /// Number of stored artifacts.
    pub async fn len(&self) -> usize {
        self.artifacts.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.artifacts.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ArtifactStore for MemoryArtifactStore {
    #[tracing::instrument(skip(self, artifact), fields(filename = %artifact.filename()))]
    async fn save(&self, artifact: &CompositeArtifact) -> Result<ArtifactReference, StorageError> {
        validate_filename(artifact.filename())?;
        let data = encode_artifact(artifact).await?;
        let hash = compute_hash(&data);
        let size_bytes = data.len() as u64;

        self.artifacts
            .write()
            .await
            .insert(artifact.filename().clone(), data);

        tracing::debug!(hash = %hash, size = size_bytes, "Stored artifact in memory");

        Ok(ArtifactReference {
            id: *artifact.id(),
            filename: artifact.filename().clone(),
            storage_backend: self.backend_name().to_string(),
            storage_path: artifact.filename().clone(),
            url: public_url(&self.public_prefix, artifact.filename()),
            content_hash: hash,
            size_bytes,
            mime_type: artifact.mime_type().to_string(),
        })
    }

    async fn retrieve(&self, reference: &ArtifactReference) -> Result<Vec<u8>, StorageError> {
        let data = self.load(&reference.filename).await?;
        verify_hash(&data, &reference.content_hash)?;
        Ok(data)
    }

    async fn load(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        validate_filename(filename)?;
        self.artifacts
            .read()
            .await
            .get(filename)
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(filename.to_string())))
    }

    async fn exists(&self, filename: &str) -> Result<bool, StorageError> {
        validate_filename(filename)?;
        Ok(self.artifacts.read().await.contains_key(filename))
    }

    async fn delete(&self, reference: &ArtifactReference) -> Result<(), StorageError> {
        self.artifacts
            .write()
            .await
            .remove(&reference.filename)
            .map(|_| ())
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound(reference.filename.clone()))
            })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
