//! Filesystem-based artifact storage.

use crate::reference::{encode_artifact, public_url, verify_hash};
use crate::{ArtifactReference, ArtifactStore, compute_hash, validate_filename};
use hokusai_core::CompositeArtifact;
use hokusai_error::{StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// Stores each artifact as `{base_path}/{filename}`. Filenames are unique per
/// artifact, so the directory is a flat namespace that tolerates concurrent
/// writers without locking.
///
/// # Features
///
/// - **Atomic writes**: temp file + rename, so readers never see a partial PNG
/// - **Integrity**: SHA-256 recorded on save and verified on retrieve
/// - **Path safety**: lookups by filename reject separators and `..`
#[derive(Debug, Clone)]
pub struct FileSystemArtifactStore {
    base_path: PathBuf,
    public_prefix: String,
}

impl FileSystemArtifactStore {
    /// Create a new filesystem store.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Directory artifacts are written to
    /// * `public_prefix` - URL path prefix artifacts are served under (e.g., "/artifacts")
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip_all)]
    pub fn new(
        base_path: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem artifact store");
        Ok(Self {
            base_path,
            public_prefix: public_prefix.into(),
        })
    }

    /// Directory artifacts are written to.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf, StorageError> {
        validate_filename(filename)?;
        Ok(self.base_path.join(filename))
    }

    async fn read(path: &Path, filename: &str) -> Result<Vec<u8>, StorageError> {
        tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(filename.to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })
    }
}

/// Best-effort removal of a temp file left by a failed save.
async fn remove_temp(temp_path: &Path) {
    match tokio::fs::remove_file(temp_path).await {
        Ok(()) => tracing::debug!(path = %temp_path.display(), "Removed temp file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %temp_path.display(),
            error = %e,
            "Failed to remove temp file"
        ),
    }
}

#[async_trait::async_trait]
impl ArtifactStore for FileSystemArtifactStore {
    #[tracing::instrument(skip(self, artifact), fields(filename = %artifact.filename()))]
    async fn save(&self, artifact: &CompositeArtifact) -> Result<ArtifactReference, StorageError> {
        let path = self.path_for(artifact.filename())?;
        let data = encode_artifact(artifact).await?;
        let hash = compute_hash(&data);

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("png.tmp");
        if let Err(e) = tokio::fs::write(&temp_path, &data).await {
            remove_temp(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            ))));
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            remove_temp(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            ))));
        }

        tracing::info!(
            hash = %hash,
            path = %path.display(),
            size = data.len(),
            "Stored artifact"
        );

        Ok(ArtifactReference {
            id: *artifact.id(),
            filename: artifact.filename().clone(),
            storage_backend: self.backend_name().to_string(),
            storage_path: path.to_string_lossy().to_string(),
            url: public_url(&self.public_prefix, artifact.filename()),
            content_hash: hash,
            size_bytes: data.len() as u64,
            mime_type: artifact.mime_type().to_string(),
        })
    }

    #[tracing::instrument(skip(self, reference), fields(filename = %reference.filename))]
    async fn retrieve(&self, reference: &ArtifactReference) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(&reference.filename)?;
        let data = Self::read(&path, &reference.filename).await?;

        verify_hash(&data, &reference.content_hash)?;

        tracing::debug!(size = data.len(), "Retrieved artifact");
        Ok(data)
    }

    #[tracing::instrument(skip(self))]
    async fn load(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(filename)?;
        Self::read(&path, filename).await
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, filename: &str) -> Result<bool, StorageError> {
        let path = self.path_for(filename)?;
        tokio::fs::try_exists(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })
    }

    #[tracing::instrument(skip(self, reference), fields(filename = %reference.filename))]
    async fn delete(&self, reference: &ArtifactReference) -> Result<(), StorageError> {
        let path = self.path_for(&reference.filename)?;

        tokio::fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.filename.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "delete {}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::info!(path = %path.display(), "Deleted artifact");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
