//! Artifact reference types.

use hokusai_core::CompositeArtifact;
use hokusai_error::{StorageError, StorageErrorKind};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Reference to a stored artifact.
///
/// `url` is what the HTTP layer hands back to callers; `storage_path` is the
/// backend-specific location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactReference {
    /// Artifact id (same as the composed artifact's id)
    pub id: Uuid,
    /// File name, unique per artifact
    pub filename: String,
    /// Storage backend name (e.g., "filesystem", "memory")
    pub storage_backend: String,
    /// Backend-specific path or key
    pub storage_path: String,
    /// Public URL path under which the artifact is served
    pub url: String,
    /// SHA-256 of the stored bytes
    pub content_hash: String,
    /// Size of the stored bytes
    pub size_bytes: u64,
    /// MIME type
    pub mime_type: String,
}

/// Compute the SHA-256 hash of data as lowercase hex.
pub fn compute_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Reject filenames that could escape the artifact namespace.
///
/// # Errors
///
/// Returns [`StorageErrorKind::InvalidPath`] for empty names, names with path
/// separators, and `.`/`..`.
#[track_caller]
pub fn validate_filename(filename: &str) -> Result<(), StorageError> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StorageError::new(StorageErrorKind::InvalidPath(
            filename.to_string(),
        )));
    }
    Ok(())
}

/// Join a public prefix and a filename without doubling slashes.
pub(crate) fn public_url(prefix: &str, filename: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), filename)
}

/// Fail unless `data` hashes to `expected`.
#[track_caller]
pub(crate) fn verify_hash(data: &[u8], expected: &str) -> Result<(), StorageError> {
    let actual = compute_hash(data);
    if actual != expected {
        return Err(StorageError::new(StorageErrorKind::HashMismatch {
            expected: expected.to_string(),
            actual,
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("comic_1_abc.png").is_ok());
        for bad in ["", ".", "..", "../etc/passwd", "a/b.png", "a\\b.png"] {
            assert!(validate_filename(bad).is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn test_public_url() {
        assert_eq!(public_url("/artifacts", "a.png"), "/artifacts/a.png");
        assert_eq!(public_url("/artifacts/", "a.png"), "/artifacts/a.png");
        assert_eq!(public_url("", "a.png"), "/a.png");
    }

    #[test]
    fn test_hash_is_stable_hex() {
        let hash = compute_hash(b"hokusai");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, compute_hash(b"hokusai"));
        assert!(verify_hash(b"hokusai", &hash).is_ok());
        assert!(verify_hash(b"hiroshige", &hash).is_err());
    }
}

/// PNG-encode an artifact on the blocking pool.
pub(crate) async fn encode_artifact(artifact: &CompositeArtifact) -> Result<Vec<u8>, StorageError> {
    let artifact = artifact.clone();
    tokio::task::spawn_blocking(move || artifact.encode_png())
        .await
        .map_err(|e| {
            StorageError::new(StorageErrorKind::Encode(format!("Encoding task failed: {}", e)))
        })?
        .map_err(|e| StorageError::new(StorageErrorKind::Encode(e.to_string())))
}
