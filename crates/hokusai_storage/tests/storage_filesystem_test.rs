//! Tests for the filesystem artifact store.

use hokusai_core::{CompositeArtifact, Quality, Style};
use hokusai_storage::{ArtifactStore, FileSystemArtifactStore, StorageErrorKind};
use image::{Rgb, RgbImage};
use tempfile::TempDir;

fn artifact() -> CompositeArtifact {
    CompositeArtifact::new(
        RgbImage::from_pixel(24, 16, Rgb([200, 40, 40])),
        Vec::new(),
        Style::default(),
        Quality::Draft,
    )
}

#[tokio::test]
async fn test_save_and_retrieve() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemArtifactStore::new(temp_dir.path(), "/artifacts").unwrap();
    let artifact = artifact();

    let reference = store.save(&artifact).await.unwrap();

    assert_eq!(reference.storage_backend, "filesystem");
    assert_eq!(reference.mime_type, "image/png");
    assert_eq!(reference.filename, *artifact.filename());
    assert_eq!(reference.url, format!("/artifacts/{}", artifact.filename()));
    assert!(temp_dir.path().join(artifact.filename()).exists());

    // Retrievable immediately after save
    let data = store.retrieve(&reference).await.unwrap();
    assert_eq!(data.len() as u64, reference.size_bytes);

    let decoded = image::load_from_memory(&data).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (24, 16));
    assert_eq!(decoded.get_pixel(0, 0), &Rgb([200, 40, 40]));
}

#[tokio::test]
async fn test_no_temp_files_left_behind() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemArtifactStore::new(temp_dir.path(), "/artifacts").unwrap();

    store.save(&artifact()).await.unwrap();

    let names: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with(".png"));
}

#[tokio::test]
async fn test_concurrent_saves_do_not_collide() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemArtifactStore::new(temp_dir.path(), "/artifacts").unwrap();

    let (a, b) = (artifact(), artifact());
    let (ref_a, ref_b) = tokio::join!(store.save(&a), store.save(&b));
    let (ref_a, ref_b) = (ref_a.unwrap(), ref_b.unwrap());

    assert_ne!(ref_a.filename, ref_b.filename);
    assert!(store.exists(&ref_a.filename).await.unwrap());
    assert!(store.exists(&ref_b.filename).await.unwrap());
}

#[tokio::test]
async fn test_hash_verification_detects_tampering() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemArtifactStore::new(temp_dir.path(), "/artifacts").unwrap();
    let reference = store.save(&artifact()).await.unwrap();

    std::fs::write(&reference.storage_path, b"not a png").unwrap();

    let err = store.retrieve(&reference).await.unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::HashMismatch { .. }));
}

#[tokio::test]
async fn test_load_rejects_path_traversal() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemArtifactStore::new(temp_dir.path(), "/artifacts").unwrap();

    let err = store.load("../secret.png").await.unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::InvalidPath(_)));
}

#[tokio::test]
async fn test_missing_artifact_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemArtifactStore::new(temp_dir.path(), "/artifacts").unwrap();

    let err = store.load("comic_0_missing.png").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!store.exists("comic_0_missing.png").await.unwrap());
}

#[tokio::test]
async fn test_delete() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemArtifactStore::new(temp_dir.path(), "/artifacts").unwrap();
    let reference = store.save(&artifact()).await.unwrap();

    store.delete(&reference).await.unwrap();
    assert!(!store.exists(&reference.filename).await.unwrap());

    let err = store.delete(&reference).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_creates_nested_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("static").join("temp");

    let store = FileSystemArtifactStore::new(&nested, "/artifacts").unwrap();

    assert!(nested.is_dir());
    assert_eq!(store.base_path(), nested.as_path());
}

#[tokio::test]
async fn test_failed_rename_cleans_up_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemArtifactStore::new(temp_dir.path(), "/artifacts").unwrap();
    let artifact = artifact();

    // A directory squatting on the target name makes the final rename fail
    std::fs::create_dir(temp_dir.path().join(artifact.filename())).unwrap();

    let err = store.save(&artifact).await.unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::FileWrite(_)));

    let leftovers: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[tokio::test]
async fn test_exists_reports_io_errors() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("pages");
    let store = FileSystemArtifactStore::new(&base, "/artifacts").unwrap();

    // Replace the store directory with a plain file so lookups hit ENOTDIR
    std::fs::remove_dir(&base).unwrap();
    std::fs::write(&base, b"not a directory").unwrap();

    let err = store.exists("comic_0_missing.png").await.unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::FileRead(_)));
}
