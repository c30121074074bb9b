//! Tests for generation outcomes and the response payloads built from them.

use hokusai_core::{
    CompositeArtifact, ErrorResponse, GenerationOutcome, Panel, PanelMetadata, Quality,
    RasterImage, Style,
};
use image::RgbImage;

fn panel(index: usize, caption: &str) -> Panel {
    Panel::new(index, RasterImage::new_rgb8(8, 8), caption, PanelMetadata::new())
}

#[test]
fn test_story_is_truncated_to_panel_count() {
    let captions: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
    let outcome = GenerationOutcome::new(
        vec![panel(0, "A"), panel(2, "C")],
        vec!["Panel 2: timed out".to_string()],
        &captions,
    );

    assert_eq!(outcome.panels().len(), outcome.story().len());
    // Truncation, not index alignment
    assert_eq!(outcome.story(), &vec!["A".to_string(), "B".to_string()]);
    assert_eq!(outcome.panels()[1].index(), &2);
    assert_eq!(outcome.full_story(), &captions);
    assert_eq!(
        outcome.warnings_if_any(),
        Some(vec!["Panel 2: timed out".to_string()])
    );
}

#[test]
fn test_no_warnings_is_none() {
    let captions = vec!["A".to_string()];
    let outcome = GenerationOutcome::new(vec![panel(0, "A")], Vec::new(), &captions);
    assert_eq!(outcome.warnings_if_any(), None);
}

#[test]
fn test_artifact_filename_and_png() {
    let artifact = CompositeArtifact::new(
        RgbImage::new(16, 12),
        Vec::new(),
        Style::default(),
        Quality::Draft,
    );

    assert!(artifact.filename().starts_with("comic_"));
    assert!(artifact.filename().ends_with(".png"));
    assert_eq!((artifact.width(), artifact.height()), (16, 12));

    let png = artifact.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_artifact_filenames_are_unique() {
    let a = CompositeArtifact::new(RgbImage::new(1, 1), Vec::new(), Style::default(), Quality::Draft);
    let b = CompositeArtifact::new(RgbImage::new(1, 1), Vec::new(), Style::default(), Quality::Draft);
    assert_ne!(a.filename(), b.filename());
}

#[test]
fn test_error_response_omits_absent_fields() {
    let plain = serde_json::to_value(ErrorResponse::new("Prompt is required")).unwrap();
    assert_eq!(plain, serde_json::json!({"error": "Prompt is required"}));

    let failed = serde_json::to_value(
        ErrorResponse::new("Failed to generate any panels")
            .with_message("Panel 1: nsfw")
            .with_success_flag(),
    )
    .unwrap();
    assert_eq!(failed["success"], serde_json::json!(false));
    assert_eq!(failed["message"], serde_json::json!("Panel 1: nsfw"));
}
