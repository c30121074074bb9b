//! `hokusai generate` handler.

use hokusai::{
    HokusaiConfig, HokusaiResult, JsonError, Quality, StoryRequest, Style, build_studio,
};
use tracing::info;

/// Run one request end to end and print the result.
pub async fn run_generate(
    config: &HokusaiConfig,
    prompt: &str,
    style: &str,
    quality: &str,
    json: bool,
) -> HokusaiResult<()> {
    let studio = build_studio(config)?;
    let request = StoryRequest::new(prompt)
        .with_style(Style::new(style))
        .with_quality(Quality::from_tag(quality));

    let response = studio.create_comic(&request).await?;
    info!(
        panels = response.panels.len(),
        warnings = response.warnings.as_ref().map_or(0, Vec::len),
        "Comic created"
    );

    if json {
        let body = serde_json::to_string_pretty(&response)
            .map_err(|e| JsonError::new(format!("Failed to serialize response: {}", e)))?;
        println!("{}", body);
    } else {
        for warning in response.warnings.iter().flatten() {
            eprintln!("warning: {}", warning);
        }
        let path = config.storage().directory().join(
            response
                .artifact_reference
                .rsplit('/')
                .next()
                .unwrap_or_default(),
        );
        println!("{}", path.display());
    }
    Ok(())
}
