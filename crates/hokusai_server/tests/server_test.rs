//! HTTP tests against a live router on an ephemeral port.

mod test_utils;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hokusai_server::BANNER;
use serde_json::{Value, json};
use test_utils::{ScriptedStory, SelectiveRenderer, spawn_server};

#[tokio::test]
async fn test_banner_and_status() -> anyhow::Result<()> {
    let server = spawn_server(ScriptedStory::robot(), SelectiveRenderer::all()).await;
    let client = reqwest::Client::new();

    let banner = client.get(&server.base_url).send().await?.text().await?;
    assert_eq!(banner, BANNER);

    let status: Value = client
        .get(format!("{}/status", server.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(status, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn test_generate_and_fetch_artifact() -> anyhow::Result<()> {
    let server = spawn_server(ScriptedStory::robot(), SelectiveRenderer::all()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/generate", server.base_url))
        .json(&json!({"prompt": "a robot learns to paint", "quality": "draft"}))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;

    assert_eq!(body["success"], true);
    assert_eq!(body["panels"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["story"][2], "Its first painting is a sunrise.");
    assert!(body["warnings"].is_null());
    assert_eq!(body["panels"][0]["text"], "A robot finds a dusty easel.");
    let panel = STANDARD.decode(body["panels"][0]["image"].as_str().unwrap_or_default())?;
    assert!(image::load_from_memory(&panel).is_ok());

    let reference = body["artifact_reference"].as_str().unwrap_or_default();
    assert!(reference.starts_with("/artifacts/comic_"));
    assert_eq!(server.store.len().await, 1);

    let page = client
        .get(format!("{}{}", server.base_url, reference))
        .send()
        .await?;
    assert_eq!(page.status(), 200);
    assert_eq!(page.headers()["content-type"], "image/png");
    assert_eq!(page.headers()["cache-control"], "no-cache");
    let bytes = page.bytes().await?;
    assert!(image::load_from_memory(&bytes).is_ok());
    Ok(())
}

#[tokio::test]
async fn test_generate_with_one_rejected_panel() -> anyhow::Result<()> {
    let renderer = SelectiveRenderer::all().rejecting("It dips a claw into bright paint.");
    let server = spawn_server(ScriptedStory::robot(), renderer).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/generate", server.base_url))
        .json(&json!({"prompt": "a robot learns to paint"}))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["panels"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["story"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["warnings"], json!(["Panel 2: content filter"]));
    Ok(())
}

#[tokio::test]
async fn test_bad_requests() -> anyhow::Result<()> {
    let server = spawn_server(ScriptedStory::robot(), SelectiveRenderer::all()).await;
    let client = reqwest::Client::new();
    let url = format!("{}/generate", server.base_url);

    let blank = client.post(&url).json(&json!({"prompt": "   "})).send().await?;
    assert_eq!(blank.status(), 400);
    assert_eq!(blank.json::<Value>().await?, json!({"error": "Prompt is required"}));

    let missing = client.post(&url).json(&json!({})).send().await?;
    assert_eq!(missing.status(), 400);

    let garbage = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(garbage.status(), 400);
    assert_eq!(garbage.json::<Value>().await?, json!({"error": "No data provided"}));

    let no_body = client.post(&url).send().await?;
    assert_eq!(no_body.status(), 400);

    assert!(server.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_story_failure_is_server_error() -> anyhow::Result<()> {
    let server = spawn_server(ScriptedStory::broken(), SelectiveRenderer::all()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/generate", server.base_url))
        .json(&json!({"prompt": "a robot learns to paint"}))
        .send()
        .await?;
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Failed to generate story");
    assert!(body.get("success").is_none());
    Ok(())
}

#[tokio::test]
async fn test_no_panels_is_server_error_with_flag() -> anyhow::Result<()> {
    let renderer = SelectiveRenderer::all()
        .rejecting("A robot finds a dusty easel.")
        .rejecting("It dips a claw into bright paint.")
        .rejecting("Its first painting is a sunrise.");
    let server = spawn_server(ScriptedStory::robot(), renderer).await;

    let response = reqwest::Client::new()
        .post(format!("{}/generate", server.base_url))
        .json(&json!({"prompt": "a robot learns to paint"}))
        .send()
        .await?;
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], false);
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Failed to generate any panels. Panel 1: content filter")
    );
    assert!(server.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_unknown_artifact_is_not_found() -> anyhow::Result<()> {
    let server = spawn_server(ScriptedStory::robot(), SelectiveRenderer::all()).await;

    let response = reqwest::get(format!("{}/artifacts/comic_0_missing.png", server.base_url)).await?;
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await?;
    assert!(body["error"].as_str().unwrap_or_default().contains("comic_0_missing.png"));
    Ok(())
}

#[tokio::test]
async fn test_cross_origin_requests_are_allowed() -> anyhow::Result<()> {
    let server = spawn_server(ScriptedStory::robot(), SelectiveRenderer::all()).await;
    let client = reqwest::Client::new();

    let status = client
        .get(format!("{}/status", server.base_url))
        .header("origin", "http://localhost:3000")
        .send()
        .await?;
    assert_eq!(status.status(), 200);
    assert_eq!(status.headers()["access-control-allow-origin"], "*");

    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("{}/generate", server.base_url))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await?;
    assert!(preflight.status().is_success());
    assert_eq!(preflight.headers()["access-control-allow-origin"], "*");
    assert!(preflight.headers().contains_key("access-control-allow-methods"));
    Ok(())
}
