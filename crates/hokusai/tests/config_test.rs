//! Configuration layering tests.

use hokusai::{ConfigLoader, HokusaiConfig, HokusaiErrorKind};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_defaults() {
    let config = ConfigLoader::isolated().load().unwrap();

    assert_eq!(config.server().address(), "127.0.0.1:5002");
    assert_eq!(config.storage().directory(), &PathBuf::from("static/temp"));
    assert_eq!(config.storage().public_prefix(), "/artifacts");
    assert_eq!(*config.pipeline().max_concurrent_renders(), 2);
    assert_eq!(*config.story().panel_count(), 4);
    assert!(config.story().api_key().is_none());
    assert!(config.compose().font_dir().is_none());
    assert!(!config.logging().json());
}

#[test]
fn test_file_overrides_defaults() {
    let file = toml_file(
        r#"
[server]
port = 8080

[story]
base_url = "http://gpu-box:8000"
panel_count = 6

[pipeline]
max_concurrent_renders = 4

[compose]
font_dir = "assets/fonts"
"#,
    );

    let config = ConfigLoader::isolated().with_file(file.path()).load().unwrap();

    assert_eq!(*config.server().port(), 8080);
    assert_eq!(config.server().host(), "127.0.0.1");
    assert_eq!(config.story().base_url(), "http://gpu-box:8000");
    assert_eq!(*config.story().panel_count(), 6);
    // untouched keys in a touched section keep their defaults
    assert_eq!(config.story().model(), "llama3");
    assert_eq!(*config.pipeline().max_concurrent_renders(), 4);
    assert_eq!(*config.pipeline().render_timeout_secs(), 180);
    assert_eq!(
        config.compose().font_dir().as_deref(),
        Some(std::path::Path::new("assets/fonts"))
    );
}

#[test]
fn test_env_overrides_file() {
    let file = toml_file("[server]\nport = 8080\n");
    let vars = env(&[
        ("HOKUSAI__SERVER__PORT", "9090"),
        ("HOKUSAI__STORY__API_KEY", "sk-local"),
        ("HOKUSAI__LOGGING__JSON", "true"),
        ("UNRELATED__SERVER__PORT", "1"),
    ]);

    let config = ConfigLoader::isolated()
        .with_file(file.path())
        .with_env(vars)
        .load()
        .unwrap();

    assert_eq!(*config.server().port(), 9090);
    assert_eq!(config.story().api_key().as_deref(), Some("sk-local"));
    assert!(*config.logging().json());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let err = ConfigLoader::isolated()
        .with_file("/definitely/not/here/hokusai.toml")
        .load()
        .unwrap_err();
    assert!(matches!(err.kind(), HokusaiErrorKind::Config(_)));
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = toml_file("[server\nport = ");
    let err = ConfigLoader::isolated().with_file(file.path()).load().unwrap_err();
    assert!(matches!(err.kind(), HokusaiErrorKind::Config(_)));
}

#[test]
fn test_zero_concurrency_is_rejected() {
    let file = toml_file("[pipeline]\nmax_concurrent_renders = 0\n");
    let err = ConfigLoader::isolated().with_file(file.path()).load().unwrap_err();
    match err.kind() {
        HokusaiErrorKind::Config(e) => assert!(e.message.contains("max_concurrent_renders")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_zero_panel_count_is_rejected() {
    let vars = env(&[("HOKUSAI__STORY__PANEL_COUNT", "0")]);
    let err = ConfigLoader::isolated().with_env(vars).load().unwrap_err();
    assert!(matches!(err.kind(), HokusaiErrorKind::Config(_)));
}

#[test]
fn test_cli_overrides_apply_last() {
    let config = ConfigLoader::isolated()
        .load()
        .unwrap()
        .with_server(Some("0.0.0.0".to_string()), None);
    assert_eq!(config.server().address(), "0.0.0.0:5002");
    assert!(config.validate().is_ok());

    let blank = HokusaiConfig::default().with_server(Some("  ".to_string()), None);
    assert!(blank.validate().is_err());
}
