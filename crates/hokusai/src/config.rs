//! Layered application configuration.

use config::{Config, Environment, File, FileFormat};
use hokusai_error::{ConfigError, HokusaiResult};
use hokusai_models::{RendererConfig, StoryConfig};
use hokusai_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../hokusai.toml");

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    host: String,
    /// Port to bind
    port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5002,
        }
    }
}

impl ServerSettings {
    /// `host:port` string suitable for binding.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where composed pages are written and served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory pages are written to
    directory: PathBuf,
    /// URL prefix pages are served under
    public_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("static/temp"),
            public_prefix: "/artifacts".to_string(),
        }
    }
}

/// Composition settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ComposeSettings {
    /// Extra directory of caption fonts, loaded after system fonts
    font_dir: Option<PathBuf>,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    level: String,
    /// Emit JSON lines instead of human-readable text
    json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete Hokusai configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct HokusaiConfig {
    /// HTTP listener
    server: ServerSettings,
    /// Story backend
    story: StoryConfig,
    /// Panel renderer backend
    renderer: RendererConfig,
    /// Per-request concurrency and timeouts
    pipeline: PipelineConfig,
    /// Artifact storage
    storage: StorageSettings,
    /// Page composition
    compose: ComposeSettings,
    /// Logging
    logging: LoggingSettings,
}

impl HokusaiConfig {
    /// Load configuration with the standard precedence.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (hokusai.toml shipped with the binary)
    /// 2. User config in home directory (~/.config/hokusai/hokusai.toml)
    /// 3. User config in current directory (./hokusai.toml)
    /// 4. `explicit`, if given (must exist)
    /// 5. Environment variables `HOKUSAI__SECTION__KEY`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be read or parsed, or if a
    /// value is out of range.
    pub fn load(explicit: Option<&Path>) -> HokusaiResult<Self> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = explicit {
            loader = loader.with_file(path);
        }
        loader.load()
    }

    /// Override the listener address.
    pub fn with_server(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    /// Check values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first offending key.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if *self.pipeline.max_concurrent_renders() == 0 {
            return Err(ConfigError::new(
                "pipeline.max_concurrent_renders must be at least 1",
            ));
        }
        if *self.story.panel_count() == 0 {
            return Err(ConfigError::new("story.panel_count must be at least 1"));
        }
        if *self.renderer.width() == 0 || *self.renderer.height() == 0 {
            return Err(ConfigError::new(
                "renderer.width and renderer.height must be non-zero",
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::new("server.host must not be empty"));
        }
        if self.storage.public_prefix.trim().is_empty() {
            return Err(ConfigError::new("storage.public_prefix must not be empty"));
        }
        Ok(())
    }
}

/// Builder over the configuration sources.
///
/// [`HokusaiConfig::load`] covers the common case; the loader exists so the
/// user-level files and the environment can be swapped out.
///
/// # Example
///
/// ```
/// use hokusai::ConfigLoader;
/// use std::collections::HashMap;
///
/// let env = HashMap::from([("HOKUSAI__SERVER__PORT".to_string(), "8000".to_string())]);
/// let config = ConfigLoader::isolated().with_env(env).load().unwrap();
/// assert_eq!(*config.server().port(), 8000);
/// assert_eq!(*config.pipeline().max_concurrent_renders(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_files: Vec<PathBuf>,
    explicit: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader with the home and working directory files and the process environment.
    pub fn new() -> Self {
        let mut user_files = Vec::new();
        if let Some(home) = dirs::home_dir() {
            user_files.push(home.join(".config/hokusai/hokusai.toml"));
        }
        user_files.push(PathBuf::from("hokusai.toml"));
        Self {
            user_files,
            explicit: None,
            env: None,
        }
    }

    /// Loader with only the bundled defaults and an empty environment.
    pub fn isolated() -> Self {
        Self {
            user_files: Vec::new(),
            explicit: None,
            env: Some(HashMap::new()),
        }
    }

    /// Add a required file above the user-level files.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Read overrides from `vars` instead of the process environment.
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Merge every source and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be read or parsed, or if a
    /// value is out of range.
    #[instrument(skip(self), fields(explicit = ?self.explicit))]
    pub fn load(self) -> HokusaiResult<HokusaiConfig> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        for path in &self.user_files {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }

        if let Some(path) = &self.explicit {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("HOKUSAI")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(self.env),
        );

        let config: HokusaiConfig = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_match_code_defaults() {
        let config = ConfigLoader::isolated().load().unwrap();
        assert_eq!(config, HokusaiConfig::default());
    }

    #[test]
    fn test_server_override() {
        let config = HokusaiConfig::default().with_server(None, Some(9000));
        assert_eq!(config.server().address(), "127.0.0.1:9000");
    }
}
