use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Application configuration loaded from TOML config file.
/// All fields have sensible defaults — the config file is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Manifest CSV listing annotation files (used when `rate` has no CLI arg).
    pub manifest_path: PathBuf,
    /// Directory where prediction artifacts are written.
    pub output_dir: PathBuf,
    /// Model identifier sent with every chat-completions request.
    pub model: String,
    /// Model service API settings.
    pub api: ApiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("data/Annotations.csv"),
            output_dir: PathBuf::from("."),
            model: crate::DEFAULT_MODEL.to_string(),
            api: ApiConfig::default(),
        }
    }
}

/// Model service API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl AppConfig {
    /// Load config from `~/.config/fretscore/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match config_path {
            Some(path) if path.exists() => {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => {
                        match toml::from_str::<AppConfig>(&contents) {
                            Ok(config) => {
                                log::info!("Loaded config from {}", path.display());
                                config
                            }
                            Err(e) => {
                                log::warn!(
                                    "Failed to parse {}: {}. Using defaults.",
                                    path.display(),
                                    e
                                );
                                Self::default()
                            }
                        }
                    }
                    Err(e) => {
                        log::warn!(
                            "Failed to read {}: {}. Using defaults.",
                            path.display(),
                            e
                        );
                        Self::default()
                    }
                }
            }
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
