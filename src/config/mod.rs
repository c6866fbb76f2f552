// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[processing]` - Removal service endpoint, model, key, timeout and instruction
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. `--config-dir` CLI argument or `WATERMARK_REMOVER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use watermark_remover::config;
//!
//! let (config, warning) = config::load();
//! if warning.is_none() {
//!     println!("model: {}", config.processing.model);
//! }
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Settings for the remote removal service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessingConfig {
    /// Base URL of the generative API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// API key. Environment variables take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(
        default = "default_request_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_timeout_secs: Option<u64>,

    /// Instruction restored on reset. Falls back to [`DEFAULT_INSTRUCTION`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            instruction: None,
        }
    }
}

impl ProcessingConfig {
    /// Resolves the API key: environment first, then the config file.
    ///
    /// Blank values are treated as missing.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| {
                self.api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    /// Returns the request timeout, clamped to the supported range.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Returns the instruction the session starts with and resets to.
    #[must_use]
    pub fn default_instruction(&self) -> String {
        self.instruction
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_INSTRUCTION)
            .to_string()
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub processing: ProcessingConfig,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // Serializes tests that touch the API key environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_key_env() {
        for name in API_KEY_ENV_VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            processing: ProcessingConfig {
                endpoint: "http://localhost:8080/v1beta".to_string(),
                model: "custom-image-model".to_string(),
                api_key: Some("secret".to_string()),
                request_timeout_secs: Some(45),
                instruction: Some("Remove the logo".to_string()),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_rejects_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_with_warning_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[general\nbroken")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_returns_defaults_when_missing() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_processing_section_keeps_defaults() {
        let config: Config = toml::from_str("[processing]\nmodel = \"other\"\n")
            .expect("partial config should parse");
        assert_eq!(config.processing.model, "other");
        assert_eq!(config.processing.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(
            config.processing.request_timeout_secs,
            Some(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn request_timeout_is_clamped() {
        let mut processing = ProcessingConfig {
            request_timeout_secs: Some(1),
            ..ProcessingConfig::default()
        };
        assert_eq!(
            processing.request_timeout(),
            Duration::from_secs(MIN_REQUEST_TIMEOUT_SECS)
        );

        processing.request_timeout_secs = Some(10_000);
        assert_eq!(
            processing.request_timeout(),
            Duration::from_secs(MAX_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn blank_instruction_falls_back_to_default() {
        let processing = ProcessingConfig {
            instruction: Some("   ".to_string()),
            ..ProcessingConfig::default()
        };
        assert_eq!(processing.default_instruction(), DEFAULT_INSTRUCTION);
    }

    #[test]
    fn environment_key_takes_precedence_over_config() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_key_env();
        std::env::set_var("GEMINI_API_KEY", "from-env");

        let processing = ProcessingConfig {
            api_key: Some("from-config".to_string()),
            ..ProcessingConfig::default()
        };
        assert_eq!(processing.resolve_api_key().as_deref(), Some("from-env"));

        clear_key_env();
    }

    #[test]
    fn config_key_used_when_environment_is_empty() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_key_env();
        std::env::set_var("GEMINI_API_KEY", "");

        let processing = ProcessingConfig {
            api_key: Some("from-config".to_string()),
            ..ProcessingConfig::default()
        };
        assert_eq!(processing.resolve_api_key().as_deref(), Some("from-config"));

        clear_key_env();
    }

    #[test]
    fn missing_key_resolves_to_none() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_key_env();
        assert!(ProcessingConfig::default().resolve_api_key().is_none());
    }
}
