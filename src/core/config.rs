//! Application configuration management
//!
//! Handles loading and saving application settings including:
//! - Gemini model selection
//! - Custom prompt instructions
//! - Whether to pause for edits before inserting a message
//!
//! The API key is a secret and lives in [`CredentialStore`], not here.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::core::credentials::CredentialStore;
use crate::error::{GemcommitError, Result};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Models known to work well for commit messages
pub const SUGGESTED_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-2.5-flash", "gemini-2.5-pro"];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Gemini model identifier for generation requests
    #[serde(default = "default_model")]
    pub model: String,

    /// Replaces the default short-form instructions when non-empty
    #[serde(default)]
    pub custom_prompt: String,

    /// Pause for manual edits before inserting a short-form message
    #[serde(default)]
    pub prompt_before_insert: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            custom_prompt: String::new(),
            prompt_before_insert: false,
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the configuration directory
    pub fn config_dir() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "gemcommit", "gemcommit")
            .ok_or_else(|| GemcommitError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().to_path_buf())
    }

    /// Set the model, rejecting blank identifiers
    pub fn set_model(&mut self, model: &str) -> Result<()> {
        let model = model.trim();
        if model.is_empty() {
            return Err(GemcommitError::InvalidInput(format!(
                "Model name cannot be empty. Suggested models: {}",
                SUGGESTED_MODELS.join(", ")
            )));
        }
        self.model = model.to_string();
        Ok(())
    }
}

/// Resolved settings for one action: configuration plus the API key
#[derive(Debug, Clone)]
pub struct Settings {
    /// Gemini API key, if any source provided one
    pub api_key: Option<SecretString>,
    /// Model identifier, never blank
    pub model: String,
    /// Custom short-form instructions, if set
    pub custom_prompt: Option<String>,
    /// Pause for manual edits before inserting a short-form message
    pub prompt_before_insert: bool,
}

impl Settings {
    /// Load configuration and the stored API key
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        let api_key = CredentialStore::get_gemini_key()?;
        Ok(Self::from_config(config, api_key))
    }

    /// Combine a configuration with an API key
    pub fn from_config(config: Config, api_key: Option<SecretString>) -> Self {
        let model = if config.model.trim().is_empty() {
            default_model()
        } else {
            config.model.trim().to_string()
        };

        let custom_prompt = Some(config.custom_prompt)
            .filter(|prompt| !prompt.trim().is_empty());

        Self {
            api_key,
            model,
            custom_prompt,
            prompt_before_insert: config.prompt_before_insert,
        }
    }

    /// Get the API key, returning an error if it is missing or blank
    pub fn require_api_key(&self) -> Result<SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .cloned()
            .ok_or(GemcommitError::NotConfigured)
    }
}
