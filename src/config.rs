//! Configuration management for Dhinchak
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{DhinchakError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Dhinchak
///
/// This structure holds all configuration needed for the chat client,
/// including provider settings and chat presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration
    pub provider: ProviderConfig,

    /// Chat presentation configuration
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Provider configuration
///
/// Specifies the generative-language provider and its settings. Gemini is
/// the only provider today; the nesting mirrors the config file layout so
/// additional providers can slot in beside it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for the generative-language API
    ///
    /// Usually supplied via the `DHINCHAK_API_KEY` or `GEMINI_API_KEY`
    /// environment variable rather than the config file. An empty key is a
    /// startup-time configuration failure, not a per-call error.
    #[serde(default)]
    pub api_key: String,

    /// Base URL for the generative-language API (useful for tests and mocks)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Model to use
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Generation parameters sent with every request
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.0-pro".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_gemini_api_base(),
            model: default_gemini_model(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Generation parameters for the model
///
/// Every request carries the same fixed configuration; there is no
/// per-session or per-message tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature (creativity/randomness)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus-sampling cutoff
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Hard cap on reply length in tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f64 {
    0.9
}

fn default_top_p() -> f64 {
    1.0
}

fn default_max_output_tokens() -> u32 {
    2048
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Chat presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Display name for the assistant, used in the banner and the
    /// thinking notice
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
}

fn default_assistant_name() -> String {
    "DHINCHAK".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            provider: ProviderConfig::default(),
            chat: ChatConfig::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DhinchakError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| DhinchakError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var("DHINCHAK_API_KEY") {
            self.provider.gemini.api_key = api_key;
        } else if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            self.provider.gemini.api_key = api_key;
        }

        if let Ok(api_base) = std::env::var("DHINCHAK_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(model) = std::env::var("DHINCHAK_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(name) = std::env::var("DHINCHAK_ASSISTANT_NAME") {
            self.chat.assistant_name = name;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(model) = cli.command.model_override() {
            self.provider.gemini.model = model.to_string();
        }
    }

    /// Validate the configuration
    ///
    /// The API credential is required at process start; its absence is a
    /// configuration failure before any command runs.
    ///
    /// # Errors
    ///
    /// Returns `DhinchakError::MissingCredentials` if the API key is empty,
    /// or `DhinchakError::Config` for out-of-range generation parameters or
    /// a malformed API base URL.
    pub fn validate(&self) -> Result<()> {
        let gemini = &self.provider.gemini;

        if gemini.api_key.trim().is_empty() {
            return Err(DhinchakError::MissingCredentials("gemini".to_string()).into());
        }

        if gemini.model.trim().is_empty() {
            return Err(DhinchakError::Config("model must not be empty".to_string()).into());
        }

        url::Url::parse(&gemini.api_base).map_err(|e| {
            DhinchakError::Config(format!("Invalid api_base '{}': {}", gemini.api_base, e))
        })?;

        let generation = &gemini.generation;
        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(DhinchakError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                generation.temperature
            ))
            .into());
        }

        if !(0.0..=1.0).contains(&generation.top_p) {
            return Err(DhinchakError::Config(format!(
                "top_p must be between 0.0 and 1.0, got {}",
                generation.top_p
            ))
            .into());
        }

        if generation.max_output_tokens == 0 {
            return Err(DhinchakError::Config(
                "max_output_tokens must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
