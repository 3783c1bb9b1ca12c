//! Bot configuration loaded from TOML files
//!
//! Every section is optional; a missing file or an empty document yields the
//! stock MovieBot setup:
//! - Gemini model, endpoint, and sampling parameters
//! - Safety thresholds sent with each request
//! - Persona overrides
//! - Rule engine seeding

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::conversation::DEFAULT_HISTORY_WINDOW;

/// Root bot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Generative provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Content safety thresholds
    #[serde(default)]
    pub safety: SafetyConfig,

    /// Persona overrides
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Rule engine settings
    #[serde(default)]
    pub rules: RulesConfig,
}

impl BotConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: BotConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let llm = &self.llm;
        if llm.history_window == 0 {
            return Err(ConfigError::Validation(
                "llm.history_window must be at least 1".into(),
            ));
        }
        if llm.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "llm.timeout_secs must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(ConfigError::Validation(format!(
                "llm.temperature out of range: {}",
                llm.temperature
            )));
        }
        if !(0.0..=1.0).contains(&llm.top_p) {
            return Err(ConfigError::Validation(format!(
                "llm.top_p out of range: {}",
                llm.top_p
            )));
        }
        if llm.max_output_tokens == 0 {
            return Err(ConfigError::Validation(
                "llm.max_output_tokens must be at least 1".into(),
            ));
        }
        if llm.model.trim().is_empty() {
            return Err(ConfigError::Validation("llm.model is empty".into()));
        }
        Ok(())
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name, e.g. "gemini-pro"
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL (without the model path)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Hard limit for the single provider call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Trailing turns forwarded to the provider
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_output_tokens() -> u32 {
    300
}

fn default_top_p() -> f32 {
    0.95
}

fn default_history_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            top_p: default_top_p(),
            history_window: default_history_window(),
        }
    }
}

/// Safety thresholds applied to every harm category listed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    #[serde(default = "default_threshold")]
    pub threshold: String,

    #[serde(default = "default_harm_categories")]
    pub categories: Vec<String>,
}

fn default_threshold() -> String {
    "BLOCK_MEDIUM_AND_ABOVE".to_string()
}

fn default_harm_categories() -> Vec<String> {
    [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            categories: default_harm_categories(),
        }
    }
}

/// Optional replacements for the built-in persona
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaConfig {
    #[serde(default)]
    pub system_prompt: Option<String>,

    #[serde(default)]
    pub acknowledgment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Seed for reproducible reply selection; thread RNG when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
