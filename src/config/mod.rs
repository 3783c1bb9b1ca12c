//! Application configuration

pub mod bot;
pub mod prompts;

use std::env;
use std::path::PathBuf;

pub use bot::{BotConfig, ConfigError};
pub use prompts::Persona;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Provider key; `None` routes every request straight to the rule engine
    pub gemini_api_key: Option<String>,
    pub bot: BotConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot = match env::var("MOVIEBOT_CONFIG") {
            Ok(path) => BotConfig::from_file(&PathBuf::from(path))?,
            Err(_) => BotConfig::default(),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            gemini_api_key: read_api_key(&bot.llm.api_key_env),
            bot,
        })
    }
}

fn read_api_key(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}
