//! Google Gemini provider
//!
//! Talks to the `generateContent` endpoint of the Generative Language API.
//! The persona goes out as a leading user turn followed by a canned model
//! acknowledgment, then the windowed history, then the new message.
//!
//! # Configuration
//!
//! ```toml
//! [llm]
//! model = "gemini-pro"
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//! api_key_env = "GOOGLE_GEMINI_API_KEY"
//! timeout_secs = 10
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{BotConfig, Persona};
use crate::conversation::{Role, Turn};

use super::{FailureReason, GenerativeClient, ProviderError, RemoteOutcome};

/// Finish reasons that mean the candidate was withheld for policy reasons
const SAFETY_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

/// Longest slice of an error body written to the log
const LOGGED_BODY_LIMIT: usize = 512;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

impl From<&Turn> for Content {
    fn from(turn: &Turn) -> Self {
        let role = match turn.role {
            Role::User => "user",
            Role::Assistant => "model",
        };
        Content::text(role, turn.content.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Clone, Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Gemini client configuration
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Base URL, e.g. https://generativelanguage.googleapis.com/v1beta
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub safety_threshold: String,
    pub harm_categories: Vec<String>,
    pub persona: Persona,
}

impl GeminiSettings {
    pub fn from_config(bot: &BotConfig, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: bot.llm.endpoint.clone(),
            model: bot.llm.model.clone(),
            api_key: api_key.into(),
            timeout: bot.llm.timeout(),
            temperature: bot.llm.temperature,
            max_output_tokens: bot.llm.max_output_tokens,
            top_p: bot.llm.top_p,
            safety_threshold: bot.safety.threshold.clone(),
            harm_categories: bot.safety.categories.clone(),
            persona: Persona::from_config(&bot.persona),
        }
    }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    settings: GeminiSettings,
    client: Client,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, ProviderError> {
        if settings.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured("gemini api key".into()));
        }

        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self { settings, client })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn build_request(&self, message: &str, history: &[Turn]) -> GenerateContentRequest {
        let persona = &self.settings.persona;
        let mut contents = Vec::with_capacity(history.len() + 3);
        contents.push(Content::text("user", persona.system_prompt.clone()));
        contents.push(Content::text("model", persona.acknowledgment.clone()));
        contents.extend(history.iter().map(Content::from));
        contents.push(Content::text("user", message));

        GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
                top_p: self.settings.top_p,
            },
            safety_settings: self
                .settings
                .harm_categories
                .iter()
                .map(|category| SafetySetting {
                    category: category.clone(),
                    threshold: self.settings.safety_threshold.clone(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, message: &str, history: &[Turn]) -> RemoteOutcome {
        let request = self.build_request(message, history);

        let response = match self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return RemoteOutcome::Failure(transport_failure(&e)),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return RemoteOutcome::Failure(transport_failure(&e)),
        };

        interpret(status, &body)
    }
}

fn transport_failure(error: &reqwest::Error) -> FailureReason {
    if error.is_timeout() {
        FailureReason::Timeout
    } else {
        FailureReason::Transport(error.to_string())
    }
}

/// Classify a completed HTTP exchange
fn interpret(status: StatusCode, body: &str) -> RemoteOutcome {
    if !status.is_success() {
        tracing::warn!(
            status = status.as_u16(),
            body = truncate(body, LOGGED_BODY_LIMIT),
            "Gemini returned an error status"
        );
        return RemoteOutcome::Failure(FailureReason::Http(status.as_u16()));
    }

    let parsed: GenerateContentResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => return RemoteOutcome::Failure(FailureReason::Decode(e.to_string())),
    };

    let Some(candidate) = parsed.candidates.first() else {
        let blocked = parsed
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .is_some();
        return if blocked {
            RemoteOutcome::SafetyBlocked
        } else {
            RemoteOutcome::Failure(FailureReason::EmptyResponse)
        };
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if SAFETY_FINISH_REASONS.contains(&reason) {
            return RemoteOutcome::SafetyBlocked;
        }
    }

    candidate
        .content
        .as_ref()
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| RemoteOutcome::Success(text.to_string()))
        .unwrap_or(RemoteOutcome::Failure(FailureReason::EmptyResponse))
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
