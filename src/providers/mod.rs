//! Generative provider integrations

pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::conversation::Turn;

pub use gemini::{GeminiClient, GeminiSettings};

/// Errors raised while building a provider client
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a remote call produced no usable reply
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("HTTP {0}")]
    Http(u16),

    #[error("timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("empty response")]
    EmptyResponse,

    #[error("undecodable response: {0}")]
    Decode(String),
}

/// Classified result of one remote generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    Success(String),
    SafetyBlocked,
    Failure(FailureReason),
}

/// A remote model that can continue a conversation.
///
/// Implementations issue at most one network call per invocation and report
/// every problem through [`RemoteOutcome`] instead of an error.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Generate a reply to `message` given an already windowed history
    async fn generate(&self, message: &str, history: &[Turn]) -> RemoteOutcome;
}
