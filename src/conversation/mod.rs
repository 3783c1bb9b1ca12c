//! Conversation types and the history window
//!
//! The service keeps no conversation state of its own. Callers send the prior
//! turns with every request and the engine only ever reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of trailing turns forwarded to the remote provider
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "model")]
    Assistant,
}

/// A single exchange in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }
}

impl Turn {
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Last `size` turns of `history`, oldest first.
///
/// Returns the whole history when it is shorter than the window.
pub fn window(history: &[Turn], size: usize) -> &[Turn] {
    let start = history.len().saturating_sub(size);
    &history[start..]
}
