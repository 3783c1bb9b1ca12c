//! Rule-based reply resolution
//!
//! The fallback path whenever the remote model is unavailable. It never fails
//! and never returns an empty string: any lookup miss degrades to the Default
//! pool, and an empty Default pool degrades to [`LAST_RESORT_REPLY`].

use std::sync::Arc;

use crate::conversation::Turn;

use super::catalog::{ResponseCandidate, ResponseCatalog};
use super::classifier::{ClassificationOutcome, IntentCategory, IntentClassifier};
use super::random::{RandomSource, ThreadRandom};

/// Used only when a custom catalog has no Default candidates
pub const LAST_RESORT_REPLY: &str = "죄송해요, 다시 말씀해주시겠어요? 🙏";

pub struct RuleResolver {
    catalog: ResponseCatalog,
    classifier: IntentClassifier,
    random: Arc<dyn RandomSource>,
}

impl RuleResolver {
    /// Built-in catalog with thread-local randomness
    pub fn new() -> Self {
        Self::with_catalog(ResponseCatalog::builtin(), Arc::new(ThreadRandom))
    }

    pub fn with_catalog(catalog: ResponseCatalog, random: Arc<dyn RandomSource>) -> Self {
        let classifier = IntentClassifier::new(catalog.known_titles());
        Self {
            catalog,
            classifier,
            random,
        }
    }

    /// Swap the random source, keeping the catalog
    #[cfg(test)]
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }

    /// Reply to `message` given the prior conversation
    pub fn resolve(&self, message: &str, history: &[Turn]) -> String {
        let last_assistant = history
            .last()
            .filter(|turn| turn.is_assistant())
            .map(|turn| turn.content.as_str());

        let outcome = self.classifier.classify(message, last_assistant);
        tracing::debug!(
            category = ?outcome.category,
            entity = outcome.matched_entity.as_deref().unwrap_or("-"),
            "Classified message"
        );

        self.reply_for(&outcome)
    }

    /// Reply for an already classified message
    pub fn reply_for(&self, outcome: &ClassificationOutcome) -> String {
        if outcome.category == IntentCategory::FollowUpReason {
            if let Some(rationale) = outcome
                .matched_entity
                .as_deref()
                .and_then(|title| self.catalog.rationale(title))
            {
                return rationale.render();
            }
        }

        self.pick(outcome.category)
            .or_else(|| self.pick(IntentCategory::Default))
            .map(|candidate| candidate.render())
            .filter(|reply| !reply.trim().is_empty())
            .unwrap_or_else(|| LAST_RESORT_REPLY.to_string())
    }

    /// Random Default-pool reply
    pub fn default_reply(&self) -> String {
        self.reply_for(&ClassificationOutcome::new(IntentCategory::Default))
    }

    fn pick(&self, category: IntentCategory) -> Option<&ResponseCandidate> {
        let pool = self.catalog.pool(category);
        if pool.is_empty() {
            return None;
        }
        let index = self.random.pick(pool.len()).min(pool.len() - 1);
        Some(pool[index])
    }
}

impl Default for RuleResolver {
    fn default() -> Self {
        Self::new()
    }
}
