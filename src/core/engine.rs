//! Conversation engine
//!
//! Entry point for every chat request. It:
//! 1. Short-circuits empty messages to the rule engine's Default pool
//! 2. Skips the network entirely when no provider credential is configured
//! 3. Sends the message and a bounded history window to the provider
//! 4. Falls back to the rule engine on safety blocks and failures
//!
//! The engine holds no per-conversation state; callers send prior turns with
//! every request.

use std::sync::Arc;

use crate::config::Config;
use crate::conversation::{self, Turn, DEFAULT_HISTORY_WINDOW};
use crate::providers::{
    GeminiClient, GeminiSettings, GenerativeClient, ProviderError, RemoteOutcome,
};

use super::catalog::ResponseCatalog;
use super::random::{RandomSource, SeededRandom, ThreadRandom};
use super::resolver::RuleResolver;

/// Which path produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Rules,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReply {
    pub text: String,
    pub source: ReplySource,
}

impl EngineReply {
    fn rules(text: String) -> Self {
        Self {
            text,
            source: ReplySource::Rules,
        }
    }
}

pub struct ConversationEngine {
    remote: Option<Arc<dyn GenerativeClient>>,
    resolver: RuleResolver,
    window_size: usize,
}

impl ConversationEngine {
    /// Rule-engine-only engine
    pub fn new(resolver: RuleResolver) -> Self {
        Self {
            remote: None,
            resolver,
            window_size: DEFAULT_HISTORY_WINDOW,
        }
    }

    pub fn with_remote(mut self, client: Arc<dyn GenerativeClient>) -> Self {
        self.remote = Some(client);
        self
    }

    pub fn with_window(mut self, size: usize) -> Self {
        self.window_size = size.max(1);
        self
    }

    /// Build from application config; a missing key leaves the remote unset
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let random: Arc<dyn RandomSource> = match config.bot.rules.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };
        let resolver = RuleResolver::with_catalog(ResponseCatalog::builtin(), random);
        let engine = Self::new(resolver).with_window(config.bot.llm.history_window);

        match config.gemini_api_key.as_deref() {
            Some(key) => {
                let client = GeminiClient::new(GeminiSettings::from_config(&config.bot, key))?;
                tracing::info!(model = %config.bot.llm.model, "Gemini provider enabled");
                Ok(engine.with_remote(Arc::new(client)))
            }
            None => {
                tracing::warn!(
                    env = %config.bot.llm.api_key_env,
                    "No provider API key set; replies come from the rule engine only"
                );
                Ok(engine)
            }
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    #[cfg(test)]
    pub fn resolver(&self) -> &RuleResolver {
        &self.resolver
    }

    /// Reply text for `message`; never empty
    pub async fn respond(&self, message: &str, history: &[Turn]) -> String {
        let reply = self.reply(message, history).await;
        tracing::debug!(source = ?reply.source, "Reply ready");
        reply.text
    }

    /// Reply along with the path that produced it
    pub async fn reply(&self, message: &str, history: &[Turn]) -> EngineReply {
        let message = message.trim();
        if message.is_empty() {
            return EngineReply::rules(self.resolver.default_reply());
        }

        let Some(remote) = self.remote.as_ref() else {
            return EngineReply::rules(self.resolver.resolve(message, history));
        };

        let window = conversation::window(history, self.window_size);
        match remote.generate(message, window).await {
            RemoteOutcome::Success(text) if !text.trim().is_empty() => {
                tracing::info!(provider = remote.name(), turns = window.len(), "Remote reply");
                EngineReply {
                    text,
                    source: ReplySource::Remote,
                }
            }
            RemoteOutcome::Success(_) => {
                tracing::warn!(provider = remote.name(), "Remote reply was blank; using rules");
                EngineReply::rules(self.resolver.resolve(message, history))
            }
            RemoteOutcome::SafetyBlocked => {
                tracing::warn!(provider = remote.name(), "Remote reply safety-blocked; using rules");
                EngineReply::rules(self.resolver.resolve(message, history))
            }
            RemoteOutcome::Failure(reason) => {
                tracing::warn!(provider = remote.name(), %reason, "Remote generation failed; using rules");
                EngineReply::rules(self.resolver.resolve(message, history))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotConfig;
    use crate::core::classifier::IntentCategory;
    use crate::core::random::FixedRandom;
    use crate::providers::testing::spawn_provider;
    use crate::providers::FailureReason;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Returns a fixed outcome and records the history it was given
    struct ScriptedClient {
        outcome: RemoteOutcome,
        seen: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedClient {
        fn new(outcome: RemoteOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GenerativeClient for ScriptedClient {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, _message: &str, history: &[Turn]) -> RemoteOutcome {
            self.seen
                .lock()
                .unwrap()
                .push(history.iter().map(|t| t.content.clone()).collect());
            self.outcome.clone()
        }
    }

    fn resolver() -> RuleResolver {
        RuleResolver::new().with_random(Arc::new(FixedRandom(1)))
    }

    fn pool(engine: &ConversationEngine, category: IntentCategory) -> Vec<String> {
        engine
            .resolver()
            .catalog()
            .pool(category)
            .into_iter()
            .map(|c| c.render())
            .collect()
    }

    fn long_history(len: usize) -> Vec<Turn> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::user(format!("u{}", i))
                } else {
                    Turn::assistant(format!("a{}", i))
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn test_without_credential_matches_rule_engine() {
        let engine = ConversationEngine::new(resolver());
        let reference = resolver();
        let history = vec![Turn::assistant("🎬 인터스텔라 - 감동적인 SF 영화예요!")];

        for message in ["안녕", "액션 영화 추천해줘", "왜?", "리뷰", "무슨 말인지", ""] {
            for h in [&[][..], &history[..]] {
                let reply = engine.reply(message, h).await;
                assert_eq!(reply.source, ReplySource::Rules);
                assert_eq!(reply.text, reference.resolve(message, h));
            }
        }
    }

    #[tokio::test]
    async fn test_remote_success_is_returned() {
        let client = ScriptedClient::new(RemoteOutcome::Success("기생충 보세요! 🎭".into()));
        let engine = ConversationEngine::new(resolver()).with_remote(client.clone());

        let reply = engine.reply("추천해줘", &[]).await;
        assert_eq!(reply.text, "기생충 보세요! 🎭");
        assert_eq!(reply.source, ReplySource::Remote);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_safety_block_falls_back() {
        let client = ScriptedClient::new(RemoteOutcome::SafetyBlocked);
        let engine = ConversationEngine::new(resolver()).with_remote(client);

        let reply = engine.reply("안녕", &[]).await;
        assert_eq!(reply.source, ReplySource::Rules);
        assert!(pool(&engine, IntentCategory::Greeting).contains(&reply.text));
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let client = ScriptedClient::new(RemoteOutcome::Failure(FailureReason::Timeout));
        let engine = ConversationEngine::new(resolver()).with_remote(client);

        let history = vec![Turn::assistant("❤️ 라라랜드 - 아름다운 영화예요!")];
        let reply = engine.respond("이유가 뭐야?", &history).await;
        assert!(reply.contains("라라랜드"));
    }

    #[tokio::test]
    async fn test_blank_success_falls_back() {
        let client = ScriptedClient::new(RemoteOutcome::Success("  ".into()));
        let engine = ConversationEngine::new(resolver()).with_remote(client);

        let reply = engine.reply("리뷰", &[]).await;
        assert_eq!(reply.source, ReplySource::Rules);
        assert!(pool(&engine, IntentCategory::ReviewHelp).contains(&reply.text));
    }

    #[tokio::test]
    async fn test_empty_message_skips_remote() {
        let client = ScriptedClient::new(RemoteOutcome::Success("remote".into()));
        let engine = ConversationEngine::new(resolver()).with_remote(client.clone());

        let reply = engine.reply("   ", &long_history(4)).await;
        assert_eq!(client.calls(), 0);
        assert!(pool(&engine, IntentCategory::Default).contains(&reply.text));
    }

    #[tokio::test]
    async fn test_remote_sees_bounded_window() {
        let client = ScriptedClient::new(RemoteOutcome::Success("ok".into()));
        let engine = ConversationEngine::new(resolver()).with_remote(client.clone());

        for len in [0, 3, 10, 11, 37] {
            engine.respond("추천", &long_history(len)).await;
        }

        let seen = client.seen.lock().unwrap();
        let lengths: Vec<usize> = seen.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![0, 3, 10, 10, 10]);

        let last = &seen[4];
        assert_eq!(last.first().map(String::as_str), Some("a27"));
        assert_eq!(last.last().map(String::as_str), Some("u36"));
    }

    #[tokio::test]
    async fn test_custom_window_size() {
        let client = ScriptedClient::new(RemoteOutcome::Success("ok".into()));
        let engine = ConversationEngine::new(resolver())
            .with_remote(client.clone())
            .with_window(4);

        engine.respond("추천", &long_history(9)).await;
        assert_eq!(client.seen.lock().unwrap()[0].len(), 4);
    }

    #[tokio::test]
    async fn test_every_path_yields_text() {
        let outcomes = [
            RemoteOutcome::SafetyBlocked,
            RemoteOutcome::Failure(FailureReason::Http(500)),
            RemoteOutcome::Failure(FailureReason::EmptyResponse),
            RemoteOutcome::Success(String::new()),
        ];
        for outcome in outcomes {
            let engine = ConversationEngine::new(RuleResolver::new())
                .with_remote(ScriptedClient::new(outcome));
            for message in ["", "안녕", "ㅁㄴㅇㄹ", "왜?", "겨울 영화"] {
                assert!(!engine.respond(message, &long_history(3)).await.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_provider_503_falls_back_to_rules() {
        let router = axum::Router::new().fallback(|| async {
            (axum::http::StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        });
        let endpoint = spawn_provider(router).await;

        let mut bot = BotConfig::default();
        bot.llm.endpoint = endpoint;
        let settings = GeminiSettings {
            timeout: Duration::from_secs(2),
            ..GeminiSettings::from_config(&bot, "test-key")
        };
        let client = Arc::new(GeminiClient::new(settings).unwrap());
        let engine = ConversationEngine::new(resolver()).with_remote(client);

        let reply = engine.reply("액션 영화 추천해줘", &[]).await;
        assert_eq!(reply.source, ReplySource::Rules);
        assert!(pool(&engine, IntentCategory::GenreAction).contains(&reply.text));
    }

    #[test]
    fn test_from_config_without_key() {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            gemini_api_key: None,
            bot: BotConfig::default(),
        };
        assert!(!ConversationEngine::from_config(&config).unwrap().has_remote());
    }

    #[test]
    fn test_from_config_with_key() {
        let mut bot = BotConfig::default();
        bot.rules.seed = Some(3);
        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            gemini_api_key: Some("secret".into()),
            bot,
        };
        let engine = ConversationEngine::from_config(&config).unwrap();
        assert!(engine.has_remote());
        assert_eq!(engine.window_size, 10);
    }
}
