//! Persona prompts
//!
//! The provider has no separate system role in the request format we use, so
//! the persona is sent as the first user turn and followed by a canned model
//! acknowledgment before any real history.

use super::bot::PersonaConfig;

/// Resolved persona text sent ahead of every conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub system_prompt: String,
    pub acknowledgment: String,
}

impl Persona {
    /// Built-in persona with any configured overrides applied
    pub fn from_config(config: &PersonaConfig) -> Self {
        Self {
            system_prompt: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| builtin::MOVIEBOT.to_string()),
            acknowledgment: config
                .acknowledgment
                .clone()
                .unwrap_or_else(|| builtin::ACKNOWLEDGMENT.to_string()),
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::from_config(&PersonaConfig::default())
    }
}

/// Built-in prompts that don't require files
pub mod builtin {
    /// MovieBot persona
    pub const MOVIEBOT: &str = r#"당신은 MovieHub의 친절한 영화 추천 챗봇 "MovieBot"입니다.

역할:
- 사용자에게 영화를 추천하고 영화 관련 정보를 제공합니다
- MovieHub 사이트 사용법을 안내합니다
- 친근하고 따뜻한 톤으로 대화합니다

답변 규칙:
1. 이모지를 적절히 사용하세요 (🎬, 🍿, ⭐, 💕 등)
2. 3-4문장 이내로 간결하게 답변하세요
3. 영화 추천 시 간단한 이유를 함께 제공하세요
4. 한국어로 자연스럽게 답변하세요
5. 구체적인 영화 제목, 감독, 배우 정보를 활용하세요
6. 이전 대화에서 추천한 영화에 대한 질문이면 그 영화를 기준으로 답변하세요"#;

    /// Model turn that closes the persona preamble
    pub const ACKNOWLEDGMENT: &str =
        "네, 알겠습니다! MovieBot으로서 친절하게 영화 추천과 사이트 안내를 도와드릴게요. 🎬";
}
