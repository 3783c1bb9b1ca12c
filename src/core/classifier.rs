//! Keyword intent classifier
//!
//! Utterances are matched against an ordered ladder of rules and the first
//! rule that fires decides the category. There is no scoring: a message that
//! mentions both a greeting and a genre is a greeting because greetings sit
//! higher in the ladder. Reordering [`LADDER`] changes observable behavior.

use serde::Serialize;

/// Closed set of intents the rule engine can answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    FollowUpReason,
    Greeting,
    SeasonSpring,
    SeasonSummer,
    SeasonAutumn,
    SeasonWinter,
    Comfort,
    GenericRecommendation,
    GenreAction,
    GenreRomance,
    GenreComedy,
    GenreHorror,
    SiteUsageHelp,
    AccountHelp,
    ReviewHelp,
    Default,
}

/// Result of classifying one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationOutcome {
    pub category: IntentCategory,
    /// Title picked out of the prior assistant turn, follow-ups only
    pub matched_entity: Option<String>,
}

impl ClassificationOutcome {
    pub fn new(category: IntentCategory) -> Self {
        Self {
            category,
            matched_entity: None,
        }
    }
}

const FOLLOW_UP_MARKERS: &[&str] = &["이유", "왜", "어떻게", "뭐야", "why"];

const GREETING: &[&str] = &["안녕", "하이", "hello", "반가워", "반갑"];

const SPRING: &[&str] = &["봄", "벚꽃"];
const SUMMER: &[&str] = &["여름", "휴가철", "더운 날"];
const AUTUMN: &[&str] = &["가을", "단풍"];
const WINTER: &[&str] = &["겨울", "크리스마스", "연말", "눈 오는"];
const COMFORT: &[&str] = &["우울", "힐링", "위로", "슬퍼", "지친", "지쳤"];

const RECOMMEND: &[&str] = &[
    "추천",
    "뭐 볼까",
    "뭐볼까",
    "재밌는",
    "재미있는",
    "좋은 영화",
    "볼만한",
    "recommend",
];

const ACTION: &[&str] = &["액션", "action"];
const ROMANCE: &[&str] = &["로맨스", "사랑", "멜로", "romance"];
const COMEDY: &[&str] = &["코미디", "웃긴", "웃음", "comedy"];
const HORROR: &[&str] = &["공포", "무서운", "호러", "스릴러", "horror"];

const SITE_USAGE: &[&str] = &["사용법", "어떻게", "방법", "기능"];
const ACCOUNT: &[&str] = &["회원가입", "로그인", "비밀번호", "탈퇴", "계정"];
const REVIEW: &[&str] = &["리뷰", "별점", "평점", "후기"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn mentions_genre(text: &str) -> bool {
    [ACTION, ROMANCE, COMEDY, HORROR]
        .iter()
        .any(|group| contains_any(text, group))
}

/// One rung of the ladder
pub struct Rule {
    pub category: IntentCategory,
    pub matches: fn(&str) -> bool,
}

/// Ladder applied after follow-up detection, highest priority first.
///
/// A generic recommendation request that names a genre is left for the
/// genre rungs so "액션 영화 추천해줘" lands on the action pool.
pub const LADDER: &[Rule] = &[
    Rule {
        category: IntentCategory::Greeting,
        matches: |m| contains_any(m, GREETING),
    },
    Rule {
        category: IntentCategory::SeasonSpring,
        matches: |m| contains_any(m, SPRING),
    },
    Rule {
        category: IntentCategory::SeasonSummer,
        matches: |m| contains_any(m, SUMMER),
    },
    Rule {
        category: IntentCategory::SeasonAutumn,
        matches: |m| contains_any(m, AUTUMN),
    },
    Rule {
        category: IntentCategory::SeasonWinter,
        matches: |m| contains_any(m, WINTER),
    },
    Rule {
        category: IntentCategory::Comfort,
        matches: |m| contains_any(m, COMFORT),
    },
    Rule {
        category: IntentCategory::GenericRecommendation,
        matches: |m| contains_any(m, RECOMMEND) && !mentions_genre(m),
    },
    Rule {
        category: IntentCategory::GenreAction,
        matches: |m| contains_any(m, ACTION),
    },
    Rule {
        category: IntentCategory::GenreRomance,
        matches: |m| contains_any(m, ROMANCE),
    },
    Rule {
        category: IntentCategory::GenreComedy,
        matches: |m| contains_any(m, COMEDY),
    },
    Rule {
        category: IntentCategory::GenreHorror,
        matches: |m| contains_any(m, HORROR),
    },
    Rule {
        category: IntentCategory::SiteUsageHelp,
        matches: |m| contains_any(m, SITE_USAGE),
    },
    Rule {
        category: IntentCategory::AccountHelp,
        matches: |m| contains_any(m, ACCOUNT),
    },
    Rule {
        category: IntentCategory::ReviewHelp,
        matches: |m| contains_any(m, REVIEW),
    },
];

/// Deterministic classifier over a fixed set of recognizable titles
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    titles: Vec<String>,
}

impl IntentClassifier {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Classify `message`, using `last_assistant` to resolve follow-ups.
    ///
    /// `last_assistant` must be the text of the immediately preceding turn,
    /// and only when that turn came from the assistant.
    pub fn classify(&self, message: &str, last_assistant: Option<&str>) -> ClassificationOutcome {
        let normalized = message.trim().to_lowercase();
        if normalized.is_empty() {
            return ClassificationOutcome::new(IntentCategory::Default);
        }

        if let Some(prior) = last_assistant {
            if contains_any(&normalized, FOLLOW_UP_MARKERS) {
                return ClassificationOutcome {
                    category: IntentCategory::FollowUpReason,
                    matched_entity: self.find_title(prior).map(str::to_string),
                };
            }
        }

        let category = LADDER
            .iter()
            .find(|rule| (rule.matches)(&normalized))
            .map(|rule| rule.category)
            .unwrap_or(IntentCategory::Default);

        ClassificationOutcome::new(category)
    }

    /// Earliest known title in `text`; the longer title wins on a shared start
    pub fn find_title(&self, text: &str) -> Option<&str> {
        self.titles
            .iter()
            .filter_map(|title| text.find(title.as_str()).map(|pos| (pos, title)))
            .min_by(|(pos_a, a), (pos_b, b)| pos_a.cmp(pos_b).then(b.len().cmp(&a.len())))
            .map(|(_, title)| title.as_str())
    }
}
