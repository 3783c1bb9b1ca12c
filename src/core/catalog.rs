//! Canned replies for the rule engine

use super::classifier::IntentCategory;

/// Placeholder substituted with the candidate's entity
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// One canned reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCandidate {
    pub category: IntentCategory,
    pub template: &'static str,
    /// Title this reply explains; set only on follow-up rationales
    pub entity_hint: Option<&'static str>,
}

impl ResponseCandidate {
    pub fn text(category: IntentCategory, template: &'static str) -> Self {
        Self {
            category,
            template,
            entity_hint: None,
        }
    }

    pub fn rationale(title: &'static str, template: &'static str) -> Self {
        Self {
            category: IntentCategory::FollowUpReason,
            template,
            entity_hint: Some(title),
        }
    }

    pub fn render(&self) -> String {
        match self.entity_hint {
            Some(title) => self.template.replace(TITLE_PLACEHOLDER, title),
            None => self.template.to_string(),
        }
    }
}

const GREETING: &[&str] = &[
    "안녕하세요! 👋 MovieHub 챗봇입니다. 영화 추천이나 궁금한 점을 물어보세요!",
    "반가워요! 🎬 오늘은 어떤 영화가 보고 싶으세요?",
    "안녕하세요! 🍿 장르나 기분을 알려주시면 딱 맞는 영화를 골라드릴게요!",
];

const GENERIC_RECOMMENDATION: &[&str] = &[
    "🎬 인터스텔라 - 우주를 배경으로 한 감동적인 SF 영화예요!",
    "🎭 기생충 - 봉준호 감독의 아카데미 수상작! 한국 영화의 자랑이에요!",
    "💥 다크 나이트 - 최고의 히어로 영화 중 하나예요!",
    "❤️ 라라랜드 - 뮤지컬과 로맨스가 결합된 아름다운 영화예요!",
    "🌊 어바웃 타임 - 따뜻하고 감동적인 로맨스 영화예요!",
];

const SEASON_SPRING: &[&str] = &[
    "🌸 봄에는 리틀 포레스트 어떠세요? 사계절 음식과 시골 풍경이 마음을 말랑하게 해줘요!",
    "🌸 봄날은 간다 - 봄처럼 설레고 아련한 사랑 이야기예요.",
];

const SEASON_SUMMER: &[&str] = &[
    "☀️ 여름엔 썸머 워즈! 시원한 여름 방학 감성이 가득한 애니메이션이에요.",
    "🌊 콜 미 바이 유어 네임 - 이탈리아의 눈부신 여름을 그대로 담은 영화예요.",
];

const SEASON_AUTUMN: &[&str] = &[
    "🍂 가을엔 건축학개론 어떠세요? 첫사랑의 아련함이 계절과 잘 어울려요.",
    "🍁 유브 갓 메일 - 가을 뉴욕 풍경이 예쁜 따뜻한 로맨틱 코미디예요.",
];

const SEASON_WINTER: &[&str] = &[
    "❄️ 겨울엔 러브레터! 눈 덮인 오타루 풍경과 편지가 오래 남는 영화예요.",
    "🎄 러브 액츄얼리 - 크리스마스 시즌에 딱 맞는 옴니버스 로맨스예요.",
    "⛄ 나 홀로 집에 - 연말이면 꼭 생각나는 가족 코미디예요!",
];

const COMFORT: &[&str] = &[
    "🫂 지친 날엔 인사이드 아웃을 추천해요. 슬픔도 괜찮다고 다독여주는 영화예요.",
    "🎷 소울 - 일상의 작은 순간이 얼마나 소중한지 알려주는 따뜻한 애니메이션이에요.",
    "🌿 리틀 포레스트 - 잠시 쉬어가고 싶을 때 보기 좋은 힐링 영화예요.",
];

const GENRE_ACTION: &[&str] = &[
    "💥 액션 영화 추천드려요!\n- 존 윅 시리즈\n- 매드 맥스: 분노의 도로\n- 미션 임파서블 시리즈\n어떤 스타일의 액션을 좋아하세요?",
    "🔥 화끈한 액션이 당기신다면 존 윅을 추천해요! 키아누 리브스의 건푸 액션은 한 번 보면 잊을 수 없어요.",
    "🚗 쉴 틈 없는 추격전을 원하시면 매드 맥스: 분노의 도로 어떠세요? 맨몸 스턴트가 궁금하다면 미션 임파서블도 좋아요!",
];

const GENRE_ROMANCE: &[&str] = &[
    "❤️ 로맨스 영화 추천드려요!\n- 노트북\n- 비포 선라이즈\n- 러브 액츄얼리\n따뜻한 감동을 느낄 수 있어요!",
    "💕 설레는 대화가 좋다면 비포 선라이즈, 평생의 사랑 이야기가 좋다면 노트북을 추천해요!",
];

const GENRE_COMEDY: &[&str] = &[
    "😂 코미디 영화 추천드려요!\n- 극한직업\n- 써니\n- 엑시트\n웃음이 필요할 때 최고예요!",
    "🤣 극한직업 어떠세요? 치킨집 잠복 수사가 이렇게 웃길 줄 몰랐을 거예요!",
];

const GENRE_HORROR: &[&str] = &[
    "😱 공포 영화 추천드려요!\n- 곡성\n- 컨저링\n- 겟 아웃\n밤에 보시면 잠 못 이루실 수도 있어요!",
    "👻 실화 바탕의 공포를 원하시면 컨저링, 찝찝한 여운을 원하시면 곡성을 추천해요.",
];

const SITE_USAGE_HELP: &[&str] = &[
    "📱 MovieHub 사용법:\n1. 메인 페이지에서 인기 영화 확인\n2. 영화 클릭하면 상세 정보 보기\n3. 리뷰 작성하고 다른 사람들과 공유\n4. 로그인하면 찜하기 기능 이용 가능!",
    "🔎 상단 검색창에 영화 제목을 입력하면 바로 찾을 수 있어요. 영화 카드를 누르면 출연진과 리뷰도 볼 수 있어요!",
];

const ACCOUNT_HELP: &[&str] = &[
    "🔐 회원가입은 상단 메뉴의 '로그인' 버튼을 눌러주세요! 간편하게 가입하실 수 있어요.",
    "🔑 비밀번호 변경이나 회원 탈퇴는 마이페이지 설정에서 하실 수 있어요.",
];

const REVIEW_HELP: &[&str] = &[
    "⭐ 리뷰는 영화 상세 페이지에서 작성할 수 있어요! 별점과 함께 솔직한 감상을 공유해주세요!",
    "📝 내가 쓴 리뷰는 마이페이지의 '내 리뷰'에서 수정하거나 삭제할 수 있어요.",
];

const FOLLOW_UP_GENERIC: &[&str] = &[
    "어떤 영화가 궁금하신지 조금만 더 구체적으로 말씀해주시겠어요? 제목을 알려주시면 자세히 설명해드릴게요! 🎬",
    "더 알고 싶은 영화 제목을 알려주시면 추천 이유를 자세히 말씀드릴게요! 🍿",
];

const DEFAULT: &[&str] = &[
    "영화에 대해 궁금한 점이 있으시면 편하게 물어보세요! 🎬",
    "어떤 장르의 영화를 좋아하세요? 추천해드릴게요! 🍿",
    "영화 추천이나 사이트 사용법이 궁금하시면 말씀해주세요! 😊",
];

const RATIONALES: &[(&str, &str)] = &[
    ("인터스텔라", "🚀 {title}은 크리스토퍼 놀란 감독 작품으로, 실제 물리학 자문을 거친 블랙홀 묘사와 한스 짐머의 음악이 압도적이에요. 매튜 매커너히가 연기한 아버지의 사랑이 우주보다 크게 느껴지는 영화랍니다!"),
    ("기생충", "🎭 {title}은 봉준호 감독이 계층 문제를 블랙코미디로 풀어낸 작품이에요. 송강호의 연기와 예측할 수 없는 전개로 칸 황금종려상과 아카데미 작품상을 모두 받았어요!"),
    ("다크 나이트", "🦇 {title}는 히어로 영화를 범죄 드라마로 끌어올린 크리스토퍼 놀란의 걸작이에요. 히스 레저의 조커 연기는 지금도 전설로 남아 있어요!"),
    ("라라랜드", "🎹 {title}는 데이미언 셔젤 감독의 뮤지컬 영화로, 라이언 고슬링과 엠마 스톤이 꿈과 사랑 사이에서 흔들리는 모습을 그려요. 음악과 색감이 아름답고 엔딩의 여운이 정말 길어요!"),
    ("어바웃 타임", "⏰ {title}은 리처드 커티스 감독의 시간 여행 로맨스예요. 도널 글리슨과 레이첼 맥아담스의 따뜻한 연기로 평범한 하루의 소중함을 일깨워줘요."),
    ("존 윅", "🔫 {title}은 키아누 리브스가 직접 소화한 건푸 액션이 압권이에요. 군더더기 없는 이야기와 독특한 킬러 세계관 덕분에 시리즈 내내 긴장감이 이어져요!"),
    ("매드 맥스", "🚗 {title}: 분노의 도로는 조지 밀러 감독이 CG 대신 실제 차량 추격으로 완성한 액션이에요. 샤를리즈 테론의 퓨리오사가 강렬한 인상을 남겨요!"),
    ("미션 임파서블", "🎯 {title} 시리즈는 톰 크루즈가 대역 없이 해내는 스턴트로 유명해요. 매 편마다 한계를 넘는 액션 시퀀스를 보는 재미가 있어요!"),
    ("노트북", "💌 {title}은 라이언 고슬링과 레이첼 맥아담스가 평생에 걸친 사랑을 연기한 영화예요. 니콜라스 스파크스 원작 특유의 애틋함이 눈물샘을 자극해요."),
    ("비포 선라이즈", "🚆 {title}는 리처드 링클레이터 감독이 하룻밤의 대화만으로 사랑을 그려낸 영화예요. 에단 호크와 줄리 델피의 자연스러운 대화가 정말 설레요!"),
    ("러브 액츄얼리", "🎄 {title}는 리처드 커티스 감독의 크리스마스 옴니버스 로맨스예요. 여러 커플의 사랑 이야기가 얽히면서 연말 분위기를 가득 채워줘요."),
    ("극한직업", "🍗 {title}은 이병헌 감독의 코미디로, 류승룡을 비롯한 배우들의 찰떡 호흡이 빛나요. 마약반 형사들이 치킨집을 차리는 설정부터 웃음이 터져요!"),
    ("써니", "📻 {title}는 강형철 감독이 80년대 음악과 함께 그린 우정 이야기예요. 웃다가 울게 되는 따뜻한 코미디랍니다!"),
    ("엑시트", "🧗 {title}는 조정석과 임윤아가 유독가스를 피해 건물을 오르는 재난 코미디예요. 짠내 나는 현실 유머와 긴장감을 동시에 즐길 수 있어요!"),
    ("곡성", "🌧️ {title}은 나홍진 감독의 미스터리 스릴러예요. 곽도원, 황정민의 연기와 끝까지 정체를 알 수 없는 공포가 오래도록 머릿속에 남아요."),
    ("컨저링", "🕯️ {title}은 제임스 완 감독이 실제 퇴마 사례를 바탕으로 만든 공포 영화예요. 갑작스러운 장면보다 서서히 조여오는 분위기가 정말 무서워요!"),
    ("겟 아웃", "👁️ {title}은 조던 필 감독이 인종 문제를 공포로 풀어낸 작품이에요. 곳곳에 숨은 복선을 찾는 재미가 있어서 두 번 보게 되는 영화예요."),
    ("리틀 포레스트", "🌱 {title}는 임순례 감독, 김태리 주연의 힐링 영화예요. 계절마다 바뀌는 시골 밥상과 풍경이 지친 마음을 편안하게 해줘요."),
    ("봄날은 간다", "🌸 {title}는 허진호 감독 작품으로, 유지태와 이영애가 사랑이 시작되고 저무는 과정을 담담하게 그려요. \"어떻게 사랑이 변하니\"라는 대사가 유명하죠!"),
    ("썸머 워즈", "🎮 {title}는 호소다 마모루 감독의 애니메이션이에요. 가상 세계의 위기를 대가족이 함께 막아내는 이야기가 여름 방학처럼 유쾌해요!"),
    ("콜 미 바이 유어 네임", "🍑 {title}은 루카 구아다니노 감독 작품으로, 티모시 샬라메의 섬세한 연기가 빛나요. 이탈리아의 여름빛과 첫사랑의 감정이 아름답게 담겨 있어요."),
    ("건축학개론", "🏠 {title}은 이용주 감독의 첫사랑 영화예요. 엄태웅, 한가인, 이제훈, 수지가 과거와 현재를 오가며 풋풋한 감정을 그려내요."),
    ("유브 갓 메일", "💻 {title}은 노라 에프론 감독의 로맨틱 코미디예요. 톰 행크스와 멕 라이언의 케미와 가을 뉴욕 풍경이 포근해요."),
    ("러브레터", "✉️ {title}는 이와이 슌지 감독의 작품으로, \"오겡끼데스까\" 장면으로 유명해요. 눈 덮인 풍경 속 편지로 이어지는 기억이 잔잔한 감동을 줘요."),
    ("나 홀로 집에", "🏡 {title}은 크리스 콜럼버스 감독의 가족 코미디예요. 맥컬리 컬킨이 도둑들을 골탕 먹이는 장면은 매년 연말마다 봐도 웃겨요!"),
    ("인사이드 아웃", "🧠 {title}은 픽사의 피트 닥터 감독 작품이에요. 기쁨과 슬픔 같은 감정들이 주인공이 되어, 슬픔도 꼭 필요한 감정이라는 걸 알려줘요."),
    ("소울", "🎷 {title}은 피트 닥터 감독의 픽사 애니메이션이에요. 재즈 음악과 함께 삶의 목적보다 살아있는 순간 자체가 소중하다고 말해줘요."),
];

/// Category-indexed reply pools plus per-title rationales
#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    candidates: Vec<ResponseCandidate>,
}

impl ResponseCatalog {
    pub fn new(candidates: Vec<ResponseCandidate>) -> Self {
        Self { candidates }
    }

    /// The MovieHub reply set
    pub fn builtin() -> Self {
        let pools: &[(IntentCategory, &[&'static str])] = &[
            (IntentCategory::Greeting, GREETING),
            (IntentCategory::GenericRecommendation, GENERIC_RECOMMENDATION),
            (IntentCategory::SeasonSpring, SEASON_SPRING),
            (IntentCategory::SeasonSummer, SEASON_SUMMER),
            (IntentCategory::SeasonAutumn, SEASON_AUTUMN),
            (IntentCategory::SeasonWinter, SEASON_WINTER),
            (IntentCategory::Comfort, COMFORT),
            (IntentCategory::GenreAction, GENRE_ACTION),
            (IntentCategory::GenreRomance, GENRE_ROMANCE),
            (IntentCategory::GenreComedy, GENRE_COMEDY),
            (IntentCategory::GenreHorror, GENRE_HORROR),
            (IntentCategory::SiteUsageHelp, SITE_USAGE_HELP),
            (IntentCategory::AccountHelp, ACCOUNT_HELP),
            (IntentCategory::ReviewHelp, REVIEW_HELP),
            (IntentCategory::FollowUpReason, FOLLOW_UP_GENERIC),
            (IntentCategory::Default, DEFAULT),
        ];

        let mut candidates: Vec<ResponseCandidate> = pools
            .iter()
            .flat_map(|(category, texts)| {
                texts
                    .iter()
                    .map(move |text| ResponseCandidate::text(*category, *text))
            })
            .collect();

        candidates.extend(
            RATIONALES
                .iter()
                .map(|(title, template)| ResponseCandidate::rationale(*title, *template)),
        );

        Self::new(candidates)
    }

    /// Entity-free candidates for `category`
    pub fn pool(&self, category: IntentCategory) -> Vec<&ResponseCandidate> {
        self.candidates
            .iter()
            .filter(|c| c.category == category && c.entity_hint.is_none())
            .collect()
    }

    /// Rationale written for `title`, if any
    pub fn rationale(&self, title: &str) -> Option<&ResponseCandidate> {
        self.candidates
            .iter()
            .find(|c| c.entity_hint == Some(title))
    }

    /// Titles that have a rationale
    pub fn known_titles(&self) -> Vec<&'static str> {
        self.candidates.iter().filter_map(|c| c.entity_hint).collect()
    }
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[IntentCategory] = &[
        IntentCategory::FollowUpReason,
        IntentCategory::Greeting,
        IntentCategory::SeasonSpring,
        IntentCategory::SeasonSummer,
        IntentCategory::SeasonAutumn,
        IntentCategory::SeasonWinter,
        IntentCategory::Comfort,
        IntentCategory::GenericRecommendation,
        IntentCategory::GenreAction,
        IntentCategory::GenreRomance,
        IntentCategory::GenreComedy,
        IntentCategory::GenreHorror,
        IntentCategory::SiteUsageHelp,
        IntentCategory::AccountHelp,
        IntentCategory::ReviewHelp,
        IntentCategory::Default,
    ];

    #[test]
    fn test_every_category_has_a_pool() {
        let catalog = ResponseCatalog::builtin();
        for category in ALL {
            let pool = catalog.pool(*category);
            assert!(
                (2..=5).contains(&pool.len()),
                "{:?} has {} candidates",
                category,
                pool.len()
            );
            assert!(pool.iter().all(|c| !c.render().trim().is_empty()));
        }
    }

    #[test]
    fn test_action_pool_names_known_titles() {
        let catalog = ResponseCatalog::builtin();
        for candidate in catalog.pool(IntentCategory::GenreAction) {
            let text = candidate.render();
            assert!(
                ["존 윅", "매드 맥스", "미션 임파서블"]
                    .iter()
                    .any(|t| text.contains(t)),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_rationales_render_their_title() {
        let catalog = ResponseCatalog::builtin();
        for title in catalog.known_titles() {
            let rendered = catalog.rationale(title).unwrap().render();
            assert!(rendered.contains(title));
            assert!(!rendered.contains(TITLE_PLACEHOLDER));
        }
    }

    #[test]
    fn test_recommended_titles_have_rationales() {
        let catalog = ResponseCatalog::builtin();
        let titles = catalog.known_titles();
        let recommending = [
            IntentCategory::GenericRecommendation,
            IntentCategory::GenreAction,
            IntentCategory::GenreRomance,
            IntentCategory::GenreComedy,
            IntentCategory::GenreHorror,
            IntentCategory::SeasonSpring,
            IntentCategory::SeasonSummer,
            IntentCategory::SeasonAutumn,
            IntentCategory::SeasonWinter,
            IntentCategory::Comfort,
        ];
        for category in recommending {
            for candidate in catalog.pool(category) {
                let text = candidate.render();
                assert!(
                    titles.iter().any(|t| text.contains(t)),
                    "no explainable title in {:?}: {}",
                    category,
                    text
                );
            }
        }
    }

    #[test]
    fn test_unknown_title_has_no_rationale() {
        assert!(ResponseCatalog::builtin().rationale("타이타닉").is_none());
    }
}
