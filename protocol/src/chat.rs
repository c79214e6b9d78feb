use std::fmt;
use std::time::Duration;

/// Identifier of a chat message, unique within one chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id directly after this one. Scripted replies use `trigger.next()`.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Id of the greeting that exists before any interaction.
pub const SEED_MESSAGE_ID: MessageId = MessageId::new(1);

/// Which lane a message is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Bot,
    User,
}

impl Speaker {
    pub fn is_bot(self) -> bool {
        matches!(self, Speaker::Bot)
    }
}

/// Display name rendered above every bot bubble.
pub const BOT_DISPLAY_NAME: &str = "OLLA";

/// Title of the chat-bot modal.
pub const CHAT_MODAL_TITLE: &str = "Chat Bot";

/// Placeholder shared by the chat composer and the my-page search bar.
pub const ASK_BOT_PLACEHOLDER: &str = "모르시는 항목은 챗봇에게 여쭤보세요.";

/// Greeting carried by the seed message.
pub const SEED_GREETING: &str = "안녕하세요. 어떤 것이 궁금하신가요?";

/// Delay between a user message and its scripted reply unless configured otherwise.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(600);

/// Scripted reply appended after every user message, whatever the user sent.
pub const SCRIPTED_REPLY: &str = "영수증 내용을 보면 총 217,000원을 지출했고, 구성은 아래와 같습니다.

생삼겹살 25인분 — 175,000원
맥주 4개 — 12,000원
음료수 1개 — 4,000원
밥+된장 13개 — 26,000원

✔︎ 어디서 소비를 줄일 수 있을까?
1) 가장 조정 여지가 큰 항목: 생삼겹살(175,000원)
전체 지출의 80% 이상을 차지.
인분 수가 많기 때문에,
주문을 한 번에 하지 말고 추가 주문 방식으로 조절하기
인분 수를 10~20%만 줄여도 지출 절감 효과가 큼.

2) 음료(맥주·음료) 줄이기
맥주·음료는 합쳐서 16,000원이지만
외식에서 가장 줄이기 쉬운 ‘부가 비용’.
술이나 음료를 줄이거나 물로 대체하면
즉각적 절감 효과가 있음.

3) 밥+된장 13개(26,000원)
1인당 거의 1세트씩 주문한 것으로 보임.
실제로는 고기 남는 양에 따라
밥+된장을 전원 주문하지 않고
2~3개 공유도 가능.";
