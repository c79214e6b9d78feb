//! Static display data for the finance screens.
//!
//! The screens have no backend: every figure below is hard-coded and rendered as-is.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetGoal {
    pub period_label: &'static str,
    pub label: &'static str,
    pub amount: i64,
    pub comparison_label: &'static str,
    /// Change in the number of over-budget categories since last period.
    pub over_budget_delta: i64,
    /// Change in the amount spent since last period.
    pub spent_delta: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSummary {
    pub greeting: &'static str,
    pub honorific: &'static str,
    pub subcopy: &'static str,
    pub edit_action: &'static str,
    pub budget: BudgetGoal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryMetric {
    pub label: &'static str,
    pub current: i64,
    pub unit: Option<&'static str>,
    pub target: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightMetric {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightTone {
    Alert,
    Suggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightCard {
    pub tone: InsightTone,
    pub tag: &'static str,
    pub message: &'static str,
    pub highlight: Option<&'static str>,
    pub message_end: Option<&'static str>,
    pub helper: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightSection {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cards: &'static [InsightCard],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub month_label: &'static str,
    pub copy: &'static str,
    pub metrics: &'static [SummaryMetric],
    pub highlights: &'static [HighlightMetric],
}

/// A "top N%" rank now, and the rank reachable by keeping one budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendStat {
    pub current_percent: u8,
    pub current_desc: &'static str,
    pub achievable_percent: u8,
    pub achievable_desc: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSection {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub stats: &'static [TrendStat],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BenefitIcon {
    Bus,
    CashBack,
    Shopping,
    Cafe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Benefit {
    pub icon: BenefitIcon,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Credit,
    Check,
}

impl CardKind {
    pub fn label(self) -> &'static str {
        match self {
            CardKind::Credit => "신용 카드",
            CardKind::Check => "체크 카드",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CardKind::Credit => CardKind::Check,
            CardKind::Check => CardKind::Credit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub issuer: &'static str,
    pub summary: &'static str,
    pub ai_pick: bool,
    pub benefits: &'static [Benefit],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMarker {
    ActualSpending,
    TargetTotal,
    GoalAchieved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearOverview {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub legend: &'static [(LegendMarker, &'static str)],
}

const BUS_DISCOUNT: Benefit = Benefit {
    icon: BenefitIcon::Bus,
    label: "교통비 할인",
};
const CASH_BACK: Benefit = Benefit {
    icon: BenefitIcon::CashBack,
    label: "캐시백",
};
const SHOPPING_DISCOUNT: Benefit = Benefit {
    icon: BenefitIcon::Shopping,
    label: "쇼핑 할인",
};
const CAFE_DISCOUNT: Benefit = Benefit {
    icon: BenefitIcon::Cafe,
    label: "카페 할인",
};

pub const PROFILE: ProfileSummary = ProfileSummary {
    greeting: "안녕하세요.",
    honorific: "고객님",
    subcopy: "현명한 소비습관, Ai가 제시해 드립니다.",
    edit_action: "개인정보 수정",
    budget: BudgetGoal {
        period_label: "이번주",
        label: "소비목표금액",
        amount: 145_000,
        comparison_label: "지난 주 대비",
        over_budget_delta: 2,
        spent_delta: -60_000,
    },
};

pub const MY_PAGE_MONTH_SUMMARY: MonthSummary = MonthSummary {
    month_label: "11월",
    copy: "지출을 평가해 볼까요? 소비습관, Ai가 제시해 드립니다.",
    metrics: &[
        SummaryMetric {
            label: "지출 건수",
            current: 16,
            unit: Some("건"),
            target: Some(28),
        },
        SummaryMetric {
            label: "지출 금액",
            current: 3_000_000,
            unit: None,
            target: Some(2_000_000),
        },
    ],
    highlights: &[
        HighlightMetric {
            label: "가장 컸던 지출 항목",
            value: "주류",
        },
        HighlightMetric {
            label: "급상승 항목",
            value: "카페",
        },
    ],
};

pub const MY_PAGE_INSIGHTS: InsightSection = InsightSection {
    title: "소비 평가",
    subtitle: "이번달에는 바쁘셨을 꺼라 믿어요!",
    cards: &[
        InsightCard {
            tone: InsightTone::Alert,
            tag: "나쁜 습관",
            message: "1주차에 소비의 ",
            highlight: Some("60%"),
            message_end: Some("를 하는 경향이 있어요."),
            helper: None,
        },
        InsightCard {
            tone: InsightTone::Suggestion,
            tag: "이렇게 개선해 보는 것은 어떠세요",
            message: "1주차에 카페 항목 소비를 6만원 정도 더 많이 설정해 보세요.",
            highlight: None,
            message_end: None,
            helper: Some("성공 확률이 30% 정도 올라가요!"),
        },
    ],
};

pub const TREND_TITLE: &str = "트렌드 & 패턴";

pub const TREND_SECTIONS: &[TrendSection] = &[
    TrendSection {
        title: "라이프 스타일",
        subtitle: "열렬한 모임 예찬자",
        stats: &[TrendStat {
            current_percent: 24,
            current_desc: "해당 라이프 스타일 유형 중",
            achievable_percent: 16,
            achievable_desc: "주류 비용 잘 지켜도 이렇게",
        }],
    },
    TrendSection {
        title: "나이 대비",
        subtitle: "28살 여성 중",
        stats: &[
            TrendStat {
                current_percent: 12,
                current_desc: "20대 후반 여성 중",
                achievable_percent: 9,
                achievable_desc: "주류 비용 잘 지켜도 이렇게",
            },
            TrendStat {
                current_percent: 50,
                current_desc: "20대 후반 중",
                achievable_percent: 48,
                achievable_desc: "주류 비용 잘 지켜도 이렇게",
            },
            TrendStat {
                current_percent: 64,
                current_desc: "20대 여성 중",
                achievable_percent: 26,
                achievable_desc: "주류 비용 잘 지켜도 이렇게",
            },
        ],
    },
];

pub const CARD_PAGE_TITLE: &str = "이 카드가 잘 어울리실 꺼 같아요.";

pub const FEATURED_CREDIT_CARDS: &[CardInfo] = &[
    CardInfo {
        id: "hyundai-z-work",
        name: "현대카드 Z work Edition 2",
        issuer: "현대카드",
        summary: "대중교통, 택시, 편의점 등 직장인들이 필수 이용하는 카테고리에 할인 혜택이 있습니다.",
        ai_pick: true,
        benefits: &[BUS_DISCOUNT, CASH_BACK],
    },
    CardInfo {
        id: "hyundai-m",
        name: "현대카드 M",
        issuer: "현대카드",
        summary: "최대 50만 포인트를 먼저 받아 사용하고 카드를 이용하며 M포인트를 적립할 수 있는 카드입니다.",
        ai_pick: true,
        benefits: &[BUS_DISCOUNT, SHOPPING_DISCOUNT],
    },
];

pub const CREDIT_CARDS: &[CardInfo] = &[
    CardInfo {
        id: "every-mile-skypass",
        name: "카드의정석 EVERY MILE SKYPASS",
        issuer: "우리카드",
        summary: "사용금액별 0.6~0.3% 적립",
        ai_pick: false,
        benefits: &[BUS_DISCOUNT],
    },
    CardInfo {
        id: "naver-pay-money",
        name: "네이버페이 머니카드",
        issuer: "네이버페이",
        summary: "사용금액별 해외 온/오프라인 3% 적립",
        ai_pick: false,
        benefits: &[SHOPPING_DISCOUNT],
    },
    CardInfo {
        id: "shinhan-mr-life",
        name: "신한카드 Mr.Life",
        issuer: "신한카드",
        summary: "사용금액별 최대 29망원 캐시백 적립",
        ai_pick: false,
        benefits: &[
            Benefit {
                icon: BenefitIcon::Cafe,
                label: "쇼핑 할인",
            },
            CASH_BACK,
        ],
    },
    CardInfo {
        id: "samsung-taptap-o",
        name: "삼성카드 taptap O",
        issuer: "삼성카드",
        summary: "사용금액별 최대92만원 혜택 적립",
        ai_pick: false,
        benefits: &[CAFE_DISCOUNT, BUS_DISCOUNT],
    },
];

pub const CHECK_CARDS: &[CardInfo] = &[
    CardInfo {
        id: "one-check",
        name: "ONE 체크카드",
        issuer: "케이뱅크",
        summary: "사용금액별 최대 1.1% 적립.",
        ai_pick: false,
        benefits: &[BUS_DISCOUNT],
    },
    CardInfo {
        id: "shinhan-hey-young",
        name: "신한카드 Hey Young",
        issuer: "신한카드",
        summary: "사용금액별 최대29망원 캐시백 적립",
        ai_pick: false,
        benefits: &[
            SHOPPING_DISCOUNT,
            Benefit {
                icon: BenefitIcon::Bus,
                label: "공과금 할인",
            },
        ],
    },
    CardInfo {
        id: "tossbank-check",
        name: "토스뱅크 체크카드",
        issuer: "토스뱅크",
        summary: "사용액별 월 최대 35,000원 적립",
        ai_pick: false,
        benefits: &[CASH_BACK],
    },
    CardInfo {
        id: "mobilience-card",
        name: "모빌리언스카드",
        issuer: "KG모빌리언스",
        summary: "사용액별 KFC 10% 즉시할인 적립",
        ai_pick: false,
        benefits: &[CAFE_DISCOUNT, BUS_DISCOUNT],
    },
];

/// Cards listed under the credit/check tab toggle.
pub fn cards_for(kind: CardKind) -> &'static [CardInfo] {
    match kind {
        CardKind::Credit => CREDIT_CARDS,
        CardKind::Check => CHECK_CARDS,
    }
}

pub const YEAR_OVERVIEW: YearOverview = YearOverview {
    title: "올해의 현황",
    subtitle: "그래도 목표와 소비액의 격차가 많이 줄었어요.",
    description: "성공 확률이 8% 정도 올라가요!",
    legend: &[
        (LegendMarker::ActualSpending, "실제 소비액"),
        (LegendMarker::TargetTotal, "목표 소비액의 총합"),
        (LegendMarker::GoalAchieved, "목표 달성률 80% 이상 성공 유무"),
    ],
};

/// Caption of the yearly spending graph on the diary screen.
pub const YEAR_GRAPH_CAPTION: &str = "올해 소비 추이 그래프";

pub const DIARY_MONTH_SUMMARY: MonthSummary = MonthSummary {
    month_label: "11월",
    copy: "지출을 평가해볼까요? 소비습관, AI가 제시해 드립니다.",
    metrics: &[
        SummaryMetric {
            label: "지출 건수",
            current: 16,
            unit: Some("건"),
            target: Some(28),
        },
        SummaryMetric {
            label: "지출 금액",
            current: 3_000_000,
            unit: Some("원"),
            target: Some(2_000_000),
        },
    ],
    highlights: MY_PAGE_MONTH_SUMMARY.highlights,
};

pub const AI_DIARY_INSIGHTS: InsightSection = InsightSection {
    title: "AI 일기",
    subtitle: "1주차인 것에 비해서는 많이 절약하셨어요",
    cards: &[
        InsightCard {
            tone: InsightTone::Alert,
            tag: "나쁜습관",
            message: "1주차에만 소비를 줄여도 목표 달성 난이도가 줄어들어요.",
            highlight: None,
            message_end: None,
            helper: None,
        },
        InsightCard {
            tone: InsightTone::Suggestion,
            tag: "이렇게 개선해 보는 것은 어떠세요",
            message: "1주차에만 소비를 줄여도 목표 달성 난이도가 줄어들어요.",
            highlight: None,
            message_end: None,
            helper: Some("1주차에 12만원만 덜 써도 이번 달 목표 성공 확률이 대폭 올라가요."),
        },
    ],
};
