use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use olla_protocol::assets::AssetCatalog;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::WidgetRef;

use crate::ui_colors::brand_color;

/// Top navigation entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuKey {
    SpendingAnalysis,
    FinanceManagement,
    ConsumptionDiary,
    CardRecommendation,
    #[default]
    MyPage,
}

impl MenuKey {
    pub const ALL: [MenuKey; 5] = [
        MenuKey::SpendingAnalysis,
        MenuKey::FinanceManagement,
        MenuKey::ConsumptionDiary,
        MenuKey::CardRecommendation,
        MenuKey::MyPage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuKey::SpendingAnalysis => "소비분석",
            MenuKey::FinanceManagement => "재무관리",
            MenuKey::ConsumptionDiary => "소비일기",
            MenuKey::CardRecommendation => "카드 추천",
            MenuKey::MyPage => "마이페이지",
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|menu| *menu == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether the menu has a screen behind it. The other entries show an empty body.
    pub fn has_screen(self) -> bool {
        matches!(
            self,
            MenuKey::ConsumptionDiary | MenuKey::CardRecommendation | MenuKey::MyPage
        )
    }

    /// Navigation requested by `key_event` while `self` is active: `F1`..`F5` jump, and
    /// `Ctrl+←`/`Ctrl+→` cycle.
    pub fn navigate(self, key_event: KeyEvent) -> Option<MenuKey> {
        if key_event.kind == KeyEventKind::Release {
            return None;
        }
        match key_event.code {
            KeyCode::F(n) if (1..=5).contains(&n) => Some(Self::ALL[usize::from(n - 1)]),
            KeyCode::Left if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(self.prev())
            }
            KeyCode::Right if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(self.next())
            }
            _ => None,
        }
    }
}

pub struct HeaderView<'a> {
    pub active: MenuKey,
    pub assets: &'a AssetCatalog,
}

impl WidgetRef for HeaderView<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let mut spans: Vec<Span<'static>> = vec![
            " ".into(),
            self.assets.logo.fg(brand_color()).bold(),
            "   ".into(),
        ];
        for (idx, menu) in MenuKey::ALL.iter().enumerate() {
            let label = format!(" {} ", menu.label());
            let style = if *menu == self.active {
                Style::default().fg(brand_color()).bold().underlined()
            } else if menu.has_screen() {
                Style::default()
            } else {
                Style::default().dim()
            };
            spans.push(format!("F{}", idx + 1).dim());
            spans.push(Span::styled(label, style));
            spans.push(" ".into());
        }
        Line::from(spans).render_ref(area, buf);
    }
}
