//! 마이페이지: search bar, profile, monthly status and trend cards.
//!
//! The search bar is the host of the chat-bot modal. It owns the [`ChatSession`] for as long
//! as this screen is mounted and decides when the modal opens and closes.

use std::time::Duration;
use std::time::Instant;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use olla_protocol::assets::AssetCatalog;
use olla_protocol::chat::ASK_BOT_PLACEHOLDER;
use olla_protocol::finance::MY_PAGE_INSIGHTS;
use olla_protocol::finance::MY_PAGE_MONTH_SUMMARY;
use olla_protocol::finance::PROFILE;
use olla_protocol::finance::ProfileSummary;
use olla_protocol::finance::TREND_SECTIONS;
use olla_protocol::finance::TREND_TITLE;
use olla_protocol::num_format::format_won_compact;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::WidgetRef;

use super::Screen;
use super::ScreenStats;
use super::widgets::PageScroll;
use super::widgets::insight_lines;
use super::widgets::month_summary_lines;
use super::widgets::section_title;
use crate::chatbot::ChatModalView;
use crate::chatbot::ChatSession;
use crate::chatbot::ModalOutcome;
use crate::key_hint;
use crate::render::Insets;
use crate::render::RectExt as _;
use crate::render::renderable::Renderable;
use crate::text_input::TextInput;
use crate::tui::FrameRequester;
use crate::ui_colors::alert_color;
use crate::ui_colors::brand_color;
use crate::ui_colors::suggestion_color;

const SEARCH_BAR_HEIGHT: u16 = 3;

/// Search input plus the chat session it hosts.
pub(crate) struct SearchBar {
    query: TextInput,
    chat: ChatSession,
}

impl SearchBar {
    fn new(frame_requester: FrameRequester, reply_delay: Duration, now: Instant) -> Self {
        Self {
            query: TextInput::new(),
            chat: ChatSession::new(frame_requester, reply_delay, now),
        }
    }

    fn handle_key(&mut self, key_event: KeyEvent, now: Instant) -> bool {
        if self.chat.is_open() {
            if self.chat.handle_key(key_event, now) == ModalOutcome::CloseRequested {
                self.chat.close();
            }
            return true;
        }
        if key_event.kind != KeyEventKind::Release && key_event.code == KeyCode::Enter {
            // The query is not forwarded to the bot.
            tracing::debug!(query_len = self.query.text().len(), "opening chat from search");
            self.chat.open();
            return true;
        }
        self.query.handle_key(key_event)
    }

    fn block() -> Block<'static> {
        Block::bordered().border_style(Style::default().fg(brand_color()))
    }

    fn input_area(area: Rect) -> Rect {
        Self::block().inner(area).inset(Insets::tlbr(0, 3, 0, 1))
    }

    fn render(&self, area: Rect, buf: &mut Buffer, assets: &AssetCatalog) {
        Self::block().render_ref(area, buf);
        let inner = Self::block().inner(area);
        Line::from(vec![" ".into(), assets.search.fg(brand_color())]).render_ref(inner, buf);
        self.query
            .view(ASK_BOT_PLACEHOLDER)
            .render(Self::input_area(area), buf);
    }
}

pub(crate) struct MyPageScreen {
    search: SearchBar,
    user_name: String,
    scroll: PageScroll,
}

impl MyPageScreen {
    pub(crate) fn new(
        frame_requester: FrameRequester,
        reply_delay: Duration,
        user_name: String,
        now: Instant,
    ) -> Self {
        Self {
            search: SearchBar::new(frame_requester, reply_delay, now),
            user_name,
            scroll: PageScroll::default(),
        }
    }

    fn layout(area: Rect) -> [Rect; 2] {
        Layout::vertical([Constraint::Length(SEARCH_BAR_HEIGHT), Constraint::Fill(1)]).areas(area)
    }

    fn body_lines(&self, width: u16, assets: &AssetCatalog) -> Vec<Line<'static>> {
        let mut lines = profile_lines(&PROFILE, &self.user_name, assets);
        lines.push(Line::default());
        lines.extend(month_summary_lines("이번 달 현황", &MY_PAGE_MONTH_SUMMARY));
        lines.push(Line::default());
        lines.extend(insight_lines(&MY_PAGE_INSIGHTS, width));
        lines.push(Line::default());
        lines.extend(trend_lines(assets));
        lines
    }
}

fn signed_delta(delta: i64, value: String) -> Span<'static> {
    let sign = if delta > 0 { "+" } else if delta < 0 { "-" } else { "" };
    let text = format!("{sign}{value}");
    if delta > 0 {
        text.fg(alert_color()).bold()
    } else {
        text.fg(suggestion_color()).bold()
    }
}

fn profile_lines(
    profile: &ProfileSummary,
    user_name: &str,
    assets: &AssetCatalog,
) -> Vec<Line<'static>> {
    let budget = &profile.budget;
    vec![
        Line::from(vec![
            assets.profile_avatar.fg(brand_color()),
            format!(" {} ", profile.greeting).into(),
            user_name.to_string().bold(),
            format!(" {}", profile.honorific).into(),
        ]),
        Line::from(vec![
            "  ".into(),
            profile.subcopy.dim(),
            "   ".into(),
            format!("[{}]", profile.edit_action).underlined(),
        ]),
        Line::from(vec![
            "  ".into(),
            format!("{} ▾  ", budget.period_label).fg(brand_color()),
            format!("{}  ", budget.label).dim(),
            format_won_compact(budget.amount).bold(),
        ]),
        Line::from(vec![
            "  ".into(),
            budget.comparison_label.dim(),
            " · 예산 초과 항목 ".dim(),
            signed_delta(
                budget.over_budget_delta,
                format!("{}개", budget.over_budget_delta.unsigned_abs()),
            ),
            " · 소비한 금액 ".dim(),
            signed_delta(
                budget.spent_delta,
                format_won_compact(budget.spent_delta.abs()),
            ),
        ]),
    ]
}

fn trend_lines(assets: &AssetCatalog) -> Vec<Line<'static>> {
    let mut lines = vec![section_title(TREND_TITLE, "")];
    for section in TREND_SECTIONS {
        lines.push(Line::from(vec![
            "  ".into(),
            section.title.bold(),
            " · ".dim(),
            section.subtitle.fg(brand_color()),
        ]));
        for stat in section.stats {
            lines.push(Line::from(vec![
                "    ".into(),
                format!("상위 {}%", stat.current_percent).bold(),
                format!(" {}", stat.current_desc).dim(),
                format!("  {}  ", assets.trend_arrow).fg(brand_color()),
                format!("상위 {}%", stat.achievable_percent)
                    .fg(suggestion_color())
                    .bold(),
                format!(" {}", stat.achievable_desc).dim(),
            ]));
        }
    }
    lines
}

impl Screen for MyPageScreen {
    fn handle_key(&mut self, key_event: KeyEvent, now: Instant) {
        if !self.search.chat.is_open() && self.scroll.handle_key(key_event) {
            return;
        }
        self.search.handle_key(key_event, now);
    }

    fn handle_paste(&mut self, pasted: String) {
        if self.search.chat.is_open() {
            self.search.chat.handle_paste(&pasted);
        } else {
            self.search.query.insert_str(&pasted.replace(['\r', '\n'], " "));
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, assets: &AssetCatalog) {
        let [search_area, body_area] = Self::layout(area);
        self.search.render(search_area, buf, assets);
        let body_area = body_area.inset(Insets::tlbr(1, 1, 0, 1));
        self.scroll
            .render(self.body_lines(body_area.width, assets), body_area, buf);
        ChatModalView::new(&self.search.chat, assets).render_ref(area, buf);
    }

    fn cursor_pos(&self, area: Rect, assets: &AssetCatalog) -> Option<(u16, u16)> {
        if self.search.chat.is_open() {
            return ChatModalView::new(&self.search.chat, assets).cursor_pos(area);
        }
        let [search_area, _] = Self::layout(area);
        self.search
            .query
            .view(ASK_BOT_PLACEHOLDER)
            .cursor_pos(SearchBar::input_area(search_area))
    }

    fn on_tick(&mut self, now: Instant) {
        self.search.chat.on_tick(now);
    }

    fn key_hints(&self) -> Line<'static> {
        if self.search.chat.is_open() {
            return key_hint::hint_line(&[
                (key_hint::plain(KeyCode::Up), "위로"),
                (key_hint::plain(KeyCode::Down), "아래로"),
                (key_hint::plain(KeyCode::Esc), "챗봇 닫기"),
            ]);
        }
        key_hint::hint_line(&[
            (key_hint::plain(KeyCode::Enter), "챗봇 열기"),
            (key_hint::plain(KeyCode::PageDown), "스크롤"),
        ])
    }

    fn stats(&self) -> ScreenStats {
        ScreenStats {
            messages_sent: self.search.chat.messages_sent(),
            diary_entries_written: 0,
        }
    }
}
