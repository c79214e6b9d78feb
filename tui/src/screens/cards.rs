//! 카드 추천: featured "AI Pick" cards, then a credit/check toggle over two card lists.

use std::time::Instant;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use olla_protocol::assets::AssetCatalog;
use olla_protocol::finance::CARD_PAGE_TITLE;
use olla_protocol::finance::CardInfo;
use olla_protocol::finance::CardKind;
use olla_protocol::finance::FEATURED_CREDIT_CARDS;
use olla_protocol::finance::cards_for;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;

use super::Screen;
use super::widgets::PageScroll;
use super::widgets::section_title;
use crate::key_hint;
use crate::render::Insets;
use crate::render::RectExt as _;
use crate::text_formatting::wrap_text;
use crate::ui_colors::brand_color;

pub(crate) struct CardRecommendationScreen {
    active_tab: CardKind,
    scroll: PageScroll,
}

impl CardRecommendationScreen {
    pub(crate) fn new() -> Self {
        Self {
            active_tab: CardKind::Credit,
            scroll: PageScroll::default(),
        }
    }

    fn body_lines(&self, width: u16, assets: &AssetCatalog) -> Vec<Line<'static>> {
        let mut lines = vec![section_title(CARD_PAGE_TITLE, ""), Line::default()];
        for card in FEATURED_CREDIT_CARDS {
            lines.extend(card_lines(card, width, assets));
        }
        lines.push(tab_line(self.active_tab));
        lines.push(Line::default());
        for card in cards_for(self.active_tab) {
            lines.extend(card_lines(card, width, assets));
        }
        lines
    }
}

fn tab_line(active: CardKind) -> Line<'static> {
    let tab = |kind: CardKind| -> Span<'static> {
        let label = format!(" {} ", kind.label());
        if kind == active {
            Span::styled(label, Style::default().fg(brand_color()).bold().reversed())
        } else {
            label.dim()
        }
    };
    Line::from(vec![tab(CardKind::Credit), " ".into(), tab(CardKind::Check)])
}

fn card_lines(card: &CardInfo, width: u16, assets: &AssetCatalog) -> Vec<Line<'static>> {
    let mut title = vec!["  ".into()];
    if card.ai_pick {
        title.push(assets.ai_pick_badge.fg(brand_color()).bold());
        title.push(" ".into());
    }
    title.push(card.name.bold());
    title.push(format!("  {}", card.issuer).dim());

    let mut lines = vec![Line::from(title)];
    lines.extend(
        wrap_text(card.summary, usize::from(width).saturating_sub(4))
            .into_iter()
            .map(|line| Line::from(format!("    {line}"))),
    );
    let mut benefits: Vec<Span<'static>> = vec!["    ".into()];
    for (idx, benefit) in card.benefits.iter().enumerate() {
        if idx > 0 {
            benefits.push("  ".into());
        }
        benefits.push(assets.benefit_glyph(benefit.icon).fg(brand_color()));
        benefits.push(format!(" {}", benefit.label).into());
    }
    lines.push(Line::from(benefits));
    lines.push(Line::default());
    lines
}

impl Screen for CardRecommendationScreen {
    fn handle_key(&mut self, key_event: KeyEvent, _now: Instant) {
        if key_event.kind == KeyEventKind::Release || !key_event.modifiers.is_empty() {
            return;
        }
        match key_event.code {
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                self.active_tab = self.active_tab.toggled();
            }
            _ => {
                self.scroll.handle_key(key_event);
            }
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, assets: &AssetCatalog) {
        let area = area.inset(Insets::tlbr(1, 1, 0, 1));
        self.scroll.render(self.body_lines(area.width, assets), area, buf);
    }

    fn key_hints(&self) -> Line<'static> {
        key_hint::hint_line(&[
            (key_hint::plain(KeyCode::Tab), "신용/체크 전환"),
            (key_hint::plain(KeyCode::PageDown), "스크롤"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_snapshot;
    use crossterm::event::KeyModifiers;
    use insta::assert_snapshot;
    use olla_protocol::finance::CHECK_CARDS;
    use pretty_assertions::assert_eq;

    fn draw(screen: &CardRecommendationScreen, width: u16, height: u16) -> Buffer {
        let assets = AssetCatalog::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf, &assets);
        buf
    }

    /// Card title rows: two-space indent, unlike summaries, benefits and the tab row.
    fn title_rows(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(ToString::to_string)
            .filter(|text| text.starts_with("  ") && !text.starts_with("   "))
            .collect()
    }

    #[test]
    fn tab_toggles_between_credit_and_check() {
        let mut screen = CardRecommendationScreen::new();
        let now = Instant::now();
        assert_eq!(screen.active_tab, CardKind::Credit);
        screen.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE), now);
        assert_eq!(screen.active_tab, CardKind::Check);
        screen.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE), now);
        assert_eq!(screen.active_tab, CardKind::Credit);
        // Ctrl+arrows belong to the header.
        screen.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL), now);
        assert_eq!(screen.active_tab, CardKind::Credit);
    }

    #[test]
    fn credit_tab_lists_featured_then_credit_cards() {
        let screen = CardRecommendationScreen::new();
        assert_snapshot!("cards_credit_tab", buffer_snapshot(&draw(&screen, 120, 30)));
    }

    #[test]
    fn check_tab_keeps_featured_cards_first() {
        let mut screen = CardRecommendationScreen::new();
        screen.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE), Instant::now());
        let assets = AssetCatalog::default();
        let expected: Vec<String> = FEATURED_CREDIT_CARDS
            .iter()
            .map(|card| format!("  ★ AI Pick {}  {}", card.name, card.issuer))
            .chain(
                CHECK_CARDS
                    .iter()
                    .map(|card| format!("  {}  {}", card.name, card.issuer)),
            )
            .collect();
        assert_eq!(title_rows(&screen.body_lines(118, &assets)), expected);
    }
}
