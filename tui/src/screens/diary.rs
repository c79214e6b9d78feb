//! 소비일기: yearly overview, monthly summary, AI diary insights and a diary editor.
//!
//! Diary entries live only as long as the screen; nothing is persisted.

use std::time::Instant;

use chrono::DateTime;
use chrono::Local;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use olla_protocol::assets::AssetCatalog;
use olla_protocol::finance::AI_DIARY_INSIGHTS;
use olla_protocol::finance::DIARY_MONTH_SUMMARY;
use olla_protocol::finance::LegendMarker;
use olla_protocol::finance::YEAR_GRAPH_CAPTION;
use olla_protocol::finance::YEAR_OVERVIEW;
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
use crate::key_hint;
use crate::key_hint::KeyBinding;
use crate::render::Insets;
use crate::render::RectExt as _;
use crate::render::renderable::ColumnRenderable;
use crate::render::renderable::Renderable;
use crate::render::renderable::RenderableExt as _;
use crate::text_formatting::wrap_text;
use crate::text_input::TextInput;
use crate::text_input::TextInputView;
use crate::ui_colors::brand_color;

const UNTITLED: &str = "제목 없음";
const FIELD_PLACEHOLDER: &str = "내용을 입력해 주세요";
const EDITOR_DESCRIPTION: &str = "소비 평가를 보고 일기를 작성하면 다음에 알려드릴게요!";
const EDITOR_TITLE: &str = "직접 소비에 대한 감상을 작성해 주세요";
const CONTENT_ROWS: u16 = 3;
const SUBMIT_KEY: KeyBinding = key_hint::ctrl(KeyCode::Char('s'));

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiaryEntry {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Local>,
}

/// Newest-first list of diary entries.
#[derive(Debug, Default)]
pub(crate) struct DiaryJournal {
    entries: Vec<DiaryEntry>,
    next_id: u64,
}

impl DiaryJournal {
    /// Prepend an entry from the raw field values. Both fields blank after trimming means
    /// there is nothing to write; a blank title alone becomes "제목 없음".
    pub(crate) fn submit(
        &mut self,
        title: &str,
        content: &str,
        created_at: DateTime<Local>,
    ) -> Option<&DiaryEntry> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() && content.is_empty() {
            return None;
        }
        self.next_id += 1;
        let entry = DiaryEntry {
            id: self.next_id,
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title.to_string()
            },
            content: content.to_string(),
            created_at,
        };
        tracing::debug!(id = entry.id, "diary entry written");
        self.entries.insert(0, entry);
        self.entries.first()
    }

    pub(crate) fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }
}

/// Display-only period selector above the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum DiaryPeriod {
    #[default]
    ThisWeek,
    LastMonth,
    ThisYear,
}

impl DiaryPeriod {
    const ALL: [DiaryPeriod; 3] = [
        DiaryPeriod::ThisWeek,
        DiaryPeriod::LastMonth,
        DiaryPeriod::ThisYear,
    ];

    fn label(self) -> &'static str {
        match self {
            DiaryPeriod::ThisWeek => "이번주",
            DiaryPeriod::LastMonth => "이전달",
            DiaryPeriod::ThisYear => "올해",
        }
    }

    fn shifted(self, forward: bool) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        let len = Self::ALL.len();
        let next = if forward { idx + 1 } else { idx + len - 1 };
        Self::ALL[next % len]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum EditorFocus {
    Period,
    #[default]
    Title,
    Content,
}

impl EditorFocus {
    fn next(self) -> Self {
        match self {
            EditorFocus::Period => EditorFocus::Title,
            EditorFocus::Title => EditorFocus::Content,
            EditorFocus::Content => EditorFocus::Period,
        }
    }

    fn prev(self) -> Self {
        match self {
            EditorFocus::Period => EditorFocus::Content,
            EditorFocus::Title => EditorFocus::Period,
            EditorFocus::Content => EditorFocus::Title,
        }
    }
}

pub(crate) struct ConsumptionDiaryScreen {
    period: DiaryPeriod,
    focus: EditorFocus,
    title: TextInput,
    content: TextInput,
    journal: DiaryJournal,
    scroll: PageScroll,
}

impl ConsumptionDiaryScreen {
    pub(crate) fn new() -> Self {
        Self {
            period: DiaryPeriod::default(),
            focus: EditorFocus::default(),
            title: TextInput::new(),
            content: TextInput::new(),
            journal: DiaryJournal::default(),
            scroll: PageScroll::default(),
        }
    }

    /// Write the entry and clear the editor. Blank fields leave everything as it was.
    fn submit(&mut self) {
        if self
            .journal
            .submit(self.title.text(), self.content.text(), Local::now())
            .is_some()
        {
            self.title.clear();
            self.content.clear();
            self.focus = EditorFocus::Title;
        }
    }

    fn editor_block() -> Block<'static> {
        Block::bordered()
            .border_style(Style::default().fg(brand_color()))
            .title(Line::from(format!(" {EDITOR_TITLE} ").bold()))
            .title_bottom(
                key_hint::hint_line(&[(SUBMIT_KEY, "등록하기")]).right_aligned(),
            )
    }

    fn editor_column(&self) -> ColumnRenderable<'_> {
        let mut column = ColumnRenderable::new();
        column.push(Line::from(EDITOR_DESCRIPTION.dim()));
        column.push(self.period_tabs());
        let title_style = Style::default().bold();
        column.push(FocusedField {
            focused: self.focus == EditorFocus::Title,
            view: self.title.view(FIELD_PLACEHOLDER).style(title_style),
        });
        column.push(FocusedField {
            focused: self.focus == EditorFocus::Content,
            view: self.content.multiline_view(FIELD_PLACEHOLDER, CONTENT_ROWS),
        });
        column
    }

    fn editor_height(&self, width: u16) -> u16 {
        self.editor_column()
            .inset(Insets::vh(0, 1))
            .desired_height(width.saturating_sub(2))
            .saturating_add(2)
    }

    fn period_tabs(&self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for period in DiaryPeriod::ALL {
            let label = format!(" {} ", period.label());
            let span = if period == self.period {
                let mut style = Style::default().fg(brand_color()).bold().reversed();
                if self.focus == EditorFocus::Period {
                    style = style.underlined();
                }
                Span::styled(label, style)
            } else {
                label.dim()
            };
            spans.push(span);
            spans.push(" ".into());
        }
        Line::from(spans)
    }

    fn layout(&self, area: Rect) -> [Rect; 2] {
        let editor_height = self.editor_height(area.width);
        Layout::vertical([Constraint::Fill(1), Constraint::Length(editor_height)]).areas(area)
    }

    fn body_lines(&self, width: u16, assets: &AssetCatalog) -> Vec<Line<'static>> {
        let mut lines = vec![
            section_title(YEAR_OVERVIEW.title, YEAR_OVERVIEW.subtitle),
            Line::from(format!("  {}", YEAR_OVERVIEW.description)),
            Line::from(format!("  [{YEAR_GRAPH_CAPTION}]").dim()),
        ];
        let mut legend: Vec<Span<'static>> = vec!["  ".into()];
        for (marker, label) in YEAR_OVERVIEW.legend {
            let glyph = match marker {
                LegendMarker::ActualSpending => assets.legend_actual_spending,
                LegendMarker::TargetTotal => assets.legend_target_total,
                LegendMarker::GoalAchieved => assets.legend_goal_achieved,
            };
            legend.push(glyph.fg(brand_color()));
            legend.push(format!(" {label}   ").dim());
        }
        lines.push(Line::from(legend));
        lines.push(Line::default());
        lines.extend(month_summary_lines("이번 달 현황", &DIARY_MONTH_SUMMARY));
        lines.push(Line::default());
        lines.extend(insight_lines(&AI_DIARY_INSIGHTS, width));

        if !self.journal.entries().is_empty() {
            lines.push(Line::default());
            lines.push(section_title("작성한 일기", ""));
            let body_width = usize::from(width).saturating_sub(4);
            for entry in self.journal.entries() {
                lines.push(Line::from(vec![
                    "  ".into(),
                    entry.title.clone().bold(),
                    format!("  {}", entry.created_at.format("%Y-%m-%d %H:%M")).dim(),
                ]));
                if !entry.content.is_empty() {
                    lines.extend(
                        wrap_text(&entry.content, body_width)
                            .into_iter()
                            .map(|line| Line::from(format!("    {line}"))),
                    );
                }
            }
        }
        lines
    }

    fn handle_editor_key(&mut self, key_event: KeyEvent) {
        match (self.focus, key_event.code) {
            (EditorFocus::Period, KeyCode::Left) => self.period = self.period.shifted(false),
            (EditorFocus::Period, KeyCode::Right) => self.period = self.period.shifted(true),
            (EditorFocus::Period, _) => {}
            (EditorFocus::Title, KeyCode::Enter) => self.submit(),
            (EditorFocus::Title, _) => {
                self.title.handle_key(key_event);
            }
            (EditorFocus::Content, KeyCode::Enter) => self.content.insert_newline(),
            (EditorFocus::Content, _) => {
                self.content.handle_key(key_event);
            }
        }
    }
}

/// An editor field with a focus marker in the left gutter.
struct FocusedField<'a> {
    focused: bool,
    view: TextInputView<'a>,
}

impl FocusedField<'_> {
    fn field_area(area: Rect) -> Rect {
        area.inset(Insets::tlbr(0, 2, 0, 0))
    }
}

impl Renderable for FocusedField<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let marker = if self.focused {
            "›".fg(brand_color()).bold()
        } else {
            " ".into()
        };
        Line::from(marker).render_ref(area, buf);
        self.view.render(Self::field_area(area), buf);
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.view.desired_height(width)
    }

    fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.focused {
            return None;
        }
        self.view.cursor_pos(Self::field_area(area))
    }
}

impl Screen for ConsumptionDiaryScreen {
    fn handle_key(&mut self, key_event: KeyEvent, _now: Instant) {
        if key_event.kind == KeyEventKind::Release {
            return;
        }
        if SUBMIT_KEY.is_press(key_event) {
            self.submit();
            return;
        }
        match key_event.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::PageUp | KeyCode::PageDown => {
                self.scroll.handle_key(key_event);
            }
            _ if key_event.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key_event.code, KeyCode::Left | KeyCode::Right) => {}
            _ => self.handle_editor_key(key_event),
        }
    }

    fn handle_paste(&mut self, pasted: String) {
        match self.focus {
            EditorFocus::Period => {}
            EditorFocus::Title => self.title.insert_str(&pasted.replace(['\r', '\n'], " ")),
            EditorFocus::Content => self.content.insert_str(&pasted.replace("\r\n", "\n")),
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, assets: &AssetCatalog) {
        let [body_area, editor_area] = self.layout(area);
        let body_area = body_area.inset(Insets::tlbr(1, 1, 0, 1));
        self.scroll
            .render(self.body_lines(body_area.width, assets), body_area, buf);

        let block = Self::editor_block();
        let inner = block.inner(editor_area);
        block.render_ref(editor_area, buf);
        self.editor_column()
            .inset(Insets::vh(0, 1))
            .render(inner, buf);
    }

    fn cursor_pos(&self, area: Rect, _assets: &AssetCatalog) -> Option<(u16, u16)> {
        let [_, editor_area] = self.layout(area);
        let inner = Self::editor_block().inner(editor_area);
        self.editor_column()
            .inset(Insets::vh(0, 1))
            .cursor_pos(inner)
    }

    fn key_hints(&self) -> Line<'static> {
        key_hint::hint_line(&[
            (key_hint::plain(KeyCode::Tab), "항목 이동"),
            (SUBMIT_KEY, "등록하기"),
            (key_hint::plain(KeyCode::PageDown), "스크롤"),
        ])
    }

    fn stats(&self) -> ScreenStats {
        ScreenStats {
            messages_sent: 0,
            diary_entries_written: self.journal.entries().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_snapshot;
    use chrono::TimeZone;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_into(screen: &mut ConsumptionDiaryScreen, text: &str) {
        for ch in text.chars() {
            screen.handle_key(key(KeyCode::Char(ch)), Instant::now());
        }
    }

    #[test]
    fn blank_fields_write_nothing() {
        let mut journal = DiaryJournal::default();
        assert_eq!(journal.submit("  ", "\n ", Local::now()), None);
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn missing_title_defaults_and_fields_are_trimmed() {
        let mut journal = DiaryJournal::default();
        let entry = journal
            .submit("   ", "  커피를 줄이자  ", Local::now())
            .expect("entry")
            .clone();
        assert_eq!(entry.title, UNTITLED);
        assert_eq!(entry.content, "커피를 줄이자");
    }

    #[test]
    fn entries_are_prepended() {
        let mut journal = DiaryJournal::default();
        journal.submit("첫번째", "", Local::now());
        journal.submit("두번째", "내용", Local::now());
        let titles: Vec<&str> = journal
            .entries()
            .iter()
            .map(|entry| entry.title.as_str())
            .collect();
        assert_eq!(titles, vec!["두번째", "첫번째"]);
        assert_eq!(journal.entries()[1].content, "");
    }

    #[test]
    fn editor_submits_and_clears() {
        let mut screen = ConsumptionDiaryScreen::new();
        type_into(&mut screen, "주말 회식");
        screen.handle_key(key(KeyCode::Tab), Instant::now());
        type_into(&mut screen, "삼겹살");
        screen.handle_key(key(KeyCode::Enter), Instant::now());
        type_into(&mut screen, "너무 많이 시켰다");
        screen.handle_key(
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            Instant::now(),
        );

        let entries = screen.journal.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "주말 회식");
        assert_eq!(entries[0].content, "삼겹살\n너무 많이 시켰다");
        assert!(screen.title.is_empty());
        assert!(screen.content.is_empty());
        assert_eq!(screen.stats().diary_entries_written, 1);
    }

    #[test]
    fn enter_in_blank_title_is_a_no_op() {
        let mut screen = ConsumptionDiaryScreen::new();
        screen.handle_key(key(KeyCode::Enter), Instant::now());
        assert!(screen.journal.entries().is_empty());
    }

    #[test]
    fn period_tab_changes_only_when_focused() {
        let mut screen = ConsumptionDiaryScreen::new();
        screen.handle_key(key(KeyCode::Right), Instant::now());
        assert_eq!(screen.period, DiaryPeriod::ThisWeek);

        screen.handle_key(key(KeyCode::BackTab), Instant::now());
        assert_eq!(screen.focus, EditorFocus::Period);
        screen.handle_key(key(KeyCode::Right), Instant::now());
        assert_eq!(screen.period, DiaryPeriod::LastMonth);
        screen.handle_key(key(KeyCode::Left), Instant::now());
        screen.handle_key(key(KeyCode::Left), Instant::now());
        assert_eq!(screen.period, DiaryPeriod::ThisYear);
    }

    fn draw(screen: &ConsumptionDiaryScreen, width: u16, height: u16) -> Buffer {
        let assets = AssetCatalog::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf, &assets);
        buf
    }

    #[test]
    fn written_entries_are_rendered() {
        let mut screen = ConsumptionDiaryScreen::new();
        let written_at = Local
            .with_ymd_and_hms(2025, 11, 3, 21, 30, 0)
            .single()
            .expect("unambiguous local time");
        screen
            .journal
            .submit("카페 줄이기", "아메리카노는 주 3회만", written_at);
        type_into(&mut screen, "점심 도시락");

        assert_snapshot!("diary_with_entry", buffer_snapshot(&draw(&screen, 100, 32)));
    }

    #[test]
    fn cursor_follows_the_focused_field() {
        let mut screen = ConsumptionDiaryScreen::new();
        type_into(&mut screen, "점심");
        let assets = AssetCatalog::default();
        let area = Rect::new(0, 0, 100, 32);
        assert_eq!(screen.cursor_pos(area, &assets), Some((8, 27)));

        screen.handle_key(key(KeyCode::Tab), Instant::now());
        assert_eq!(screen.cursor_pos(area, &assets), Some((4, 28)));

        screen.handle_key(key(KeyCode::Tab), Instant::now());
        assert_eq!(screen.cursor_pos(area, &assets), None);
    }
}
