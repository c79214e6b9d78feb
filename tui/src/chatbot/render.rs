use olla_protocol::assets::AssetCatalog;
use olla_protocol::chat::ASK_BOT_PLACEHOLDER;
use olla_protocol::chat::BOT_DISPLAY_NAME;
use olla_protocol::chat::CHAT_MODAL_TITLE;
use olla_protocol::chat::SEED_GREETING;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;
use unicode_width::UnicodeWidthStr;

use super::ATTACH_KEY;
use super::CLOSE_KEY;
use super::ChatSession;
use super::REMOVE_IMAGE_KEY;
use super::SEND_KEY;
use super::message::Message;
use super::reply_scheduler::SchedulerState;
use crate::key_hint;
use crate::render::Insets;
use crate::render::RectExt as _;
use crate::render::renderable::ColumnRenderable;
use crate::render::renderable::InsetRenderable;
use crate::render::renderable::Renderable;
use crate::render::renderable::RenderableExt as _;
use crate::text_formatting::front_truncate;
use crate::text_formatting::wrap_text;
use crate::text_input::TextInputView;
use crate::ui_colors::brand_color;

const MODAL_MAX_WIDTH: u16 = 76;
const PROMPT_PLACEHOLDER: &str = "이미지 파일 경로를 입력하거나 붙여넣으세요";
const TYPING_LABEL: &str = " 입력 중…";

/// The chat-bot modal drawn over the host screen. Renders nothing while closed.
pub struct ChatModalView<'a> {
    session: &'a ChatSession,
    assets: &'a AssetCatalog,
}

impl<'a> ChatModalView<'a> {
    pub fn new(session: &'a ChatSession, assets: &'a AssetCatalog) -> Self {
        Self { session, assets }
    }

    fn modal_area(area: Rect) -> Rect {
        let width = area.width.saturating_sub(4).min(MODAL_MAX_WIDTH);
        let height = area.height.saturating_sub(2);
        area.centered(width, height)
    }

    fn block(&self) -> Block<'static> {
        Block::bordered()
            .border_style(Style::default().fg(brand_color()))
            .title(Line::from(vec![
                " ".into(),
                self.assets.chatbot_avatar.fg(brand_color()),
                " ".into(),
                CHAT_MODAL_TITLE.bold(),
                " ".into(),
            ]))
            .title(
                key_hint::hint_line(&[(CLOSE_KEY, "닫기")])
                    .right_aligned(),
            )
    }

    /// Splits the modal interior into the transcript and the bottom input column.
    fn layout(&self, area: Rect) -> (Rect, Rect, InsetRenderable<'_>) {
        let inner = self.block().inner(Self::modal_area(area));
        let bottom = self.bottom_column();
        let bottom_height = bottom.desired_height(inner.width).min(inner.height);
        let [transcript, separator] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .areas(Rect {
                height: inner.height - bottom_height,
                ..inner
            });
        let bottom_area = Rect {
            y: separator.bottom(),
            height: bottom_height,
            ..inner
        };
        (transcript.inset(Insets::vh(0, 1)), bottom_area, bottom)
    }

    fn bottom_column(&self) -> InsetRenderable<'_> {
        let session = self.session;
        let mut column = ColumnRenderable::new();
        column.push(self.preview_line());
        if let Some(prompt) = session.picker().prompt() {
            column.push(InputRow {
                prefix: Line::from(vec![self.assets.image.into(), " 이미지 경로 › ".dim()]),
                input: prompt.view(PROMPT_PLACEHOLDER),
                suffix: None,
            });
            column.push(key_hint::hint_line(&[
                (SEND_KEY, "첨부"),
                (CLOSE_KEY, "취소"),
            ]));
        } else {
            column.push(InputRow {
                prefix: Line::from(vec![self.assets.image_upload.fg(brand_color()), " › ".dim()]),
                input: session.composer().input().view(ASK_BOT_PLACEHOLDER),
                suffix: Some(if session.composer().can_submit() {
                    self.assets.send.fg(brand_color())
                } else {
                    self.assets.send.dim()
                }),
            });
            column.push(key_hint::hint_line(&[
                (SEND_KEY, "전송"),
                (ATTACH_KEY, "이미지 첨부"),
                (REMOVE_IMAGE_KEY, "이미지 제거"),
            ]));
        }
        column.inset(Insets::vh(0, 1))
    }

    fn preview_line(&self) -> Option<Line<'static>> {
        let session = self.session;
        let image = session.composer().pending_image()?;
        let info = session.picker().info(image)?;
        Some(Line::from(vec![
            self.assets.image.fg(brand_color()),
            " ".into(),
            front_truncate(&info.file_name(), 32).into(),
            format!(" {}×{} {}", info.width, info.height, info.format.label()).dim(),
        ]))
    }

    fn transcript_lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = usize::from(width.max(1));
        let mut lines = Vec::new();
        self.push_bot_bubble(&mut lines, SEED_GREETING, width);
        for message in self.session.store().filter_for_display() {
            if message.is_bot() {
                self.push_bot_bubble(&mut lines, &message.text, width);
            } else {
                self.push_user_bubble(&mut lines, message, width);
            }
        }
        if self.session.scheduler().state() == SchedulerState::Pending {
            lines.push(Line::from(vec![
                self.assets.chatbot_avatar.fg(brand_color()),
                " ".into(),
                BOT_DISPLAY_NAME.bold(),
                TYPING_LABEL.dim(),
            ]));
        }
        lines
    }

    fn push_bot_bubble(&self, lines: &mut Vec<Line<'static>>, text: &str, width: usize) {
        lines.push(Line::from(vec![
            self.assets.chatbot_avatar.fg(brand_color()),
            " ".into(),
            BOT_DISPLAY_NAME.bold(),
        ]));
        for line in wrap_text(text, width.saturating_sub(2)) {
            lines.push(Line::from(format!("  {line}")));
        }
        lines.push(Line::default());
    }

    fn push_user_bubble(&self, lines: &mut Vec<Line<'static>>, message: &Message, width: usize) {
        let bubble_width = (width * 3 / 4).max(1);
        if !message.text.is_empty() {
            for line in wrap_text(&message.text, bubble_width) {
                lines.push(Line::from(line.fg(brand_color())).right_aligned());
            }
        }
        if let Some(image) = &message.image {
            let label = self
                .session
                .picker()
                .info(image)
                .map(|info| {
                    format!(
                        "{} {}×{}",
                        front_truncate(&info.file_name(), bubble_width.saturating_sub(12)),
                        info.width,
                        info.height
                    )
                })
                .unwrap_or_else(|| "이미지".to_string());
            lines.push(
                Line::from(vec![
                    self.assets.image.fg(brand_color()),
                    " ".into(),
                    label.into(),
                ])
                .right_aligned(),
            );
        }
        lines.push(Line::default());
    }

    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.session.is_open() {
            return None;
        }
        let (_, bottom_area, bottom) = self.layout(area);
        bottom.cursor_pos(bottom_area)
    }
}

impl WidgetRef for ChatModalView<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if !self.session.is_open() {
            return;
        }
        let modal_area = Self::modal_area(area);
        if modal_area.is_empty() {
            return;
        }
        Clear.render(modal_area, buf);
        self.block().render_ref(modal_area, buf);

        let (transcript_area, bottom_area, bottom) = self.layout(area);
        let lines = self.transcript_lines(transcript_area.width);
        let height = usize::from(transcript_area.height);
        let overflow = lines.len().saturating_sub(height);
        let from_bottom = self.session.modal().scroll_from_bottom().min(overflow);
        let top = overflow - from_bottom;
        self.session.record_layout(overflow, height);
        Paragraph::new(lines)
            .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0))
            .render_ref(transcript_area, buf);

        let separator = "─".repeat(usize::from(bottom_area.width));
        Line::from(separator.dim()).render_ref(
            Rect {
                y: bottom_area.y.saturating_sub(1),
                height: 1,
                ..bottom_area
            },
            buf,
        );
        bottom.render(bottom_area, buf);
    }
}

/// `prefix [input........] suffix` on one row.
struct InputRow<'a> {
    prefix: Line<'a>,
    input: TextInputView<'a>,
    suffix: Option<Span<'a>>,
}

impl InputRow<'_> {
    fn input_area(&self, area: Rect) -> Rect {
        let prefix_width = u16::try_from(self.prefix.width()).unwrap_or(area.width);
        let suffix_width = self
            .suffix
            .as_ref()
            .map_or(0, |suffix| UnicodeWidthStr::width(suffix.content.as_ref()) + 1);
        let suffix_width = u16::try_from(suffix_width).unwrap_or(0);
        area.inset(Insets::tlbr(0, prefix_width, 0, suffix_width))
    }
}

impl Renderable for InputRow<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.prefix.render_ref(area, buf);
        self.input.render(self.input_area(area), buf);
        if let Some(suffix) = &self.suffix {
            Line::from(suffix.clone()).right_aligned().render_ref(area, buf);
        }
    }

    fn desired_height(&self, _width: u16) -> u16 {
        1
    }

    fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        self.input.cursor_pos(self.input_area(area))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::Instant;

    use super::*;
    use crate::chatbot::attachment::test_support::write_png;
    use crate::test_support::buffer_snapshot;
    use crate::tui::FrameRequester;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyModifiers;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_millis(600);

    fn open_session(now: Instant) -> ChatSession {
        let mut session = ChatSession::new(FrameRequester::test_dummy(), DELAY, now);
        session.open();
        session
    }

    fn type_text(session: &mut ChatSession, text: &str, now: Instant) {
        for ch in text.chars() {
            session.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE), now);
        }
    }

    fn render(session: &ChatSession, width: u16, height: u16) -> Buffer {
        let assets = AssetCatalog::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        ChatModalView::new(session, &assets).render_ref(area, &mut buf);
        buf
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let session = ChatSession::new(FrameRequester::test_dummy(), DELAY, Instant::now());
        assert_eq!(render(&session, 60, 20), Buffer::empty(Rect::new(0, 0, 60, 20)));
    }

    #[test]
    fn conversation_with_image_and_reply() {
        let dir = tempfile::tempdir().expect("tempdir");
        let receipt = write_png(dir.path(), "receipt.png", 4, 3);
        let menu = write_png(dir.path(), "menu.png", 8, 6);
        let start = Instant::now();
        let mut session = open_session(start);

        assert!(session.attach_from_path(Some(&receipt)));
        type_text(&mut session, "영수증 봐줘", start);
        session.submit(start);
        assert_eq!(session.on_tick(start + DELAY), 1);
        assert!(session.attach_from_path(Some(&menu)));
        type_text(&mut session, "고마워", start + DELAY);

        assert_snapshot!(
            "chat_modal_conversation",
            buffer_snapshot(&render(&session, 80, 48))
        );
    }

    #[test]
    fn path_prompt_while_reply_is_pending() {
        let start = Instant::now();
        let mut session = open_session(start);
        type_text(&mut session, "hi", start);
        session.submit(start);
        session.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL), start);
        session.handle_paste("~/Pictures/receipt.png");

        assert_snapshot!(
            "chat_modal_path_prompt",
            buffer_snapshot(&render(&session, 60, 16))
        );
    }

    #[test]
    fn transcript_follows_the_newest_reply() {
        let start = Instant::now();
        let mut session = open_session(start);
        for text in ["first", "second", "third"] {
            session.set_text(text);
            session.submit(start);
        }
        assert_eq!(session.on_tick(start + Duration::from_secs(1)), 3);

        assert_snapshot!(
            "chat_modal_follows_newest_reply",
            buffer_snapshot(&render(&session, 80, 24))
        );
    }

    #[test]
    fn typing_row_shows_only_while_a_reply_is_pending() {
        let assets = AssetCatalog::default();
        let last_row = |session: &ChatSession| {
            ChatModalView::new(session, &assets)
                .transcript_lines(40)
                .last()
                .map(ToString::to_string)
        };
        let start = Instant::now();
        let mut session = open_session(start);
        assert_eq!(last_row(&session), Some(String::new()));

        session.set_text("hi");
        session.submit(start);
        assert_eq!(last_row(&session), Some("◉ OLLA 입력 중…".to_string()));

        session.on_tick(start + DELAY);
        assert_eq!(last_row(&session), Some(String::new()));
    }

    #[test]
    fn cursor_sits_in_the_composer_row() {
        let mut session = open_session(Instant::now());
        session.set_text("ab");
        let assets = AssetCatalog::default();
        let view = ChatModalView::new(&session, &assets);
        assert_eq!(view.cursor_pos(Rect::new(0, 0, 60, 20)), Some((10, 16)));
    }
}
