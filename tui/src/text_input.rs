//! Editable text buffer shared by the search bar, the chat composer, the attachment prompt
//! and the diary editor.
//!
//! The cursor is a byte offset that always sits on a char boundary. `\n` is only inserted
//! explicitly (paste or [`TextInput::insert_newline`]); Enter itself is left to the owner,
//! which decides between submit and newline.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;
use unicode_width::UnicodeWidthStr;

use crate::render::renderable::Renderable;
use crate::text_formatting::take_prefix_by_width;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole buffer verbatim and move the cursor to the end.
    #[cfg(test)]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Clear the buffer, returning what it held.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.take();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn insert_str(&mut self, text: &str) {
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.prev_boundary() else {
            return false;
        };
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        let Some(next) = self.next_boundary() else {
            return false;
        };
        self.text.replace_range(self.cursor..next, "");
        true
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    /// Start of the current line.
    pub fn move_home(&mut self) {
        self.cursor = self.line_start();
    }

    /// End of the current line.
    pub fn move_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |offset| self.cursor + offset);
    }

    fn kill_to_line_start(&mut self) -> bool {
        let start = self.line_start();
        if start == self.cursor {
            return false;
        }
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    fn kill_to_line_end(&mut self) -> bool {
        let cursor = self.cursor;
        self.move_end();
        let end = self.cursor;
        self.cursor = cursor;
        if end == cursor {
            return false;
        }
        self.text.replace_range(cursor..end, "");
        true
    }

    fn line_start(&self) -> usize {
        self.text[..self.cursor].rfind('\n').map_or(0, |idx| idx + 1)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }

    /// Cursor as (line index, display column within that line).
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let row = before.matches('\n').count();
        let col = UnicodeWidthStr::width(&before[self.line_start()..]);
        (row, col)
    }

    /// Apply an editing key. Returns `true` when the key was consumed. Enter, Esc, Tab and
    /// unrelated control chords are left for the owner.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind == KeyEventKind::Release {
            return false;
        }
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key_event.modifiers.contains(KeyModifiers::ALT);
        match key_event.code {
            KeyCode::Char('a') if ctrl => self.move_home(),
            KeyCode::Char('e') if ctrl => self.move_end(),
            KeyCode::Char('u') if ctrl => {
                self.kill_to_line_start();
            }
            KeyCode::Char('k') if ctrl => {
                self.kill_to_line_end();
            }
            KeyCode::Char(ch) if !ctrl && !alt => self.insert_char(ch),
            KeyCode::Backspace => {
                self.backspace();
            }
            KeyCode::Delete => {
                self.delete();
            }
            KeyCode::Left if !ctrl => self.move_left(),
            KeyCode::Right if !ctrl => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Single-line view; the buffer scrolls horizontally to keep the cursor visible.
    pub fn view<'a>(&'a self, placeholder: &'a str) -> TextInputView<'a> {
        TextInputView {
            input: self,
            placeholder,
            style: Style::default(),
            multiline_rows: None,
        }
    }

    /// Multi-line view showing up to `rows` lines, scrolled to keep the cursor line visible.
    pub fn multiline_view<'a>(&'a self, placeholder: &'a str, rows: u16) -> TextInputView<'a> {
        TextInputView {
            input: self,
            placeholder,
            style: Style::default(),
            multiline_rows: Some(rows.max(1)),
        }
    }
}

pub struct TextInputView<'a> {
    input: &'a TextInput,
    placeholder: &'a str,
    style: Style,
    multiline_rows: Option<u16>,
}

impl TextInputView<'_> {
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn rows(&self) -> u16 {
        self.multiline_rows.unwrap_or(1)
    }

    fn first_visible_line(&self, height: u16) -> usize {
        let (row, _) = self.input.cursor_line_col();
        row.saturating_sub(usize::from(height.max(1)) - 1)
    }

    /// Columns hidden on the left so that the cursor column fits inside `width`.
    fn horizontal_skip(cursor_col: usize, width: u16) -> usize {
        let width = usize::from(width.max(1));
        (cursor_col + 1).saturating_sub(width)
    }
}

fn skip_columns(line: &str, columns: usize) -> &str {
    let (skipped, _) = take_prefix_by_width(line, columns);
    &line[skipped.len()..]
}

impl Renderable for TextInputView<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if self.input.is_empty() {
            Line::from(self.placeholder.to_string().dim()).render_ref(area, buf);
            return;
        }

        let (cursor_row, cursor_col) = self.input.cursor_line_col();
        let first = self.first_visible_line(area.height);
        let lines: Vec<Line<'_>> = self
            .input
            .text
            .split('\n')
            .enumerate()
            .skip(first)
            .take(usize::from(area.height))
            .map(|(idx, line)| {
                let visible = if idx == cursor_row {
                    skip_columns(line, Self::horizontal_skip(cursor_col, area.width))
                } else {
                    line
                };
                Line::from(visible.to_string())
            })
            .collect();
        Paragraph::new(lines).style(self.style).render_ref(area, buf);
    }

    fn desired_height(&self, _width: u16) -> u16 {
        self.rows()
    }

    fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if area.is_empty() {
            return None;
        }
        let (cursor_row, cursor_col) = self.input.cursor_line_col();
        let first = self.first_visible_line(area.height);
        let shown_col = cursor_col - Self::horizontal_skip(cursor_col, area.width);
        let x = area.x + u16::try_from(shown_col).unwrap_or(area.width - 1);
        let y = area.y + u16::try_from(cursor_row - first).unwrap_or(0);
        Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn editing_respects_char_boundaries() {
        let mut input = TextInput::new();
        for ch in "영수증".chars() {
            assert!(input.handle_key(key(KeyCode::Char(ch))));
        }
        input.move_left();
        assert!(input.backspace());
        assert_eq!(input.text(), "영증");
        assert_eq!(input.cursor_line_col(), (0, 2));
        input.move_home();
        assert!(input.delete());
        assert_eq!(input.text(), "증");
    }

    #[test]
    fn set_text_is_verbatim() {
        let mut input = TextInput::new();
        input.set_text("  hello  ");
        assert_eq!(input.text(), "  hello  ");
        assert_eq!(input.take(), "  hello  ");
        assert!(input.is_empty());
    }

    #[test]
    fn enter_and_escape_are_left_to_the_owner() {
        let mut input = TextInput::new();
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert!(!input.handle_key(key(KeyCode::Esc)));
        assert!(!input.handle_key(KeyEvent::new(
            KeyCode::Char('o'),
            KeyModifiers::CONTROL
        )));
        assert!(input.is_empty());
    }

    #[test]
    fn multiline_cursor_and_line_kills() {
        let mut input = TextInput::new();
        input.insert_str("first");
        input.insert_newline();
        input.insert_str("second line");
        assert_eq!(input.text().lines().count(), 2);
        assert_eq!(input.cursor_line_col(), (1, 11));

        assert!(input.handle_key(KeyEvent::new(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL
        )));
        assert_eq!(input.text(), "first\n");

        input.move_left();
        input.move_home();
        assert!(input.handle_key(KeyEvent::new(
            KeyCode::Char('k'),
            KeyModifiers::CONTROL
        )));
        assert_eq!(input.text(), "\n");
    }

    #[test]
    fn single_line_view_keeps_cursor_visible() {
        let mut input = TextInput::new();
        input.set_text("abcdefghij");
        let view = input.view("");
        assert_eq!(view.cursor_pos(Rect::new(2, 1, 5, 1)), Some((6, 1)));

        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        view.render(Rect::new(0, 0, 5, 1), &mut buf);
        let shown: String = (0..5).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(shown, "ghij ");
    }

    #[test]
    fn empty_input_shows_placeholder() {
        let input = TextInput::new();
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 1));
        input.view("search").render(Rect::new(0, 0, 8, 1), &mut buf);
        let shown: String = (0..8).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(shown, "search  ");
    }
}
