use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    key: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }

    /// True for a press or repeat of exactly this key and modifier set.
    pub fn is_press(&self, event: KeyEvent) -> bool {
        event.kind != KeyEventKind::Release
            && event.code == self.key
            && event.modifiers == self.modifiers
    }
}

pub const fn plain(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::NONE)
}

pub const fn ctrl(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::CONTROL)
}

fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::PageUp => "pgup".to_string(),
        KeyCode::PageDown => "pgdn".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_ascii_lowercase().to_string(),
        other => format!("{other:?}").to_ascii_lowercase(),
    }
}

impl From<KeyBinding> for Span<'static> {
    fn from(binding: KeyBinding) -> Self {
        let mut label = String::new();
        if binding.modifiers.contains(KeyModifiers::CONTROL) {
            label.push_str("ctrl + ");
        }
        if binding.modifiers.contains(KeyModifiers::ALT) {
            label.push_str("alt + ");
        }
        if binding.modifiers.contains(KeyModifiers::SHIFT) {
            label.push_str("shift + ");
        }
        label.push_str(&key_label(binding.key));
        Span::styled(label, Style::default().bold())
    }
}

/// `key description · key description · ...`, dimmed descriptions.
pub fn hint_line(hints: &[(KeyBinding, &str)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    for (idx, (binding, description)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(" · ".dim());
        }
        spans.push((*binding).into());
        spans.push(" ".into());
        spans.push(description.to_string().dim());
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn is_press_ignores_release_and_other_modifiers() {
        let binding = ctrl(KeyCode::Char('o'));
        assert!(binding.is_press(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL)));
        assert!(!binding.is_press(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE)));

        let mut release = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        release.kind = KeyEventKind::Release;
        assert!(!binding.is_press(release));
    }

    #[test]
    fn hint_line_formats_bindings() {
        let line = hint_line(&[(plain(KeyCode::Enter), "전송"), (ctrl(KeyCode::Char('o')), "이미지")]);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "enter 전송 · ctrl + o 이미지");
    }
}
