use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Longest prefix of `text` whose display width is at most `max_width`, and that width.
pub fn take_prefix_by_width(text: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_width {
            return (&text[..idx], width);
        }
        width += ch_width;
    }
    (text, width)
}

/// Keep the end of `text` (usually a file name), replacing the cut front with `…`.
pub fn front_truncate(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut kept = Vec::new();
    let mut used_width = 1; // leading ellipsis
    for ch in text.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used_width + ch_width > max_width {
            break;
        }
        used_width += ch_width;
        kept.push(ch);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

/// Right-pad with spaces to `width` display columns. Wider text is returned as-is.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(current)));
    padded
}

/// Wrap each `\n`-separated line of `text` to `width` columns. Blank lines are kept so
/// multi-paragraph messages keep their shape.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(
            textwrap::wrap(raw_line, width)
                .into_iter()
                .map(std::borrow::Cow::into_owned),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn take_prefix_respects_wide_chars() {
        assert_eq!(take_prefix_by_width("안녕하세요", 5), ("안녕", 4));
        assert_eq!(take_prefix_by_width("abc", 10), ("abc", 3));
        assert_eq!(take_prefix_by_width("abc", 0), ("", 0));
    }

    #[test]
    fn front_truncate_keeps_file_name() {
        assert_eq!(
            front_truncate("/home/user/Pictures/receipt.png", 12),
            "…receipt.png"
        );
        assert_eq!(front_truncate("short.png", 12), "short.png");
    }

    #[test]
    fn pad_to_width_counts_display_columns() {
        assert_eq!(pad_to_width("지출", 6), "지출  ");
        assert_eq!(pad_to_width("longer", 3), "longer");
    }

    #[test]
    fn wrap_text_keeps_blank_lines() {
        assert_eq!(
            wrap_text("one two three\n\nfour", 8),
            vec![
                "one two".to_string(),
                "three".to_string(),
                String::new(),
                "four".to_string(),
            ]
        );
    }
}
