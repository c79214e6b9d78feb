use ratatui::buffer::Buffer;
use unicode_width::UnicodeWidthStr;

/// Rows of `buf` for snapshots, each quoted with trailing blanks dropped. Cells hidden behind
/// a wide glyph are skipped so Korean text reads back contiguously.
pub(crate) fn buffer_snapshot(buf: &Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut row = String::new();
            let mut skip = 0;
            for x in area.left()..area.right() {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let symbol = buf[(x, y)].symbol();
                row.push_str(symbol);
                skip = UnicodeWidthStr::width(symbol).saturating_sub(1);
            }
            format!("\"{}\"", row.trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
