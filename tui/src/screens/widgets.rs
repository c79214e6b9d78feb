//! Line builders shared by the finance screens, plus the scrolled page body they render into.

use std::cell::Cell;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use olla_protocol::finance::InsightSection;
use olla_protocol::finance::InsightTone;
use olla_protocol::finance::MonthSummary;
use olla_protocol::finance::SummaryMetric;
use olla_protocol::num_format::format_with_separators;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;

use crate::text_formatting::pad_to_width;
use crate::text_formatting::wrap_text;
use crate::ui_colors::alert_color;
use crate::ui_colors::brand_color;
use crate::ui_colors::suggestion_color;

const LABEL_COLUMN_WIDTH: usize = 20;
const INDENT: &str = "  ";

pub(crate) fn section_title(title: &str, subtitle: &str) -> Line<'static> {
    let mut spans = vec![title.to_string().fg(brand_color()).bold()];
    if !subtitle.is_empty() {
        spans.push("  ".into());
        spans.push(subtitle.to_string().dim());
    }
    Line::from(spans)
}

/// `label ........ value` with the label padded to a fixed display width.
pub(crate) fn labeled_row(label: &str, value: Vec<Span<'static>>) -> Line<'static> {
    let mut spans = vec![
        INDENT.into(),
        pad_to_width(label, LABEL_COLUMN_WIDTH).dim(),
    ];
    spans.extend(value);
    Line::from(spans)
}

pub(crate) fn format_metric_value(value: i64, unit: Option<&str>) -> String {
    format!("{}{}", format_with_separators(value), unit.unwrap_or(""))
}

fn metric_row(metric: &SummaryMetric) -> Line<'static> {
    let current = format_metric_value(metric.current, metric.unit);
    let over_target = metric.target.is_some_and(|target| metric.current > target);
    let mut value = vec![if over_target {
        current.fg(alert_color()).bold()
    } else {
        current.bold()
    }];
    if let Some(target) = metric.target {
        value.push(format!(" / {}", format_metric_value(target, metric.unit)).dim());
    }
    labeled_row(metric.label, value)
}

pub(crate) fn month_summary_lines(title: &str, summary: &MonthSummary) -> Vec<Line<'static>> {
    let mut lines = vec![
        section_title(title, ""),
        Line::from(vec![
            INDENT.into(),
            format!("[{}] ", summary.month_label).fg(brand_color()).bold(),
            summary.copy.to_string().into(),
        ]),
    ];
    lines.extend(summary.metrics.iter().map(metric_row));
    lines.extend(summary.highlights.iter().map(|highlight| {
        labeled_row(highlight.label, vec![highlight.value.to_string().bold()])
    }));
    lines
}

fn tone_color(tone: InsightTone) -> Color {
    match tone {
        InsightTone::Alert => alert_color(),
        InsightTone::Suggestion => suggestion_color(),
    }
}

pub(crate) fn insight_lines(section: &InsightSection, width: u16) -> Vec<Line<'static>> {
    let body_width = usize::from(width).saturating_sub(6).max(10);
    let mut lines = vec![section_title(section.title, section.subtitle)];
    for card in section.cards {
        let color = tone_color(card.tone);
        lines.push(Line::from(vec![
            INDENT.into(),
            "▍".fg(color),
            card.tag.to_string().fg(color).bold(),
        ]));

        if let Some(highlight) = card.highlight {
            lines.push(Line::from(vec![
                "    ".into(),
                card.message.to_string().into(),
                highlight.to_string().fg(color).bold(),
                card.message_end.unwrap_or("").to_string().into(),
            ]));
        } else {
            let message = format!("{}{}", card.message, card.message_end.unwrap_or(""));
            lines.extend(
                wrap_text(&message, body_width)
                    .into_iter()
                    .map(|line| Line::from(format!("    {line}"))),
            );
        }
        if let Some(helper) = card.helper {
            lines.extend(
                wrap_text(helper, body_width)
                    .into_iter()
                    .map(|line| Line::from(format!("    {line}").dim())),
            );
        }
    }
    lines
}

/// Vertical scroll state for a page body taller than the screen.
#[derive(Debug, Default)]
pub(crate) struct PageScroll {
    offset: u16,
    /// Highest useful offset at the last render.
    max_offset: Cell<u16>,
    viewport: Cell<u16>,
}

impl PageScroll {
    /// PageUp/PageDown move a screenful. Returns `true` when consumed.
    pub(crate) fn handle_key(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind == KeyEventKind::Release {
            return false;
        }
        let page = self.viewport.get().saturating_sub(1).max(1);
        let max = self.max_offset.get();
        self.offset = match key_event.code {
            KeyCode::PageUp => self.offset.saturating_sub(page),
            KeyCode::PageDown => self.offset.saturating_add(page).min(max),
            _ => return false,
        };
        true
    }

    pub(crate) fn render(&self, lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
        let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let max = total.saturating_sub(area.height);
        self.max_offset.set(max);
        self.viewport.set(area.height);
        Paragraph::new(lines)
            .scroll((self.offset.min(max), 0))
            .render_ref(area, buf);
    }
}
