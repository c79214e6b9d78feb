//! Screens mounted under the header. Each owns its own state; dropping a screen tears that
//! state down.

use std::time::Instant;

use crossterm::event::KeyEvent;
use olla_protocol::assets::AssetCatalog;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;

pub(crate) mod cards;
pub(crate) mod diary;
pub(crate) mod my_page;
pub(crate) mod widgets;

/// Counters a screen reports before it is unmounted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScreenStats {
    pub messages_sent: usize,
    pub diary_entries_written: usize,
}

pub(crate) trait Screen {
    fn handle_key(&mut self, key_event: KeyEvent, now: Instant);

    fn handle_paste(&mut self, _pasted: String) {}

    fn render(&self, area: Rect, buf: &mut Buffer, assets: &AssetCatalog);

    fn cursor_pos(&self, _area: Rect, _assets: &AssetCatalog) -> Option<(u16, u16)> {
        None
    }

    /// Advance time-driven state. Called on every frame.
    fn on_tick(&mut self, _now: Instant) {}

    /// Footer hints for the screen's own keys.
    fn key_hints(&self) -> Line<'static>;

    fn stats(&self) -> ScreenStats {
        ScreenStats::default()
    }
}
