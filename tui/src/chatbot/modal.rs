//! Visibility and scroll position of the chat-bot modal.
//!
//! Scroll is kept as a distance from the bottom of the transcript, so "scrolled to the end"
//! is simply zero and stays correct as messages are appended.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// What the host should do after the modal handled an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    /// Input was not for the modal (it is closed).
    None,
    /// Modal state changed; redraw.
    Redraw,
    /// The user asked to close the modal. The host decides and calls `close()`.
    CloseRequested,
}

#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
    /// Lines scrolled up from the bottom. Clamped at render time.
    scroll_from_bottom: usize,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn open(&mut self) {
        if !self.is_open() {
            tracing::debug!("chat modal opened");
        }
        self.state = ModalState::Open;
        self.scroll_to_end();
    }

    pub fn close(&mut self) {
        if self.is_open() {
            tracing::debug!("chat modal closed");
        }
        self.state = ModalState::Closed;
    }

    /// Called after every append. Only an open modal follows the conversation.
    pub fn on_messages_appended(&mut self) {
        if self.is_open() {
            self.scroll_to_end();
        }
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_from_bottom = 0;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    pub fn scroll_from_bottom(&self) -> usize {
        self.scroll_from_bottom
    }

    /// Pull an over-scrolled offset back inside the transcript.
    pub fn clamp_scroll(&mut self, max_from_bottom: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.min(max_from_bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn opening_scrolls_to_end_and_is_idempotent() {
        let mut modal = ModalController::new();
        modal.scroll_up(5);
        modal.open();
        assert_eq!(modal.scroll_from_bottom(), 0);
        modal.open();
        assert_eq!(modal.state, ModalState::Open);
        assert_eq!(modal.scroll_from_bottom(), 0);
    }

    #[test]
    fn appends_only_scroll_while_open() {
        let mut modal = ModalController::new();
        modal.scroll_up(3);
        modal.on_messages_appended();
        assert_eq!(modal.scroll_from_bottom(), 3);

        modal.open();
        modal.scroll_up(4);
        modal.on_messages_appended();
        assert_eq!(modal.scroll_from_bottom(), 0);
    }

    #[test]
    fn close_then_reopen_returns_to_the_end() {
        let mut modal = ModalController::new();
        modal.open();
        modal.scroll_up(10);
        modal.close();
        assert!(!modal.is_open());
        modal.open();
        assert_eq!(modal.scroll_from_bottom(), 0);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut modal = ModalController::new();
        modal.scroll_down(2);
        assert_eq!(modal.scroll_from_bottom(), 0);
        modal.scroll_up(50);
        modal.clamp_scroll(7);
        assert_eq!(modal.scroll_from_bottom(), 7);
    }
}
