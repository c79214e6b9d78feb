//! Scripted chat-bot conversation shown in a modal over the my-page screen.
//!
//! [`ChatSession`] owns every piece of chat state: the message store, the composer draft,
//! reply timers, picked images and the modal controller. Dropping the session (which happens
//! when its screen is unmounted) cancels pending replies and releases every image.

use std::cell::Cell;
use std::path::Path;
use std::time::Duration;
use std::time::Instant;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use olla_protocol::chat::MessageId;

use crate::attachment_path::parse_attachment_path;
use crate::key_hint;
use crate::key_hint::KeyBinding;
use crate::tui::FrameRequester;

pub mod attachment;
pub mod composer;
pub mod message;
pub mod message_store;
pub mod modal;
mod render;
pub mod reply_scheduler;

use attachment::AttachmentPicker;
use attachment::ImageRef;
use attachment::PromptOutcome;
use composer::Composer;
use message_store::MessageStore;
use modal::ModalController;
pub use modal::ModalOutcome;
pub use render::ChatModalView;
use reply_scheduler::ReplyScheduler;

pub(crate) const CLOSE_KEY: KeyBinding = key_hint::plain(KeyCode::Esc);
pub(crate) const SEND_KEY: KeyBinding = key_hint::plain(KeyCode::Enter);
pub(crate) const ATTACH_KEY: KeyBinding = key_hint::ctrl(KeyCode::Char('o'));
pub(crate) const REMOVE_IMAGE_KEY: KeyBinding = key_hint::ctrl(KeyCode::Char('x'));

pub struct ChatSession {
    store: MessageStore,
    composer: Composer,
    scheduler: ReplyScheduler,
    picker: AttachmentPicker,
    modal: ModalController,
    frame_requester: FrameRequester,
    /// Transcript lines that did not fit at the last render; bounds scrolling.
    transcript_overflow: Cell<usize>,
    /// Transcript viewport height at the last render; one page for PageUp/PageDown.
    transcript_height: Cell<usize>,
    messages_sent: usize,
    disposed: bool,
}

impl ChatSession {
    pub fn new(frame_requester: FrameRequester, reply_delay: Duration, now: Instant) -> Self {
        Self {
            store: MessageStore::new(now),
            composer: Composer::new(),
            scheduler: ReplyScheduler::new(reply_delay),
            picker: AttachmentPicker::new(),
            modal: ModalController::new(),
            frame_requester,
            transcript_overflow: Cell::new(0),
            transcript_height: Cell::new(1),
            messages_sent: 0,
            disposed: false,
        }
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn scheduler(&self) -> &ReplyScheduler {
        &self.scheduler
    }

    pub fn picker(&self) -> &AttachmentPicker {
        &self.picker
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn messages_sent(&self) -> usize {
        self.messages_sent
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn open(&mut self) {
        self.modal.open();
        self.frame_requester.schedule_frame();
    }

    /// Hide the modal. The conversation is kept for the next `open()`.
    pub fn close(&mut self) {
        self.modal.close();
        self.frame_requester.schedule_frame();
    }

    #[cfg(test)]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.composer.set_text(text);
    }

    /// Send the draft. A blank draft without an image is ignored.
    pub fn submit(&mut self, now: Instant) -> Option<MessageId> {
        let draft = self.composer.submit(self.store.next_id(), now)?;
        let trigger = self.store.append(draft);
        self.store.reserve_reply_id(trigger);
        let due_at = self.scheduler.schedule(trigger, now);
        self.frame_requester.schedule_frame_at(due_at);
        self.modal.on_messages_appended();
        self.messages_sent += 1;
        self.frame_requester.schedule_frame();
        Some(trigger)
    }

    /// Deliver every reply whose timer has fired. Returns how many were appended.
    pub fn on_tick(&mut self, now: Instant) -> usize {
        let fired = self.scheduler.drain_due(now);
        let delivered = fired.len();
        for reply in fired {
            if let Some(trigger) = self.store.get(reply.trigger) {
                tracing::debug!(
                    trigger = %reply.trigger,
                    waited_ms = now.saturating_duration_since(trigger.timestamp).as_millis(),
                    late_ms = now.saturating_duration_since(reply.due_at).as_millis(),
                    "scripted reply delivered"
                );
            }
            self.store.append(reply.into_message(now));
            self.modal.on_messages_appended();
        }
        if let Some(next) = self.scheduler.next_deadline() {
            self.frame_requester.schedule_frame_at(next);
        }
        delivered
    }

    /// Pick an image for the draft. Nothing chosen (or an unusable file) leaves the draft as
    /// it was.
    pub fn attach_from_path(&mut self, path: Option<&Path>) -> bool {
        let Some(image) = self.picker.pick(path) else {
            return false;
        };
        self.attach(image);
        true
    }

    fn attach(&mut self, image: ImageRef) {
        if let Some(superseded) = self.composer.attach_image(image) {
            self.picker.release(superseded);
        }
        self.frame_requester.schedule_frame();
    }

    pub fn clear_image(&mut self) {
        if let Some(image) = self.composer.clear_image() {
            self.picker.release(image);
        }
    }

    pub fn handle_key(&mut self, key_event: KeyEvent, now: Instant) -> ModalOutcome {
        if !self.modal.is_open() || key_event.kind == KeyEventKind::Release {
            return ModalOutcome::None;
        }

        if self.picker.is_prompting() {
            match self.picker.handle_prompt_key(key_event) {
                PromptOutcome::Editing | PromptOutcome::Cancelled => {}
                PromptOutcome::Submitted(path) => {
                    self.attach_from_path(path.as_deref());
                }
            }
            return ModalOutcome::Redraw;
        }

        if CLOSE_KEY.is_press(key_event) {
            return ModalOutcome::CloseRequested;
        }
        if ATTACH_KEY.is_press(key_event) {
            self.picker.open_prompt();
            return ModalOutcome::Redraw;
        }
        if REMOVE_IMAGE_KEY.is_press(key_event) {
            self.clear_image();
            return ModalOutcome::Redraw;
        }
        if SEND_KEY.is_press(key_event) {
            self.submit(now);
            return ModalOutcome::Redraw;
        }

        let page = self.transcript_height.get().saturating_sub(1).max(1);
        match key_event.code {
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.modal.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(page),
            KeyCode::PageDown => self.modal.scroll_down(page),
            _ => {
                if !self.composer.handle_key(key_event) {
                    return ModalOutcome::None;
                }
            }
        }
        ModalOutcome::Redraw
    }

    fn scroll_up(&mut self, lines: usize) {
        self.modal.scroll_up(lines);
        self.modal.clamp_scroll(self.transcript_overflow.get());
    }

    /// Pasted text goes to the path prompt when it is open. Otherwise a paste that names a
    /// readable image is attached, and anything else is typed into the draft.
    pub fn handle_paste(&mut self, pasted: &str) {
        if !self.modal.is_open() {
            return;
        }
        if self.picker.is_prompting() {
            self.picker.paste_into_prompt(pasted);
            return;
        }
        if let Some(path) = parse_attachment_path(pasted)
            && path.is_file()
            && let Some(image) = self.picker.pick(Some(&path))
        {
            self.attach(image);
            return;
        }
        self.composer.paste(pasted);
    }

    /// Cancel pending replies and release every image. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        let cancelled = self.scheduler.cancel_all();
        if let Some(image) = self.composer.reset() {
            self.picker.release(image);
        }
        let released = self.picker.dispose();
        self.modal.close();
        tracing::debug!(cancelled, released, "chat session disposed");
    }

    fn record_layout(&self, overflow: usize, height: usize) {
        self.transcript_overflow.set(overflow);
        self.transcript_height.set(height);
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::attachment::test_support::write_png;
    use super::*;
    use crossterm::event::KeyModifiers;
    use olla_protocol::chat::SCRIPTED_REPLY;
    use olla_protocol::chat::SEED_MESSAGE_ID;
    use olla_protocol::chat::Speaker;
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_millis(600);

    fn session(now: Instant) -> ChatSession {
        let mut session = ChatSession::new(FrameRequester::test_dummy(), DELAY, now);
        session.open();
        session
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(session: &mut ChatSession, text: &str, now: Instant) {
        for ch in text.chars() {
            session.handle_key(key(KeyCode::Char(ch)), now);
        }
    }

    fn summary(session: &ChatSession) -> Vec<(u64, Speaker, String)> {
        session
            .store()
            .list()
            .iter()
            .map(|message| (message.id.get(), message.speaker, message.text.clone()))
            .collect()
    }

    #[test]
    fn fresh_session_has_exactly_the_seed() {
        let session = session(Instant::now());
        let list = session.store().list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, SEED_MESSAGE_ID);
        assert!(list[0].is_bot());
        assert_eq!(session.store().filter_for_display().count(), 0);
    }

    #[test]
    fn send_then_reply_after_delay() {
        let start = Instant::now();
        let mut session = session(start);
        session.set_text("hi");
        assert_eq!(session.submit(start), Some(MessageId::new(2)));
        assert_eq!(
            summary(&session),
            vec![
                (1, Speaker::Bot, olla_protocol::chat::SEED_GREETING.to_string()),
                (2, Speaker::User, "hi".to_string()),
            ]
        );
        assert_eq!(session.composer().text(), "");

        assert_eq!(session.on_tick(start + Duration::from_millis(599)), 0);
        assert_eq!(session.store().len(), 2);

        assert_eq!(
            session.on_tick(start + DELAY + Duration::from_millis(5)),
            1
        );
        let user = session.store().get(MessageId::new(2)).expect("user message");
        assert_eq!(user.timestamp, start);
        let reply = &session.store().list()[2];
        assert_eq!(reply.id, MessageId::new(3));
        assert!(reply.timestamp >= start + DELAY);
        assert!(reply.is_bot());
        assert_eq!(reply.text, SCRIPTED_REPLY);
        assert_eq!(reply.image, None);
    }

    #[test]
    fn whitespace_is_not_sent() {
        let start = Instant::now();
        let mut session = session(start);
        session.set_text("   ");
        assert_eq!(session.submit(start), None);
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.scheduler().pending(), 0);
        assert_eq!(session.composer().text(), "   ");
    }

    #[test]
    fn image_only_message_is_sent_with_empty_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "receipt.png", 3, 2);
        let start = Instant::now();
        let mut session = session(start);

        assert!(session.attach_from_path(Some(&path)));
        let id = session.submit(start).expect("image-only message");
        let message = session.store().get(id).expect("stored");
        assert_eq!(message.text, "");
        let image = message.image.as_ref().expect("image moved into message");
        assert_eq!(
            session.picker().info(image).map(|info| (info.width, info.height)),
            Some((3, 2))
        );
        assert_eq!(session.composer().pending_image(), None);
    }

    #[test]
    fn nothing_picked_leaves_the_draft_alone() {
        let start = Instant::now();
        let mut session = session(start);
        session.set_text("draft");
        assert!(!session.attach_from_path(None));
        assert_eq!(session.composer().text(), "draft");
        assert_eq!(session.composer().pending_image(), None);
    }

    #[test]
    fn picking_twice_releases_the_first_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "receipt.png", 1, 1);
        let mut session = session(Instant::now());
        assert!(session.attach_from_path(Some(&path)));
        assert!(session.attach_from_path(Some(&path)));
        assert_eq!(session.picker().live_images(), 1);

        session.clear_image();
        assert_eq!(session.picker().live_images(), 0);
    }

    #[test]
    fn rapid_sends_get_one_reply_each() {
        let start = Instant::now();
        let mut session = session(start);
        session.set_text("a");
        let a = session.submit(start).expect("a");
        session.set_text("b");
        let b = session.submit(start + Duration::from_millis(100)).expect("b");
        assert_eq!((a.get(), b.get()), (2, 4));

        assert_eq!(session.on_tick(start + Duration::from_secs(1)), 2);
        let ids: Vec<u64> = session.store().list().iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 4, 3, 5]);
        let replies: Vec<u64> = session
            .store()
            .list()
            .iter()
            .filter(|m| m.is_bot() && m.id != SEED_MESSAGE_ID)
            .map(|m| m.id.get())
            .collect();
        assert_eq!(replies, vec![a.next().get(), b.next().get()]);
    }

    #[test]
    fn dispose_cancels_pending_replies_and_releases_images() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "receipt.png", 1, 1);
        let start = Instant::now();
        let mut session = session(start);
        session.set_text("hi");
        session.attach_from_path(Some(&path));
        session.submit(start);
        session.attach_from_path(Some(&path));
        assert_eq!(session.picker().live_images(), 2);

        session.dispose();
        assert_eq!(session.scheduler().pending(), 0);
        assert_eq!(session.picker().live_images(), 0);
        assert_eq!(session.on_tick(start + DELAY * 2), 0);
        assert_eq!(session.store().len(), 2);
        assert!(!session.is_open());
        session.dispose();
    }

    #[test]
    fn close_keeps_history_and_reopen_scrolls_to_end() {
        let start = Instant::now();
        let mut session = session(start);
        session.set_text("hi");
        session.submit(start);
        session.close();
        assert_eq!(session.on_tick(start + DELAY), 1);
        assert_eq!(session.store().len(), 3);

        session.open();
        assert_eq!(session.modal().scroll_from_bottom(), 0);
        assert_eq!(session.store().len(), 3);
    }

    #[test]
    fn keys_drive_the_modal() {
        let start = Instant::now();
        let mut session = session(start);
        type_text(&mut session, "hello", start);
        assert_eq!(session.composer().text(), "hello");
        assert_eq!(
            session.handle_key(key(KeyCode::Enter), start),
            ModalOutcome::Redraw
        );
        assert_eq!(session.store().len(), 2);
        assert_eq!(
            session.handle_key(key(KeyCode::Esc), start),
            ModalOutcome::CloseRequested
        );
        session.close();
        assert_eq!(
            session.handle_key(key(KeyCode::Char('x')), start),
            ModalOutcome::None
        );
        assert_eq!(session.composer().text(), "");
    }

    #[test]
    fn attach_prompt_picks_typed_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "receipt.png", 2, 2);
        let start = Instant::now();
        let mut session = session(start);

        session.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL), start);
        assert!(session.picker().is_prompting());
        session.handle_paste(&path.display().to_string());
        assert_eq!(session.handle_key(key(KeyCode::Enter), start), ModalOutcome::Redraw);
        assert!(session.composer().pending_image().is_some());
        assert!(session.is_open());

        // Esc inside the prompt only cancels the prompt.
        session.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL), start);
        assert_eq!(session.handle_key(key(KeyCode::Esc), start), ModalOutcome::Redraw);
        assert!(!session.picker().is_prompting());
        assert!(session.is_open());
    }

    #[test]
    fn pasting_an_image_path_attaches_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "receipt.png", 2, 2);
        let mut session = session(Instant::now());

        session.handle_paste(&format!("file://{}", path.display()));
        assert!(session.composer().pending_image().is_some());
        assert_eq!(session.composer().text(), "");

        session.handle_paste("not a path at all");
        assert_eq!(session.composer().text(), "not a path at all");
    }
}
