//! The pending draft: text typed so far plus at most one image.

use std::time::Instant;

use crossterm::event::KeyEvent;
use olla_protocol::chat::MessageId;
use olla_protocol::chat::Speaker;

use crate::chatbot::attachment::ImageRef;
use crate::chatbot::message::MessageDraft;
use crate::text_input::TextInput;

#[derive(Debug, Default)]
pub struct Composer {
    input: TextInput,
    pending_image: Option<ImageRef>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    #[cfg(test)]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.set_text(text);
    }

    /// Paste into the single-line draft; line breaks become spaces.
    pub fn paste(&mut self, pasted: &str) {
        let flattened = pasted.replace("\r\n", " ").replace(['\n', '\r'], " ");
        self.input.insert_str(&flattened);
    }

    pub fn handle_key(&mut self, key_event: KeyEvent) -> bool {
        self.input.handle_key(key_event)
    }

    /// Replace the pending image. The superseded handle is returned for release.
    #[must_use]
    pub fn attach_image(&mut self, image: ImageRef) -> Option<ImageRef> {
        self.pending_image.replace(image)
    }

    #[must_use]
    pub fn clear_image(&mut self) -> Option<ImageRef> {
        self.pending_image.take()
    }

    pub fn pending_image(&self) -> Option<&ImageRef> {
        self.pending_image.as_ref()
    }

    /// Non-blank text or an image. Whitespace-only text alone never submits.
    pub fn can_submit(&self) -> bool {
        !self.text().trim().is_empty() || self.pending_image.is_some()
    }

    /// The draft as a user message. The pending image moves into it.
    pub fn build_message(&mut self, next_id: MessageId, now: Instant) -> MessageDraft {
        MessageDraft {
            id: Some(next_id),
            text: self.text().to_string(),
            speaker: Speaker::User,
            timestamp: now,
            image: self.pending_image.take(),
        }
    }

    /// Clear text and image. Returns an image that was still pending, if any.
    #[must_use]
    pub fn reset(&mut self) -> Option<ImageRef> {
        self.input.clear();
        self.pending_image.take()
    }

    /// `build_message` followed by `reset`, or `None` when there is nothing to send.
    pub fn submit(&mut self, next_id: MessageId, now: Instant) -> Option<MessageDraft> {
        if !self.can_submit() {
            return None;
        }
        let draft = self.build_message(next_id, now);
        // build_message already moved the image out.
        self.input.clear();
        Some(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::attachment::AttachmentPicker;
    use crate::chatbot::attachment::test_support::write_png;
    use pretty_assertions::assert_eq;

    #[test]
    fn whitespace_only_text_cannot_submit() {
        let mut composer = Composer::new();
        for text in ["", " ", "\t", "  \n "] {
            composer.set_text(text);
            assert!(!composer.can_submit(), "{text:?} should not submit");
            assert_eq!(composer.submit(MessageId::new(2), Instant::now()), None);
            assert_eq!(composer.text(), text);
        }
    }

    #[test]
    fn submit_keeps_text_untrimmed_and_resets() {
        let mut composer = Composer::new();
        composer.set_text("  hi  ");
        let now = Instant::now();
        let draft = composer.submit(MessageId::new(2), now).expect("submittable");
        assert_eq!(draft.text, "  hi  ");
        assert_eq!(draft.id, Some(MessageId::new(2)));
        assert_eq!(draft.speaker, Speaker::User);
        assert_eq!(draft.timestamp, now);
        assert_eq!(composer.text(), "");
        assert!(!composer.can_submit());
    }

    #[test]
    fn image_alone_is_submittable_and_moves_into_the_message() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "receipt.png", 2, 2);
        let mut picker = AttachmentPicker::new();
        let mut composer = Composer::new();

        let image = picker.pick(Some(&path)).expect("picked");
        let image_id = image.id();
        assert_eq!(composer.attach_image(image), None);
        assert!(composer.can_submit());

        let draft = composer
            .submit(MessageId::new(2), Instant::now())
            .expect("image-only message");
        assert_eq!(draft.text, "");
        assert_eq!(draft.image.as_ref().map(ImageRef::id), Some(image_id));
        assert_eq!(composer.pending_image(), None);
    }

    #[test]
    fn attaching_again_returns_the_superseded_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "receipt.png", 2, 2);
        let mut picker = AttachmentPicker::new();
        let mut composer = Composer::new();

        let first = picker.pick(Some(&path)).expect("first");
        let first_id = first.id();
        let second = picker.pick(Some(&path)).expect("second");
        assert_eq!(composer.attach_image(first), None);
        let superseded = composer.attach_image(second).expect("first is returned");
        assert_eq!(superseded.id(), first_id);
        picker.release(superseded);
        assert_eq!(picker.live_images(), 1);
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut composer = Composer::new();
        composer.paste("line one\r\nline two\nthree");
        assert_eq!(composer.text(), "line one line two three");
    }
}
