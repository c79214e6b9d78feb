use std::time::Instant;

use olla_protocol::chat::MessageId;
use olla_protocol::chat::Speaker;

use crate::chatbot::attachment::ImageRef;

/// One entry of the conversation. Immutable once it is in the store.
#[derive(Debug, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    /// Exactly as typed; never trimmed.
    pub text: String,
    pub speaker: Speaker,
    pub timestamp: Instant,
    pub image: Option<ImageRef>,
}

impl Message {
    pub fn is_bot(&self) -> bool {
        self.speaker.is_bot()
    }
}

/// A message that has not been stored yet. `id: None` lets the store pick the next id.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageDraft {
    pub id: Option<MessageId>,
    pub text: String,
    pub speaker: Speaker,
    pub timestamp: Instant,
    pub image: Option<ImageRef>,
}

impl MessageDraft {
    pub fn bot(text: impl Into<String>, timestamp: Instant) -> Self {
        Self {
            id: None,
            text: text.into(),
            speaker: Speaker::Bot,
            timestamp,
            image: None,
        }
    }

    pub fn with_id(mut self, id: MessageId) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn into_message(self, id: MessageId) -> Message {
        Message {
            id,
            text: self.text,
            speaker: self.speaker,
            timestamp: self.timestamp,
            image: self.image,
        }
    }
}
