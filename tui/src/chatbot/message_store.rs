use std::time::Instant;

use olla_protocol::chat::MessageId;
use olla_protocol::chat::SEED_GREETING;
use olla_protocol::chat::SEED_MESSAGE_ID;

use crate::chatbot::message::Message;
use crate::chatbot::message::MessageDraft;

/// Append-only conversation log.
///
/// Created with the bot greeting as message 1. Ids handed out by [`MessageStore::append`]
/// are one past the highest id seen so far, where "seen" includes ids reserved for scripted
/// replies that have not arrived yet. That keeps every reply at `trigger + 1` without ever
/// colliding with a user message sent while the reply is pending.
#[derive(Debug)]
pub struct MessageStore {
    messages: Vec<Message>,
    high_water: MessageId,
}

impl MessageStore {
    pub fn new(now: Instant) -> Self {
        let seed = MessageDraft::bot(SEED_GREETING, now).into_message(SEED_MESSAGE_ID);
        Self {
            messages: vec![seed],
            high_water: SEED_MESSAGE_ID,
        }
    }

    /// Id the next draft without an explicit id will receive.
    pub fn next_id(&self) -> MessageId {
        self.high_water.next()
    }

    /// Keep `trigger + 1` free for the scripted reply to `trigger`.
    pub fn reserve_reply_id(&mut self, trigger: MessageId) -> MessageId {
        let reply_id = trigger.next();
        if self.contains(reply_id) {
            tracing::warn!("reply id {reply_id} for {trigger} is already taken");
        } else {
            self.high_water = self.high_water.max(reply_id);
        }
        reply_id
    }

    /// Insert at the end and return the id the message was stored under.
    ///
    /// A draft may carry its own id (the scripted reply does). If that id is already in use
    /// the message gets the next free id instead, so ids stay unique.
    pub fn append(&mut self, draft: MessageDraft) -> MessageId {
        let id = match draft.id {
            Some(id) if !self.contains(id) => id,
            Some(id) => {
                tracing::warn!("message id {id} already in use; assigning a fresh id");
                self.next_id()
            }
            None => self.next_id(),
        };
        self.high_water = self.high_water.max(id);
        self.messages.push(draft.into_message(id));
        tracing::debug!(%id, total = self.len(), "message appended");
        id
    }

    pub fn list(&self) -> &[Message] {
        &self.messages
    }

    /// Everything except the seed greeting, which is rendered statically.
    pub fn filter_for_display(&self) -> impl Iterator<Item = &Message> {
        self.list()
            .iter()
            .filter(|message| message.id != SEED_MESSAGE_ID)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    fn contains(&self, id: MessageId) -> bool {
        self.get(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use olla_protocol::chat::Speaker;
    use pretty_assertions::assert_eq;

    fn user(text: &str, now: Instant) -> MessageDraft {
        MessageDraft {
            id: None,
            text: text.to_string(),
            speaker: Speaker::User,
            timestamp: now,
            image: None,
        }
    }

    fn ids(store: &MessageStore) -> Vec<u64> {
        store.list().iter().map(|message| message.id.get()).collect()
    }

    #[test]
    fn new_store_holds_only_the_seed() {
        let store = MessageStore::new(Instant::now());
        assert_eq!(store.len(), 1);
        let seed = &store.list()[0];
        assert_eq!(seed.id, SEED_MESSAGE_ID);
        assert!(seed.is_bot());
        assert_eq!(seed.text, SEED_GREETING);
        assert_eq!(store.filter_for_display().count(), 0);
    }

    #[test]
    fn append_assigns_increasing_ids_in_order() {
        let now = Instant::now();
        let mut store = MessageStore::new(now);
        assert_eq!(store.append(user("a", now)).get(), 2);
        assert_eq!(store.append(user("b", now)).get(), 3);
        assert_eq!(ids(&store), vec![1, 2, 3]);
        let texts: Vec<&str> = store
            .filter_for_display()
            .map(|message| message.text.as_str())
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn explicit_ids_are_honoured() {
        let now = Instant::now();
        let mut store = MessageStore::new(now);
        let trigger = store.append(user("hi", now));
        let reply_id = store.reserve_reply_id(trigger);
        assert_eq!(
            store.append(MessageDraft::bot("reply", now).with_id(reply_id)),
            MessageId::new(3)
        );
    }

    #[test]
    fn reserved_reply_ids_are_skipped_by_user_messages() {
        let now = Instant::now();
        let mut store = MessageStore::new(now);
        let a = store.append(user("a", now));
        store.reserve_reply_id(a);
        let b = store.append(user("b", now));
        store.reserve_reply_id(b);
        assert_eq!((a.get(), b.get()), (2, 4));

        store.append(MessageDraft::bot("r", now).with_id(a.next()));
        store.append(MessageDraft::bot("r", now).with_id(b.next()));
        assert_eq!(ids(&store), vec![1, 2, 4, 3, 5]);
        assert_eq!(store.append(user("c", now)).get(), 6);
    }

    #[test]
    fn duplicate_explicit_id_gets_a_fresh_one() {
        let now = Instant::now();
        let mut store = MessageStore::new(now);
        let id = store.append(MessageDraft::bot("again", now).with_id(SEED_MESSAGE_ID));
        assert_eq!(id.get(), 2);
        assert_eq!(ids(&store), vec![1, 2]);
    }

    #[test]
    fn text_is_stored_verbatim() {
        let now = Instant::now();
        let mut store = MessageStore::new(now);
        let id = store.append(user("  spaced  ", now));
        assert_eq!(
            store.get(id).map(|message| message.text.as_str()),
            Some("  spaced  ")
        );
    }
}
