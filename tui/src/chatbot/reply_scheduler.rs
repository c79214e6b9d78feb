//! Delayed scripted replies.
//!
//! Every user message arms its own one-shot timer; arming never cancels a timer that is
//! already pending, so rapid sends produce one reply each. Timers are plain deadlines that
//! the owner drains from its frame loop. A wake-up that arrives after [`cancel_all`] finds
//! nothing registered and does nothing.
//!
//! [`cancel_all`]: ReplyScheduler::cancel_all

use std::collections::BTreeSet;
use std::time::Duration;
use std::time::Instant;

use olla_protocol::chat::DEFAULT_REPLY_DELAY;
use olla_protocol::chat::MessageId;
use olla_protocol::chat::SCRIPTED_REPLY;

use crate::chatbot::message::MessageDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Pending,
}

/// A timer that has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReply {
    pub trigger: MessageId,
    pub due_at: Instant,
}

impl ScheduledReply {
    pub fn reply_id(&self) -> MessageId {
        self.trigger.next()
    }

    /// The bot message this timer produces, stamped with the time it is delivered.
    pub fn into_message(self, now: Instant) -> MessageDraft {
        MessageDraft::bot(SCRIPTED_REPLY, now).with_id(self.reply_id())
    }
}

#[derive(Debug)]
pub struct ReplyScheduler {
    delay: Duration,
    /// Keyed by (due, trigger) so draining yields due order, ties broken by trigger id.
    timers: BTreeSet<(Instant, MessageId)>,
}

impl Default for ReplyScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl ReplyScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timers: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.timers.is_empty() {
            SchedulerState::Idle
        } else {
            SchedulerState::Pending
        }
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Arm a timer for `trigger`, due `delay` after `now`. Returns the due instant.
    pub fn schedule(&mut self, trigger: MessageId, now: Instant) -> Instant {
        let due_at = now + self.delay;
        self.timers.insert((due_at, trigger));
        tracing::debug!(%trigger, pending = self.pending(), "reply scheduled");
        due_at
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.first().map(|(due_at, _)| *due_at)
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<ScheduledReply> {
        let mut fired = Vec::new();
        while let Some(&(due_at, trigger)) = self.timers.first() {
            if due_at > now {
                break;
            }
            self.timers.pop_first();
            fired.push(ScheduledReply { trigger, due_at });
        }
        fired
    }

    /// Drop every outstanding timer. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending();
        self.timers.clear();
        if cancelled > 0 {
            tracing::debug!(cancelled, "pending replies cancelled");
        }
        cancelled
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
