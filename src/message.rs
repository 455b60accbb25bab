//! Chat messages and the append-only history

use crate::classify::EmotionLabel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Monotonic message identifier, starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub const FIRST: MessageId = MessageId(1);

    pub fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> MessageId {
        MessageId(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// Message record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Only set on user messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionLabel>,
}

/// Append-only message log.
///
/// Ids are strictly increasing and timestamps never go backwards, even if the
/// clock does.
#[derive(Debug, Default)]
pub(crate) struct History {
    messages: Vec<Message>,
}

impl History {
    /// Id the next appended message will receive
    pub fn next_id(&self) -> MessageId {
        self.messages.last().map_or(MessageId::FIRST, |m| m.id.next())
    }

    pub fn append(
        &mut self,
        sender: Sender,
        text: String,
        emotion: Option<EmotionLabel>,
        now: DateTime<Utc>,
    ) -> Message {
        let timestamp = match self.messages.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        let message = Message {
            id: self.next_id(),
            text,
            sender,
            timestamp,
            emotion,
        };
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
