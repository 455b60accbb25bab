//! Runtime for executing conversations
//!
//! Applies state machine effects against an injectable clock and random
//! source, and streams changes to observers.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::Conversation;
pub use traits::*;

use crate::message::Message;
use serde::Serialize;

/// Type alias for production conversations with concrete implementations
pub type ProductionConversation = Conversation<SystemClock, StdRandom>;

/// Events sent to observers of a conversation
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    MessageAppended { message: Message },
    ComposingChanged { composing: bool },
}

/// Read-only view for rendering
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot {
    /// Messages in append order (which is also timestamp order)
    pub messages: Vec<Message>,
    /// True while a bot reply is pending
    pub composing: bool,
}

impl Snapshot {
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
