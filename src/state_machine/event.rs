//! Events that can occur in a conversation

use crate::message::MessageId;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// User submitted text; `message_id` is the id it will be stored under
    UserSubmit { message_id: MessageId, text: String },

    /// The thinking delay for `turn` elapsed
    ReplyDue { turn: MessageId },

    /// The owning session is going away
    Teardown,
}
