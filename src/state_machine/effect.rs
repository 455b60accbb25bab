//! Effects produced by state transitions

use crate::classify::{EmotionLabel, IntentCategory};
use crate::message::MessageId;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append the user's message to the history
    AppendUserMessage { text: String, emotion: EmotionLabel },

    /// Start the thinking delay for `turn` (the executor draws the duration)
    ScheduleReply { turn: MessageId },

    /// Draw a template for `intent` and append it as a bot message
    AppendBotReply { intent: IntentCategory },

    /// Cancel the pending delivery for `turn`
    CancelReply { turn: MessageId },

    /// Tell observers the composing flag changed
    NotifyComposing { composing: bool },
}

impl Effect {
    pub fn composing(composing: bool) -> Self {
        Effect::NotifyComposing { composing }
    }
}
