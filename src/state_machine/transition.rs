//! Pure state transition function

use super::{ChatContext, ChatState, Effect, Event};
use crate::message::MessageId;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Rejected events. None of these are failures of the conversation; the
/// runtime drops the event and leaves the state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Message is blank")]
    BlankMessage,
    #[error("Bot is still replying, cannot accept a new message")]
    Busy,
    #[error("Reply for turn {turn} is no longer pending")]
    StaleReply { turn: MessageId },
}

/// Pure transition function
///
/// Given the same inputs this always produces the same outputs. Random draws
/// (delay length, reply template) happen in the executor when it runs the
/// effects.
pub fn transition(
    state: &ChatState,
    context: &ChatContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User turns
        // ============================================================
        (_, Event::UserSubmit { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::BlankMessage)
        }

        // Idle + UserSubmit -> BotThinking
        (ChatState::Idle, Event::UserSubmit { message_id, text }) => {
            let emotion = context.tagger.tag(&text);
            Ok(TransitionResult::new(ChatState::BotThinking {
                turn: message_id,
                text: text.clone(),
            })
            .with_effect(Effect::AppendUserMessage { text, emotion })
            .with_effect(Effect::composing(true))
            .with_effect(Effect::ScheduleReply { turn: message_id }))
        }

        // Only one reply may be in flight
        (ChatState::BotThinking { .. }, Event::UserSubmit { .. }) => Err(TransitionError::Busy),

        // ============================================================
        // Reply delivery
        // ============================================================

        // BotThinking + ReplyDue for the pending turn -> Idle
        (ChatState::BotThinking { turn, text }, Event::ReplyDue { turn: due }) if *turn == due => {
            let intent = context.classifier.classify(text);
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::AppendBotReply { intent })
                .with_effect(Effect::composing(false)))
        }

        (_, Event::ReplyDue { turn }) => Err(TransitionError::StaleReply { turn }),

        // ============================================================
        // Teardown
        // ============================================================
        (ChatState::BotThinking { turn, .. }, Event::Teardown) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::CancelReply { turn: *turn })
                .with_effect(Effect::composing(false)))
        }

        (ChatState::Idle, Event::Teardown) => Ok(TransitionResult::new(ChatState::Idle)),
    }
}
