//! Conversation state types

use crate::classify::{EmotionTagger, IntentClassifier};
use crate::config::{ChatConfig, ConfigError, DelayRange};
use crate::message::MessageId;
use crate::responses::ResponseBank;
use serde::Serialize;

/// Turn state of a conversation
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatState {
    /// Ready for user input, no reply pending
    #[default]
    Idle,

    /// A reply is scheduled for the user message `turn`
    BotThinking {
        /// Id of the user message being answered
        turn: MessageId,
        /// The submitted text, classified once the delay elapses
        text: String,
    },
}

impl ChatState {
    /// Whether the bot is composing a reply
    pub fn is_composing(&self) -> bool {
        matches!(self, ChatState::BotThinking { .. })
    }

    pub fn pending_turn(&self) -> Option<MessageId> {
        match self {
            ChatState::Idle => None,
            ChatState::BotThinking { turn, .. } => Some(*turn),
        }
    }
}

/// Context for a conversation (immutable configuration)
#[derive(Debug, Clone)]
pub struct ChatContext {
    pub conversation_id: String,
    pub tagger: EmotionTagger,
    pub classifier: IntentClassifier,
    pub bank: ResponseBank,
    pub delay: DelayRange,
    /// Welcome message appended when the conversation opens
    pub greeting: Option<String>,
}

impl ChatContext {
    pub fn new(
        conversation_id: impl Into<String>,
        tagger: EmotionTagger,
        classifier: IntentClassifier,
        bank: ResponseBank,
        delay: DelayRange,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            tagger,
            classifier,
            bank,
            delay,
            greeting: None,
        }
    }

    /// Build the standard keyword tables and templates for `config`
    pub fn from_config(config: &ChatConfig) -> Result<Self, ConfigError> {
        let mut context = Self::new(
            uuid::Uuid::new_v4().to_string(),
            EmotionTagger::standard()?,
            IntentClassifier::standard()?,
            ResponseBank::standard()?,
            config.delay,
        );
        context.greeting.clone_from(&config.greeting);
        Ok(context)
    }

    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }
}
