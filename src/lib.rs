//! MindWell - rule-based supportive chat
//!
//! Tags user messages with an emotion, picks a canned reply family by
//! keyword intent, and delivers the reply after a simulated thinking delay.
//! One [`Conversation`] models one chat thread.

pub mod classify;
pub mod config;
pub mod message;
pub mod quick_reply;
pub mod responses;
pub mod runtime;
pub mod state_machine;

pub use classify::{EmotionLabel, EmotionTagger, IntentCategory, IntentClassifier};
pub use config::{ChatConfig, ConfigError, DelayRange};
pub use message::{Message, MessageId, Sender};
pub use responses::ResponseBank;
pub use runtime::{ChatEvent, Conversation, ProductionConversation, Snapshot};
pub use state_machine::{ChatContext, ChatState};
