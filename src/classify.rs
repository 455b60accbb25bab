//! Keyword classifiers
//!
//! Two independent first-match-wins classifiers share one ordered rule table
//! type. The emotion tagger only annotates user messages; the intent
//! classifier picks the response family.

mod emotion;
mod intent;
pub mod rules;

pub use emotion::{EmotionLabel, EmotionTagger};
pub use intent::{IntentCategory, IntentClassifier};
pub use rules::{KeywordRule, KeywordRules};
