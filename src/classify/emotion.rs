//! Emotion tagging for user messages

use super::rules::{KeywordRule, KeywordRules};
use crate::config::ConfigError;
use serde::Serialize;
use std::fmt;

/// Emotion shown next to a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLabel {
    Positive,
    Sad,
    Anxious,
    Angry,
    Stressed,
    Neutral,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 6] = [
        EmotionLabel::Positive,
        EmotionLabel::Sad,
        EmotionLabel::Anxious,
        EmotionLabel::Angry,
        EmotionLabel::Stressed,
        EmotionLabel::Neutral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionLabel::Positive => "positive",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Anxious => "anxious",
            EmotionLabel::Angry => "angry",
            EmotionLabel::Stressed => "stressed",
            EmotionLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default table, highest priority first
const EMOTION_TABLE: &[(EmotionLabel, &[&str])] = &[
    (EmotionLabel::Positive, &["happy", "good", "great", "wonderful"]),
    (EmotionLabel::Sad, &["sad", "depressed", "down", "hopeless"]),
    (EmotionLabel::Anxious, &["anxious", "worried", "nervous", "panic"]),
    (EmotionLabel::Angry, &["angry", "frustrated", "mad", "upset"]),
    (EmotionLabel::Stressed, &["stressed", "overwhelmed", "pressure"]),
];

/// Tags text with a single emotion label
#[derive(Debug, Clone)]
pub struct EmotionTagger {
    rules: KeywordRules<EmotionLabel>,
}

impl EmotionTagger {
    pub fn new(rules: KeywordRules<EmotionLabel>) -> Self {
        Self { rules }
    }

    /// Tagger with the built-in keyword table
    pub fn standard() -> Result<Self, ConfigError> {
        let rules = EMOTION_TABLE
            .iter()
            .map(|(label, keywords)| KeywordRule::new(*label, keywords.iter().copied()))
            .collect();
        Ok(Self::new(KeywordRules::new(rules, EmotionLabel::Neutral)?))
    }

    pub fn tag(&self, text: &str) -> EmotionLabel {
        self.rules.first_match(text)
    }

    pub fn rules(&self) -> &KeywordRules<EmotionLabel> {
        &self.rules
    }
}
