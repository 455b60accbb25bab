//! Intent classification for choosing a reply family

use super::rules::{KeywordRule, KeywordRules};
use crate::config::ConfigError;
use serde::Serialize;
use std::fmt;

/// Reply family selected for a user turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Greeting,
    Anxiety,
    Depression,
    Stress,
    Positive,
    Coping,
    Support,
    General,
}

impl IntentCategory {
    pub const ALL: [IntentCategory; 8] = [
        IntentCategory::Greeting,
        IntentCategory::Anxiety,
        IntentCategory::Depression,
        IntentCategory::Stress,
        IntentCategory::Positive,
        IntentCategory::Coping,
        IntentCategory::Support,
        IntentCategory::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IntentCategory::Greeting => "greeting",
            IntentCategory::Anxiety => "anxiety",
            IntentCategory::Depression => "depression",
            IntentCategory::Stress => "stress",
            IntentCategory::Positive => "positive",
            IntentCategory::Coping => "coping",
            IntentCategory::Support => "support",
            IntentCategory::General => "general",
        }
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default table. Greeting comes first, so "hello, I feel anxious" is a
/// greeting even though the emotion tagger calls it anxious.
const INTENT_TABLE: &[(IntentCategory, &[&str])] = &[
    (IntentCategory::Greeting, &["hello", "hi", "hey"]),
    (IntentCategory::Anxiety, &["anxious", "anxiety", "worried", "panic"]),
    (IntentCategory::Depression, &["depressed", "depression", "sad", "hopeless"]),
    (IntentCategory::Stress, &["stress", "stressed", "overwhelmed"]),
    (IntentCategory::Positive, &["happy", "good", "great", "wonderful"]),
    (IntentCategory::Coping, &["help", "cope", "coping"]),
    (IntentCategory::Support, &["support", "alone", "lonely"]),
];

/// Maps text to the intent whose replies should be drawn
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: KeywordRules<IntentCategory>,
}

impl IntentClassifier {
    pub fn new(rules: KeywordRules<IntentCategory>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Result<Self, ConfigError> {
        let rules = INTENT_TABLE
            .iter()
            .map(|(category, keywords)| KeywordRule::new(*category, keywords.iter().copied()))
            .collect();
        Ok(Self::new(KeywordRules::new(rules, IntentCategory::General)?))
    }

    pub fn classify(&self, text: &str) -> IntentCategory {
        self.rules.first_match(text)
    }

    pub fn rules(&self) -> &KeywordRules<IntentCategory> {
        &self.rules
    }
}
