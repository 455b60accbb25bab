//! Canned reply templates per intent

use crate::classify::IntentCategory;
use crate::config::ConfigError;
use crate::runtime::RandomSource;
use std::collections::BTreeMap;

const GREETING: &[&str] = &[
    "Hello! I'm glad you're here. How can I support you today?",
    "Hi there! It's wonderful to connect with you. What's on your mind?",
    "Welcome! I'm here to listen and help. How are you feeling right now?",
];

const ANXIETY: &[&str] = &[
    "I understand you're feeling anxious. Let's try some deep breathing together. Breathe in for 4 counts, hold for 4, and out for 4. You're safe right now.",
    "Anxiety can feel overwhelming, but remember - you've gotten through difficult moments before. What usually helps you feel more grounded?",
    "I hear that you're struggling with anxiety. Would you like to try a quick mindfulness exercise, or would you prefer to talk about what's triggering these feelings?",
];

const DEPRESSION: &[&str] = &[
    "I'm really glad you're reaching out. Depression can make everything feel heavy, but taking this step to connect shows incredible strength.",
    "Thank you for sharing that with me. Depression affects many people, and you're not alone in this. What's one small thing that brought you even a tiny bit of comfort recently?",
    "I want you to know that your feelings are valid, and it's okay to not be okay. Have you been able to maintain any of your daily routines?",
];

const STRESS: &[&str] = &[
    "Stress can be really challenging to manage. Let's break this down together - what's the biggest source of stress for you right now?",
    "I understand you're feeling stressed. Sometimes it helps to focus on what we can control. What's one small action you could take today to care for yourself?",
    "Stress affects us all differently. Would you like to explore some stress-management techniques, or would you prefer to talk about what's causing the stress?",
];

const POSITIVE: &[&str] = &[
    "That's wonderful to hear! I'm so glad you're feeling good. What's contributing to these positive feelings?",
    "It's beautiful when we can recognize and appreciate the good moments. Thank you for sharing that brightness with me!",
    "I love hearing when things are going well for you! Celebrating these moments is so important for our mental health.",
];

const COPING: &[&str] = &[
    "It sounds like you're looking for ways to cope. Some people find journaling, exercise, or creative activities helpful. What resonates with you?",
    "Coping strategies are very personal. Have you discovered anything in the past that's helped you through difficult times?",
    "Building a toolkit of coping strategies takes time. Would you like to explore some evidence-based techniques together?",
];

const SUPPORT: &[&str] = &[
    "Remember, seeking help is a sign of strength, not weakness. Have you considered speaking with a mental health professional?",
    "You don't have to go through this alone. In addition to our chats, connecting with friends, family, or a therapist can provide additional support.",
    "I'm here for you, and there are many other resources available too. Would you like information about professional support options?",
];

const GENERAL: &[&str] = &[
    "I'm here to listen. Can you tell me more about what you're experiencing?",
    "Thank you for sharing that with me. Your feelings and experiences matter. What would be most helpful for you right now?",
    "I appreciate you opening up. Sometimes just having someone listen can make a difference. How long have you been feeling this way?",
];

/// Fixed reply templates for every intent category.
///
/// Every category is guaranteed a non-empty list once constructed, so
/// [`ResponseBank::draw`] cannot fail.
#[derive(Debug, Clone)]
pub struct ResponseBank {
    templates: BTreeMap<IntentCategory, Vec<String>>,
}

impl ResponseBank {
    pub fn new(templates: BTreeMap<IntentCategory, Vec<String>>) -> Result<Self, ConfigError> {
        for category in IntentCategory::ALL {
            match templates.get(&category) {
                None => return Err(ConfigError::MissingCategory(category)),
                Some(list) if list.is_empty() => return Err(ConfigError::EmptyTemplates(category)),
                Some(_) => {}
            }
        }
        Ok(Self { templates })
    }

    /// Bank with the built-in templates
    pub fn standard() -> Result<Self, ConfigError> {
        let templates = IntentCategory::ALL
            .iter()
            .map(|&category| {
                let list = default_templates(category)
                    .iter()
                    .map(|t| (*t).to_string())
                    .collect();
                (category, list)
            })
            .collect();
        Self::new(templates)
    }

    /// Templates for a category, in configured order
    pub fn templates(&self, category: IntentCategory) -> &[String] {
        self.templates
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Uniform draw with replacement; repeats are allowed
    pub fn draw<R: RandomSource + ?Sized>(&self, category: IntentCategory, random: &R) -> &str {
        let list = self.templates(category);
        let index = random.pick(list.len());
        list.get(index)
            .or_else(|| list.first())
            .map_or("", String::as_str)
    }
}

fn default_templates(category: IntentCategory) -> &'static [&'static str] {
    match category {
        IntentCategory::Greeting => GREETING,
        IntentCategory::Anxiety => ANXIETY,
        IntentCategory::Depression => DEPRESSION,
        IntentCategory::Stress => STRESS,
        IntentCategory::Positive => POSITIVE,
        IntentCategory::Coping => COPING,
        IntentCategory::Support => SUPPORT,
        IntentCategory::General => GENERAL,
    }
}
