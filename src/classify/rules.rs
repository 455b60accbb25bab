//! Ordered keyword rule tables

use crate::config::ConfigError;
use std::fmt::Debug;

/// One row of a rule table: a label and the keywords that select it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule<L> {
    pub label: L,
    pub keywords: Vec<String>,
}

impl<L> KeywordRule<L> {
    pub fn new<I, S>(label: L, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// True when any keyword occurs in the already lower-cased text
    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw.as_str()))
    }
}

/// Ordered rule table with a fallback label.
///
/// Rules are evaluated top to bottom against the lower-cased input and the
/// first rule with a keyword contained in the text wins. Matching is plain
/// substring containment, so `"hi"` also matches inside `"this"`.
#[derive(Debug, Clone)]
pub struct KeywordRules<L> {
    rules: Vec<KeywordRule<L>>,
    fallback: L,
}

impl<L: Copy + Debug> KeywordRules<L> {
    /// Build a table, rejecting any rule without a usable keyword.
    ///
    /// Keywords are trimmed and lower-cased once here; blank keywords are
    /// dropped since they would match every input.
    pub fn new(rules: Vec<KeywordRule<L>>, fallback: L) -> Result<Self, ConfigError> {
        let mut normalized = Vec::with_capacity(rules.len());
        for rule in rules {
            let keywords: Vec<String> = rule
                .keywords
                .iter()
                .map(|kw| kw.trim().to_lowercase())
                .filter(|kw| !kw.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(ConfigError::EmptyKeywordSet(format!("{:?}", rule.label)));
            }
            normalized.push(KeywordRule {
                label: rule.label,
                keywords,
            });
        }
        Ok(Self {
            rules: normalized,
            fallback,
        })
    }

    /// Classify text; total, falls back when nothing matches
    pub fn first_match(&self, text: &str) -> L {
        let normalized = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map_or(self.fallback, |rule| rule.label)
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[KeywordRule<L>] {
        &self.rules
    }

    pub fn fallback(&self) -> L {
        self.fallback
    }
}
