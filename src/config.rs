//! Chat configuration
//!
//! Defaults: a 1-3 second thinking delay and a welcome message from the
//! bot. Everything can be overridden from the
//! environment.

use crate::classify::IntentCategory;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MIN_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 3000;

pub const DEFAULT_GREETING: &str = "Hello! I'm MindWell, your personal mental health companion. \
How are you feeling today? I'm here to listen and support you.";

/// Construction-time configuration defects
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No reply templates configured for intent '{0}'")]
    EmptyTemplates(IntentCategory),
    #[error("Intent '{0}' is missing from the response bank")]
    MissingCategory(IntentCategory),
    #[error("Keyword rule '{0}' has no keywords")]
    EmptyKeywordSet(String),
    #[error("Invalid delay range: min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Bounded interval the thinking delay is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidDelayRange {
                min_ms: duration_ms(min),
                max_ms: duration_ms(max),
            });
        }
        Ok(Self { min, max })
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Result<Self, ConfigError> {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Map a unit sample in `[0, 1)` onto the range
    pub fn sample(&self, unit: f64) -> Duration {
        let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
        let span = self.max - self.min;
        let delay = self.min + span.mul_f64(unit);
        delay.min(self.max)
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(DEFAULT_MIN_DELAY_MS),
            max: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Runtime configuration for a chat session
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub delay: DelayRange,
    /// Bot message appended when the conversation opens
    pub greeting: Option<String>,
    /// Seed for reply and delay draws; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            delay: DelayRange::default(),
            greeting: Some(DEFAULT_GREETING.to_string()),
            seed: None,
        }
    }
}

impl ChatConfig {
    /// Load from `MINDWELL_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_ms = parse_var(&lookup, "MINDWELL_MIN_DELAY_MS")?.unwrap_or(DEFAULT_MIN_DELAY_MS);
        let max_ms = parse_var(&lookup, "MINDWELL_MAX_DELAY_MS")?.unwrap_or(DEFAULT_MAX_DELAY_MS);
        let seed = parse_var(&lookup, "MINDWELL_SEED")?;

        let greeting = match lookup("MINDWELL_NO_GREETING").as_deref().map(str::trim) {
            None | Some("" | "0" | "false") => Some(DEFAULT_GREETING.to_string()),
            Some("1" | "true") => None,
            Some(other) => {
                return Err(ConfigError::InvalidEnv {
                    var: "MINDWELL_NO_GREETING",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            delay: DelayRange::from_millis(min_ms, max_ms)?,
            greeting,
            seed,
        })
    }
}

fn parse_var<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
    }
}
