//! Mock implementations for testing
//!
//! A steppable clock and scripted random draws so conversations can be
//! driven deterministically.

use super::traits::{Clock, RandomSource};
use super::{ChatEvent, Conversation};
use crate::classify::{EmotionTagger, IntentClassifier};
use crate::config::DelayRange;
use crate::responses::ResponseBank;
use crate::state_machine::ChatContext;
use chrono::{DateTime, TimeZone, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, oneshot};

// ============================================================================
// Manual Clock
// ============================================================================

struct PendingTimer {
    deadline: Duration,
    delay: Duration,
    tx: oneshot::Sender<()>,
}

struct ManualClockInner {
    elapsed: Duration,
    timers: Vec<PendingTimer>,
}

/// Clock that only moves when told to
pub struct ManualClock {
    start: DateTime<Utc>,
    inner: Mutex<ManualClockInner>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            inner: Mutex::new(ManualClockInner {
                elapsed: Duration::ZERO,
                timers: Vec::new(),
            }),
        }
    }

    /// Move time forward, firing every timer whose deadline has passed.
    /// Returns how many timers were delivered to a live sleeper.
    pub fn advance(&self, by: Duration) -> usize {
        let mut inner = self.inner.lock().unwrap();
        inner.elapsed += by;
        let now = inner.elapsed;

        let (due, waiting): (Vec<_>, Vec<_>) =
            inner.timers.drain(..).partition(|t| t.deadline <= now);
        inner.timers = waiting;

        due.into_iter().filter_map(|t| t.tx.send(()).ok()).count()
    }

    /// Delays of timers that are armed and still awaited
    pub fn pending_delays(&self) -> Vec<Duration> {
        let inner = self.inner.lock().unwrap();
        inner
            .timers
            .iter()
            .filter(|t| !t.tx.is_closed())
            .map(|t| t.delay)
            .collect()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = self.inner.lock().unwrap().elapsed;
        self.start + chrono::Duration::from_std(elapsed).unwrap()
    }

    fn sleep(&self, delay: Duration) -> BoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.inner.lock().unwrap();
        let deadline = inner.elapsed + delay;
        inner.timers.push(PendingTimer { deadline, delay, tx });
        async move {
            // A dropped timer never fires
            if rx.await.is_err() {
                std::future::pending::<()>().await;
            }
        }
        .boxed()
    }
}

// ============================================================================
// Scripted Random
// ============================================================================

/// Random source that replays queued samples, then returns 0.0
pub struct ScriptedRandom {
    samples: Mutex<VecDeque<f64>>,
}

impl ScriptedRandom {
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            samples: Mutex::new(samples.into_iter().collect()),
        }
    }

    pub fn push(&self, sample: f64) {
        self.samples.lock().unwrap().push_back(sample);
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&self) -> f64 {
        self.samples.lock().unwrap().pop_front().unwrap_or(0.0)
    }
}

// ============================================================================
// Test Conversation
// ============================================================================

pub type MockConversation = Conversation<Arc<ManualClock>, Arc<ScriptedRandom>>;

/// Conversation wired to a manual clock and scripted random source
pub struct TestConversation {
    pub conversation: MockConversation,
    pub clock: Arc<ManualClock>,
    pub random: Arc<ScriptedRandom>,
    pub events: broadcast::Receiver<ChatEvent>,
}

impl TestConversation {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> TestConversationBuilder {
        TestConversationBuilder::new()
    }

    /// Wait until a reply lands and composing clears
    pub async fn wait_for_idle(&mut self, timeout: Duration) -> bool {
        let events = &mut self.events;
        tokio::time::timeout(timeout, async {
            loop {
                match events.recv().await {
                    Ok(ChatEvent::ComposingChanged { composing: false }) => return true,
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => return false,
                }
            }
        })
        .await
        .unwrap_or(false)
    }
}

pub struct TestConversationBuilder {
    conv_id: String,
    greeting: Option<String>,
    delay: DelayRange,
    draws: Vec<f64>,
}

impl TestConversationBuilder {
    pub fn new() -> Self {
        Self {
            conv_id: "test-conv".to_string(),
            greeting: None,
            delay: DelayRange::default(),
            draws: Vec::new(),
        }
    }

    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    pub fn delay(mut self, delay: DelayRange) -> Self {
        self.delay = delay;
        self
    }

    /// Queue samples for the random source (delay draw, then template draw)
    pub fn draws(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.draws.extend(draws);
        self
    }

    pub fn build(self) -> TestConversation {
        let mut context = ChatContext::new(
            self.conv_id,
            EmotionTagger::standard().unwrap(),
            IntentClassifier::standard().unwrap(),
            ResponseBank::standard().unwrap(),
            self.delay,
        );
        if let Some(greeting) = self.greeting {
            context = context.with_greeting(greeting);
        }

        let clock = Arc::new(ManualClock::new());
        let random = Arc::new(ScriptedRandom::new(self.draws));
        let conversation = Conversation::new(context, clock.clone(), random.clone());
        let events = conversation.subscribe();

        TestConversation {
            conversation,
            clock,
            random,
            events,
        }
    }
}

impl Default for TestConversationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manual_clock_fires_in_deadline_order() {
        let clock = ManualClock::new();
        let short = clock.sleep(Duration::from_millis(100));
        let long = clock.sleep(Duration::from_millis(300));
        assert_eq!(
            clock.pending_delays(),
            vec![Duration::from_millis(100), Duration::from_millis(300)]
        );

        assert_eq!(clock.advance(Duration::from_millis(150)), 1);
        short.await;
        assert_eq!(clock.pending_delays(), vec![Duration::from_millis(300)]);

        assert_eq!(clock.advance(Duration::from_millis(150)), 1);
        long.await;
        assert!(clock.pending_delays().is_empty());
    }

    #[tokio::test]
    async fn test_manual_clock_skips_dropped_sleepers() {
        let clock = ManualClock::new();
        let sleep = clock.sleep(Duration::from_millis(10));
        drop(sleep);
        assert!(clock.pending_delays().is_empty());
        assert_eq!(clock.advance(Duration::from_secs(1)), 0);
    }

    #[test]
    fn test_manual_clock_now_tracks_elapsed() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance(Duration::from_secs(90));
        assert_eq!((clock.now() - start).num_seconds(), 90);
    }

    #[test]
    fn test_scripted_random_replays_then_defaults() {
        let random = ScriptedRandom::new([0.25]);
        random.push(0.75);
        assert!((random.unit() - 0.25).abs() < f64::EPSILON);
        assert!((random.unit() - 0.75).abs() < f64::EPSILON);
        assert!(random.unit().abs() < f64::EPSILON);
    }
}
