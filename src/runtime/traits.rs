//! Trait abstractions for time and randomness
//!
//! These traits enable testing the executor with a steppable clock and
//! scripted draws.

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Source of timestamps and delays
pub trait Clock: Send + Sync {
    /// Current instant, used to stamp messages
    fn now(&self) -> DateTime<Utc>;

    /// Future that resolves once `delay` has elapsed.
    ///
    /// The delay starts when this is called, not when the future is first
    /// polled.
    fn sleep(&self, delay: Duration) -> BoxFuture<'static, ()>;
}

/// Source of uniform random numbers
pub trait RandomSource: Send + Sync {
    /// Uniform sample in `[0, 1)`
    fn unit(&self) -> f64;

    /// Uniform index in `0..len`; `len` must be non-zero
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn pick(&self, len: usize) -> usize {
        let index = (self.unit() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn sleep(&self, delay: Duration) -> BoxFuture<'static, ()> {
        (**self).sleep(delay)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Arc<T> {
    fn unit(&self) -> f64 {
        (**self).unit()
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Wall clock backed by chrono and the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, delay: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(delay).boxed()
    }
}

/// Thread-safe wrapper around `StdRng`
#[derive(Debug)]
pub struct StdRandom {
    rng: Mutex<StdRng>,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn unit(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen::<f64>()
    }
}
