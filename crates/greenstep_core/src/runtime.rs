//! Latency and entropy providers for simulated backend calls.
//!
//! # Responsibility
//! - Abstract the delay primitive and random source used by the catalog
//!   service so both branches (success/failure) and zero-latency runs are
//!   deterministic in tests.
//!
//! # Invariants
//! - `Entropy::next_unit` always returns a value in `[0.0, 1.0)`.
//! - `Clock::sleep` leaves no timer running after it resolves.

use async_trait::async_trait;
use rand::Rng;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::Mutex;
use std::time::Duration;

/// Delay primitive used to simulate network latency.
#[async_trait]
pub trait Clock: Send + Sync + Debug {
    async fn sleep(&self, duration: Duration);
}

/// Uniform random source in `[0.0, 1.0)`.
pub trait Entropy: Send + Sync + Debug {
    fn next_unit(&self) -> f64;
}

/// Real timer backed by `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Zero-latency clock that records every requested delay.
#[derive(Debug, Default)]
pub struct InstantClock {
    requested: Mutex<Vec<Duration>>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in call order.
    pub fn requested(&self) -> Vec<Duration> {
        match self.requested.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        match self.requested.lock() {
            Ok(mut guard) => guard.push(duration),
            Err(poisoned) => poisoned.into_inner().push(duration),
        }
        tokio::task::yield_now().await;
    }
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadEntropy;

impl Entropy for ThreadEntropy {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Replays a fixed sequence of samples.
///
/// Once the script is exhausted the last sample repeats; an empty script
/// yields `0.5`. Out-of-range samples are clamped into `[0.0, 1.0)`.
#[derive(Debug)]
pub struct ScriptedEntropy {
    state: Mutex<ScriptState>,
}

#[derive(Debug)]
struct ScriptState {
    pending: VecDeque<f64>,
    last: f64,
}

const DEFAULT_SAMPLE: f64 = 0.5;

impl ScriptedEntropy {
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            state: Mutex::new(ScriptState {
                pending: samples.into_iter().map(clamp_unit).collect(),
                last: DEFAULT_SAMPLE,
            }),
        }
    }

    /// Always yields the same sample.
    pub fn constant(sample: f64) -> Self {
        Self::new([sample])
    }
}

impl Entropy for ScriptedEntropy {
    fn next_unit(&self) -> f64 {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(sample) = state.pending.pop_front() {
            state.last = sample;
        }
        state.last
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else if value >= 1.0 {
        1.0 - f64::EPSILON
    } else {
        value
    }
}
