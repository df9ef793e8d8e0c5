//! The shared running maximum and progress reporting.
//!
//! The running maximum is the only mutable state shared between search workers.
//! `2δ` lives in an `AtomicU32` so most candidates are rejected with a single
//! load; the rare candidate that may improve takes the witness lock, re-checks,
//! and publishes. Progress events are emitted under that lock, so the stream a
//! sink observes is strictly increasing even with many workers.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::four_point::{Delta, Quadruple};

/// One strict improvement of the running maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Improvement {
    /// Zero-based round.
    pub round: usize,
    /// Zero-based iteration within the round.
    pub iteration: usize,
    /// Witnessing quadruple.
    pub quadruple: Quadruple,
    /// New maximum.
    pub delta: Delta,
}

/// Receiver for progress events.
pub trait ProgressSink: Sync {
    fn on_improvement(&self, improvement: &Improvement);
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_improvement(&self, _improvement: &Improvement) {}
}

/// Records every event in memory.
#[derive(Debug, Default)]
pub struct CollectProgress {
    events: Mutex<Vec<Improvement>>,
}

impl CollectProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far, in emission order.
    pub fn events(&self) -> Vec<Improvement> {
        lock(&self.events).clone()
    }
}

impl ProgressSink for CollectProgress {
    fn on_improvement(&self, improvement: &Improvement) {
        lock(&self.events).push(*improvement);
    }
}

/// Adapts a closure into a sink.
pub struct FnProgress<F>(pub F);

impl<F> ProgressSink for FnProgress<F>
where
    F: Fn(&Improvement) + Sync,
{
    fn on_improvement(&self, improvement: &Improvement) {
        (self.0)(improvement)
    }
}

/// Best delta seen so far plus its witness. Never decreases.
#[derive(Debug, Default)]
pub struct RunningMaximum {
    best_twice: AtomicU32,
    witness: Mutex<Option<Improvement>>,
}

impl RunningMaximum {
    /// Starts at δ = 0 with no witness; only strict improvements are recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current maximum.
    pub fn value(&self) -> Delta {
        Delta::from_twice(self.best_twice.load(Ordering::Acquire))
    }

    /// The improvement that produced the current maximum, if any.
    pub fn witness(&self) -> Option<Improvement> {
        *lock(&self.witness)
    }

    /// Whether `delta` would strictly raise the maximum right now.
    #[inline]
    pub fn would_improve(&self, delta: Delta) -> bool {
        delta.twice() > self.best_twice.load(Ordering::Acquire)
    }

    /// Offer a candidate. Returns `true` and notifies `sink` on strict improvement.
    pub fn offer(&self, candidate: Improvement, sink: &dyn ProgressSink) -> bool {
        if !self.would_improve(candidate.delta) {
            return false;
        }
        let mut witness = lock(&self.witness);
        // Re-check under the lock: another worker may have published meanwhile.
        if !self.would_improve(candidate.delta) {
            return false;
        }
        *witness = Some(candidate);
        self.best_twice
            .fetch_max(candidate.delta.twice(), Ordering::AcqRel);
        sink.on_improvement(&candidate);
        true
    }
}

// A panicking sink must not wedge the search; the guarded data stays consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
