//! Monotonic time source abstraction.
//!
//! The timer does its elapsed-time accounting against a monotonic clock,
//! never wall-clock time, so it stays correct across system clock
//! adjustments. This module provides the trait seam that lets tests drive
//! the timer with a manually advanced clock instead of waiting for real
//! time to pass.

use std::time::Instant;

#[cfg(any(test, feature = "testing-support"))]
use std::{sync::Mutex, time::Duration};

/// Trait for abstracting monotonic time reads.
///
/// The timer holds its source as `Arc<dyn TimeSource>`, injected per
/// construction: production code passes [`MonotonicSource`], tests pass a
/// [`ManualSource`] they advance by hand.
pub trait TimeSource: Send + Sync {
    /// Get the current monotonic instant.
    fn now(&self) -> Instant;
}

/// Production time source backed by `Instant::now()`.
pub struct MonotonicSource;

impl TimeSource for MonotonicSource {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced time source for tests.
///
/// Reports a fixed origin instant plus an offset that only moves when
/// [`advance`](ManualSource::advance) is called, so tests can simulate
/// arbitrary elapsed time between polls without sleeping.
#[cfg(any(test, feature = "testing-support"))]
pub struct ManualSource {
    origin: Instant,
    offset: Mutex<Duration>,
}

#[cfg(any(test, feature = "testing-support"))]
impl ManualSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Advance the clock by `delta`. Takes `&self` so a shared
    /// `Arc<ManualSource>` handle can drive a timer that owns a clone.
    pub fn advance(&self, delta: Duration) {
        *self.offset.lock().unwrap() += delta;
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl Default for ManualSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for ManualSource {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_source_starts_at_origin() {
        let source = ManualSource::new();
        assert_eq!(source.now(), source.origin);
    }

    #[test]
    fn manual_source_advances_accumulate() {
        let source = ManualSource::new();
        source.advance(Duration::from_secs(10));
        source.advance(Duration::from_secs(5));
        assert_eq!(source.now() - source.origin, Duration::from_secs(15));
    }

    #[test]
    fn monotonic_source_does_not_go_backwards() {
        let source = MonotonicSource;
        let a = source.now();
        let b = source.now();
        assert!(b >= a);
    }
}
