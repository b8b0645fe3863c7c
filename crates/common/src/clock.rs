//! Frame clock utilities.
//!
//! View animations are advanced by explicit time deltas. Every delta is
//! computed from a monotonic millisecond reading taken from a [`FrameClock`],
//! read once per frame by the session. This module provides:
//! - The clock trait consumed by the view core
//! - A real monotonic clock anchored at session start
//! - A manually driven clock for tests and script replay

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Source of monotonic milliseconds.
pub trait FrameClock {
    /// Milliseconds since some fixed, clock-specific epoch. Never decreases.
    fn now_ms(&self) -> u64;
}

/// A monotonic clock anchored to the moment a view session started.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl MonotonicClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

impl FrameClock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            ms: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Jump to an absolute reading. Earlier readings are ignored so the
    /// clock stays monotonic.
    pub fn set(&self, ms: u64) {
        self.ms.fetch_max(ms, Ordering::SeqCst);
    }

    /// Move the clock forward.
    pub fn advance(&self, delta_ms: u64) {
        self.ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms.load(Ordering::SeqCst)
    }
}

impl<C: FrameClock + ?Sized> FrameClock for Box<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_starts_near_zero() {
        let clock = MonotonicClock::start();
        assert!(clock.now_ms() < 1_000);
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(100);
        let handle = clock.clone();
        handle.advance(16);
        assert_eq!(clock.now_ms(), 116);
    }

    #[test]
    fn test_manual_clock_never_goes_backwards() {
        let clock = ManualClock::new(500);
        clock.set(200);
        assert_eq!(clock.now_ms(), 500);
        clock.set(750);
        assert_eq!(clock.now_ms(), 750);
    }

    #[test]
    fn test_boxed_clock_delegates() {
        let manual = ManualClock::new(42);
        let boxed: Box<dyn FrameClock> = Box::new(manual.clone());
        manual.advance(8);
        assert_eq!(boxed.now_ms(), 50);
    }
}
