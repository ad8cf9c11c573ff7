//! Monotonic clock abstraction for timer-driven behavior.
//!
//! Every deferred action in the crate (auto-return timers, dot ticks, playback
//! countdowns, fade ramps) is expressed as a deadline on a monotonic timeline.
//! Components never read the clock themselves; the dispatcher samples its
//! [`Clock`] once per command or tick and passes the `Instant` down. Wall-clock
//! time (`chrono`) only appears in persisted records, never in scheduling, so
//! a system clock change cannot fire or starve a timer.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic "now" values.
pub trait Clock {
    /// Returns the current instant on this clock's timeline.
    fn now(&self) -> Instant;
}

/// Clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic scenario tests.
///
/// Cloning shares the underlying timeline, so a test can hold one handle while
/// a dispatcher owns another.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sleepbunny::runtime::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(500));
/// assert_eq!(clock.now() - start, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock frozen at an arbitrary starting instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.elapsed.set(self.elapsed.get() + step);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed.get()
    }
}
