//! Clock abstraction for staged transitions
//!
//! The engine never schedules ambient timers. It records deadlines against
//! a [`GameClock`] and the front-end drives [`tick`](super::GameEngine::tick);
//! tests substitute a [`ManualClock`] to walk through the resolution stages
//! deterministically.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Monotonic time source the engine schedules deadlines against
pub trait GameClock: Send + Sync {
    /// Time elapsed since the clock was created
    fn elapsed(&self) -> Duration;
}

/// Wall-clock implementation backed by [`Instant`]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Create a clock starting at zero
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Hand-driven clock for deterministic tests
pub struct ManualClock {
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    /// Create a clock frozen at zero
    pub fn new() -> Self {
        ManualClock {
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock for ManualClock {
    fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}
