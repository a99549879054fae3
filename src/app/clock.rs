//! Host clock abstraction.
//!
//! The board reads time in two ways: a monotonic [`Instant`] for blocking-window
//! thresholds, and a wall-clock instant as the reference point for filters.
//! Hosts normally use [`SystemClock`]; [`ManualClock`] advances only when told
//! to, for deterministic replays and tests.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Monotonic now.
    fn now(&self) -> Instant;

    /// Wall-clock now.
    fn wall_now(&self) -> DateTime<Utc>;
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when [`advance`](Self::advance) is called.
///
/// Both readings move together: advancing by one second moves the monotonic
/// and the wall reading by one second.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    wall_origin: DateTime<Utc>,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new(wall_origin: DateTime<Utc>) -> Self {
        Self {
            origin: Instant::now(),
            wall_origin,
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }

    fn wall_now(&self) -> DateTime<Utc> {
        TimeDelta::from_std(*self.elapsed.lock())
            .ok()
            .and_then(|elapsed| self.wall_origin.checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
