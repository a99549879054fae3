//! Blocking window: global admission control for user actions.
//!
//! Only one action may be in flight at a time. [`BlockingWindow::block`] waits
//! for any earlier window to close, opens a new one, and returns a
//! [`BlockGuard`]; the window closes when the guard is dropped, on every exit
//! path. Waiters are admitted in arrival order: the gate is a fair queue, so a
//! later action never overtakes one that is already waiting.
//!
//! # Progress indicator
//!
//! The window also decides whether a progress indicator should be on screen,
//! from two thresholds measured from the moment the window opened:
//!
//! ```text
//! open ──── lower ──────────── upper ────▶ time
//!  hidden   │ visible while open │
//!           │ and, once shown,   │
//!           │ held until upper   │
//! ```
//!
//! - While open and younger than `lower`: hidden.
//! - While open and at least `lower` old: visible.
//! - Closed before reaching `lower`: never shown.
//! - Closed after reaching `lower`: stays visible until `upper` has passed
//!   since the window opened, so a short flash never happens.
//!
//! The thresholds affect only the indicator. They never cancel or time out
//! the action itself.

use super::clock::Clock;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};

/// Default lower threshold in milliseconds.
pub const DEFAULT_LOWER_LIMIT_MS: u64 = 350;

/// Default upper threshold in milliseconds.
pub const DEFAULT_UPPER_LIMIT_MS: u64 = 1000;

/// Indicator thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLimits {
    pub lower: Duration,
    pub upper: Duration,
}

impl Default for TimeLimits {
    fn default() -> Self {
        Self {
            lower: Duration::from_millis(DEFAULT_LOWER_LIMIT_MS),
            upper: Duration::from_millis(DEFAULT_UPPER_LIMIT_MS),
        }
    }
}

/// Whether the progress indicator should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Hidden,
    Visible,
}

/// Lifetime counters, used to check that every window closes exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    pub opened: u64,
    pub closed: u64,
}

#[derive(Debug, Default)]
struct WindowState {
    open_since: Option<Instant>,
    last_window: Option<(Instant, Instant)>,
    stats: WindowStats,
}

/// Serializes actions and tracks the progress indicator.
pub struct BlockingWindow {
    limits: TimeLimits,
    clock: Arc<dyn Clock>,
    gate: AsyncMutex<()>,
    state: Mutex<WindowState>,
}

impl BlockingWindow {
    #[must_use]
    pub fn new(limits: TimeLimits, clock: Arc<dyn Clock>) -> Self {
        Self {
            limits,
            clock,
            gate: AsyncMutex::new(()),
            state: Mutex::new(WindowState::default()),
        }
    }

    /// Waits for the previous window to close, then opens a new one.
    pub async fn block(&self) -> BlockGuard<'_> {
        let permit = self.gate.lock().await;

        let mut state = self.state.lock();
        state.open_since = Some(self.clock.now());
        state.stats.opened += 1;
        tracing::trace!(opened = state.stats.opened, "blocking window opened");
        drop(state);

        BlockGuard {
            window: self,
            _permit: permit,
        }
    }

    fn release(&self) {
        let now = self.clock.now();
        let mut state = self.state.lock();
        if let Some(start) = state.open_since.take() {
            state.last_window = Some((start, now));
            state.stats.closed += 1;
            tracing::trace!(
                held_ms = u64::try_from(now.saturating_duration_since(start).as_millis()).unwrap_or(u64::MAX),
                "blocking window closed"
            );
        }
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.state.lock().open_since.is_some()
    }

    #[must_use]
    pub fn limits(&self) -> TimeLimits {
        self.limits
    }

    #[must_use]
    pub fn stats(&self) -> WindowStats {
        self.state.lock().stats
    }

    /// Indicator state at the clock's current instant.
    #[must_use]
    pub fn indicator(&self) -> Indicator {
        let now = self.clock.now();
        let state = self.state.lock();

        if let Some(start) = state.open_since {
            return if now.saturating_duration_since(start) >= self.limits.lower {
                Indicator::Visible
            } else {
                Indicator::Hidden
            };
        }

        match state.last_window {
            Some((start, end))
                if end.saturating_duration_since(start) >= self.limits.lower
                    && now.saturating_duration_since(start) < self.limits.upper =>
            {
                Indicator::Visible
            }
            _ => Indicator::Hidden,
        }
    }
}

impl std::fmt::Debug for BlockingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingWindow")
            .field("limits", &self.limits)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

/// An open blocking window. Closes on drop.
pub struct BlockGuard<'a> {
    window: &'a BlockingWindow,
    _permit: AsyncMutexGuard<'a, ()>,
}

impl Drop for BlockGuard<'_> {
    fn drop(&mut self) {
        // Record the close before the permit field drops and admits the next waiter.
        self.window.release();
    }
}

impl std::fmt::Debug for BlockGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockGuard").finish_non_exhaustive()
    }
}
