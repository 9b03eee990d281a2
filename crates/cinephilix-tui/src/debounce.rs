//! Debounce timer for free-text search input.

use std::time::{Duration, Instant};

/// Default debounce window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Shortest accepted debounce window.
pub const MIN_DEBOUNCE: Duration = Duration::from_millis(300);

/// Longest accepted debounce window.
pub const MAX_DEBOUNCE: Duration = Duration::from_millis(500);

/// Coalesces bursts of edits into one trigger after the input settles.
///
/// Time is passed in by the caller so the timer stays deterministic.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Creates a debouncer. The window is clamped to 300-500 ms.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.clamp(MIN_DEBOUNCE, MAX_DEBOUNCE),
            deadline: None,
        }
    }

    /// Effective window after clamping.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Records an edit at `now`, pushing the deadline out by one window.
    pub fn push(&mut self, now: Instant) {
        self.deadline = Some(now.checked_add(self.window).unwrap_or(now));
    }

    /// Drops any pending trigger.
    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Pending deadline, if an edit is waiting to settle.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
