//! Time abstraction for deterministic animation.
//!
//! Engines in this crate never read a clock. Every operation that can move
//! time forward takes an explicit instant, so the same code runs against
//! `std::time::Instant` in the terminal and against a virtual clock in
//! simulation.

use std::{
    fmt::Debug,
    ops::{Add, Sub},
    time::Duration,
};

/// A monotonic point in time.
///
/// Blanket-implemented for any type with instant semantics. Production code
/// uses `std::time::Instant`; simulations may use virtual time.
///
/// # Invariants
///
/// - Callers MUST pass non-decreasing instants to a single engine. Engines
///   treat an earlier instant as "nothing is due yet", never as a rewind.
pub trait Timestamp:
    Copy + Ord + Debug + Send + Sync + Add<Duration, Output = Self> + Sub<Output = Duration> + 'static
{
}

impl<T> Timestamp for T where
    T: Copy
        + Ord
        + Debug
        + Send
        + Sync
        + Add<Duration, Output = T>
        + Sub<Output = Duration>
        + 'static
{
}

/// A single scheduled-callback slot.
///
/// Holds at most one pending deadline. Arming replaces the previous deadline,
/// cancelling clears it. A fired deadline is consumed, so it can never fire
/// twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSlot<I> {
    deadline: Option<I>,
}

impl<I: Timestamp> TimerSlot<I> {
    /// An unarmed slot.
    pub const fn idle() -> Self {
        Self { deadline: None }
    }

    /// Schedule the slot to fire at `at`, replacing any pending deadline.
    pub fn arm(&mut self, at: I) {
        self.deadline = Some(at);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Pending deadline. `None` if idle.
    pub fn deadline(&self) -> Option<I> {
        self.deadline
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it is due at `now`.
    ///
    /// Returns the deadline instant (not `now`) so callers can chain further
    /// deadlines without accumulating polling jitter.
    pub fn fire_if_due(&mut self, now: I) -> Option<I> {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                Some(at)
            },
            _ => None,
        }
    }
}

impl<I: Timestamp> Default for TimerSlot<I> {
    fn default() -> Self {
        Self::idle()
    }
}

/// `base * n`, saturating instead of overflowing.
pub(crate) fn scaled(base: Duration, n: usize) -> Duration {
    base.saturating_mul(u32::try_from(n).unwrap_or(u32::MAX))
}
