//! Turn-based countdown timers.
//!
//! Every duration and cooldown in the crate is a [`Countdown`]: ability
//! cooldowns, status durations, control durations, per-action cooldowns,
//! feedback events and countermeasures. Records that own a countdown
//! implement [`Timed`] and are aged by the single [`tick_and_prune`] helper,
//! so expiry is handled the same way everywhere.
//!
//! A countdown never increases except through an explicit [`Countdown::restart`].

use serde::{Deserialize, Serialize};

/// A counter that decreases by one per turn and stops at zero.
///
/// ```
/// use psionic_core::core::Countdown;
///
/// let mut timer = Countdown::new(2);
/// assert!(!timer.tick());
/// assert!(timer.tick()); // reached zero on this tick
/// assert!(timer.is_elapsed());
/// assert!(!timer.tick()); // already elapsed
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    total: u32,
}

impl Countdown {
    /// Start a countdown of `turns`.
    #[must_use]
    pub const fn new(turns: u32) -> Self {
        Self {
            remaining: turns,
            total: turns,
        }
    }

    /// An already elapsed countdown (a ready cooldown).
    #[must_use]
    pub const fn elapsed() -> Self {
        Self::new(0)
    }

    /// Turns left.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Length the countdown was last started with.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// True once the countdown has reached zero.
    #[must_use]
    pub const fn is_elapsed(&self) -> bool {
        self.remaining == 0
    }

    /// Advance one turn. Returns true only on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Start over with a new length.
    pub fn restart(&mut self, turns: u32) {
        self.remaining = turns;
        self.total = turns;
    }

    /// Force the countdown to zero.
    pub fn clear(&mut self) {
        self.remaining = 0;
    }
}

/// A record whose lifetime is bounded by a countdown.
pub trait Timed {
    /// The countdown that bounds this record.
    fn timer(&self) -> &Countdown;

    /// Mutable access for ticking.
    fn timer_mut(&mut self) -> &mut Countdown;
}

/// Tick every record once and remove the ones whose countdown is at zero.
///
/// Records created with a zero duration (instantaneous effects) are removed
/// on their first tick. Returns the removed records in their original order.
pub fn tick_and_prune<T: Timed>(records: &mut Vec<T>) -> Vec<T> {
    let mut expired = Vec::new();
    let mut kept = Vec::with_capacity(records.len());
    for mut record in records.drain(..) {
        record.timer_mut().tick();
        if record.timer().is_elapsed() {
            expired.push(record);
        } else {
            kept.push(record);
        }
    }
    *records = kept;
    expired
}
