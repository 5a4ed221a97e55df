//! Encounter statistics for observability and balancing.

use serde::{Deserialize, Serialize};

/// Monotonic counters collected while an encounter runs.
///
/// Only encounter operations update these; callers get a read-only view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterStats {
    attempts: u64,
    successes: u64,
    failures: u64,
    control_breaks: u64,
    control_expirations: u64,
    feedback_events: u64,
    countermeasures_used: u64,
}

impl EncounterStats {
    /// Create zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ability attempts, whatever their outcome.
    #[must_use]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Attempts that passed the success roll.
    #[must_use]
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Attempts that were rejected or resisted.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Controls ended by an explicit break.
    #[must_use]
    pub fn control_breaks(&self) -> u64 {
        self.control_breaks
    }

    /// Controls that ran out their duration.
    #[must_use]
    pub fn control_expirations(&self) -> u64 {
        self.control_expirations
    }

    /// Feedback events generated.
    #[must_use]
    pub fn feedback_events(&self) -> u64 {
        self.feedback_events
    }

    /// Countermeasures activated.
    #[must_use]
    pub fn countermeasures_used(&self) -> u64 {
        self.countermeasures_used
    }

    /// Fraction of attempts that succeeded.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successes as f64 / self.attempts as f64
        }
    }

    pub(crate) fn record_attempt(&mut self, success: bool) {
        self.attempts += 1;
        if success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
    }

    pub(crate) fn record_break(&mut self) {
        self.control_breaks += 1;
    }

    pub(crate) fn record_expirations(&mut self, count: usize) {
        self.control_expirations += count as u64;
    }

    pub(crate) fn record_feedback(&mut self, count: usize) {
        self.feedback_events += count as u64;
    }

    pub(crate) fn record_countermeasure(&mut self) {
        self.countermeasures_used += 1;
    }
}
