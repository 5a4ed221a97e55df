//! The status-effect boundary with the unit layer.
//!
//! Ability handlers never touch unit stats directly. They call a
//! [`StatusSink`], which the outer simulation implements (or reads back from
//! [`StatusBook`], the sink shipped with the crate).

use rustc_hash::FxHashMap;

use super::effect::{StatusEffect, StatusKind};
use crate::core::{tick_and_prune, UnitId};

/// Where ability handlers send statuses and damage.
pub trait StatusSink {
    /// Apply a status for `duration` turns.
    fn add_status_effect(&mut self, unit: UnitId, kind: StatusKind, duration: u32, magnitude: i64);

    /// Deal damage to a unit.
    fn take_damage(&mut self, unit: UnitId, amount: u32);
}

/// Status bookkeeping for every unit, decayed once per turn.
///
/// Damage is only accumulated here; applying it to hit points is the unit
/// layer's job.
#[derive(Clone, Debug, Default)]
pub struct StatusBook {
    statuses: FxHashMap<UnitId, Vec<StatusEffect>>,
    damage_taken: FxHashMap<UnitId, u64>,
}

impl StatusBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active statuses on a unit.
    #[must_use]
    pub fn statuses(&self, unit: UnitId) -> &[StatusEffect] {
        self.statuses.get(&unit).map(Vec::as_slice).unwrap_or_default()
    }

    /// Does the unit carry a status of this kind?
    #[must_use]
    pub fn has_status(&self, unit: UnitId, kind: StatusKind) -> bool {
        self.statuses(unit).iter().any(|s| s.kind == kind)
    }

    /// First status of a kind on a unit.
    #[must_use]
    pub fn status(&self, unit: UnitId, kind: StatusKind) -> Option<&StatusEffect> {
        self.statuses(unit).iter().find(|s| s.kind == kind)
    }

    /// Total psychic damage dealt to a unit so far.
    #[must_use]
    pub fn damage_taken(&self, unit: UnitId) -> u64 {
        self.damage_taken.get(&unit).copied().unwrap_or(0)
    }

    /// Remove every status of a kind from a unit.
    pub fn clear_status(&mut self, unit: UnitId, kind: StatusKind) {
        if let Some(list) = self.statuses.get_mut(&unit) {
            list.retain(|s| s.kind != kind);
        }
    }

    /// Decay every status by one turn and drop the elapsed ones.
    ///
    /// Returns how many statuses expired.
    pub fn tick(&mut self) -> usize {
        let mut expired = 0;
        for list in self.statuses.values_mut() {
            expired += tick_and_prune(list).len();
        }
        self.statuses.retain(|_, list| !list.is_empty());
        expired
    }

    /// Forget a unit.
    pub fn remove_unit(&mut self, unit: UnitId) {
        self.statuses.remove(&unit);
        self.damage_taken.remove(&unit);
    }
}

impl StatusSink for StatusBook {
    fn add_status_effect(&mut self, unit: UnitId, kind: StatusKind, duration: u32, magnitude: i64) {
        self.statuses
            .entry(unit)
            .or_default()
            .push(StatusEffect::new(kind, duration, magnitude));
    }

    fn take_damage(&mut self, unit: UnitId, amount: u32) {
        *self.damage_taken.entry(unit).or_insert(0) += u64::from(amount);
    }
}
