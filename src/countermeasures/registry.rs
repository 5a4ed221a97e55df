//! Countermeasure registry.
//!
//! A countermeasure is a time-bounded defence raised by the unit layer (a
//! psi-dampening field, a focus stance). While one is active on a unit, no
//! new control attempt against that unit can succeed.

use serde::{Deserialize, Serialize};

use crate::core::{tick_and_prune, Countdown, CountermeasureId, PsiError, PsiResult, Timed, UnitId};

/// A defensive state protecting one unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countermeasure {
    /// Unique id, chosen by whoever raises the countermeasure.
    pub id: CountermeasureId,

    /// Unit being protected.
    pub owner: UnitId,

    /// Turns left.
    pub timer: Countdown,

    /// Set when the registry accepts the countermeasure.
    pub active: bool,

    /// Also breaks a control already running on the owner.
    pub dispel: bool,

    /// Turn it was activated.
    pub started_at: u32,
}

impl Countermeasure {
    /// A blocking countermeasure lasting `duration` turns.
    #[must_use]
    pub fn new(id: CountermeasureId, owner: UnitId, duration: u32) -> Self {
        Self {
            id,
            owner,
            timer: Countdown::new(duration),
            active: false,
            dispel: false,
            started_at: 0,
        }
    }

    /// Also break any control already held over the owner (builder pattern).
    #[must_use]
    pub fn dispelling(mut self) -> Self {
        self.dispel = true;
        self
    }

    /// Turns left.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.timer.remaining()
    }
}

impl Timed for Countermeasure {
    fn timer(&self) -> &Countdown {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Countdown {
        &mut self.timer
    }
}

/// Active countermeasures of every unit.
#[derive(Clone, Debug, Default)]
pub struct CountermeasureRegistry {
    entries: Vec<Countermeasure>,
}

impl CountermeasureRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a countermeasure.
    ///
    /// Refuses duplicate ids and zero durations.
    pub fn add(&mut self, mut countermeasure: Countermeasure, turn: u32) -> PsiResult<&Countermeasure> {
        if self.entries.iter().any(|c| c.id == countermeasure.id) {
            return Err(PsiError::DuplicateCountermeasure(countermeasure.id));
        }
        if countermeasure.timer.is_elapsed() {
            return Err(PsiError::InvalidDuration);
        }
        countermeasure.active = true;
        countermeasure.started_at = turn;
        self.entries.push(countermeasure);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Is any active countermeasure protecting this unit?
    #[must_use]
    pub fn has_active(&self, unit: UnitId) -> bool {
        self.entries.iter().any(|c| c.owner == unit && c.active)
    }

    /// Look up a countermeasure.
    #[must_use]
    pub fn get(&self, id: CountermeasureId) -> Option<&Countermeasure> {
        self.entries.iter().find(|c| c.id == id)
    }

    /// Number of active countermeasures.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|c| c.active).count()
    }

    /// Decay every countermeasure and drop the expired ones.
    pub fn tick(&mut self) -> Vec<Countermeasure> {
        let mut expired = tick_and_prune(&mut self.entries);
        for countermeasure in &mut expired {
            countermeasure.active = false;
        }
        expired
    }

    /// Drop every countermeasure owned by a unit.
    pub fn remove_unit(&mut self, unit: UnitId) {
        self.entries.retain(|c| c.owner != unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: UnitId = UnitId(3);

    #[test]
    fn test_add_activates() {
        let mut registry = CountermeasureRegistry::new();
        let added = registry
            .add(Countermeasure::new(CountermeasureId(1), OWNER, 2), 7)
            .unwrap();

        assert!(added.active);
        assert_eq!(added.started_at, 7);
        assert!(registry.has_active(OWNER));
        assert!(!registry.has_active(UnitId(4)));
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = CountermeasureRegistry::new();
        registry.add(Countermeasure::new(CountermeasureId(1), OWNER, 2), 0).unwrap();

        let result = registry.add(Countermeasure::new(CountermeasureId(1), UnitId(9), 5), 0);

        assert_eq!(result.unwrap_err(), PsiError::DuplicateCountermeasure(CountermeasureId(1)));
        assert!(!registry.has_active(UnitId(9)));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut registry = CountermeasureRegistry::new();
        let result = registry.add(Countermeasure::new(CountermeasureId(1), OWNER, 0), 0);
        assert_eq!(result.unwrap_err(), PsiError::InvalidDuration);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_tick_expires() {
        let mut registry = CountermeasureRegistry::new();
        registry.add(Countermeasure::new(CountermeasureId(1), OWNER, 2), 0).unwrap();

        assert!(registry.tick().is_empty());
        assert_eq!(registry.get(CountermeasureId(1)).unwrap().remaining(), 1);

        let expired = registry.tick();
        assert_eq!(expired.len(), 1);
        assert!(!expired[0].active);
        assert!(!registry.has_active(OWNER));
        assert!(registry.get(CountermeasureId(1)).is_none());
    }

    #[test]
    fn test_remove_unit() {
        let mut registry = CountermeasureRegistry::new();
        registry.add(Countermeasure::new(CountermeasureId(1), OWNER, 2), 0).unwrap();
        registry.add(Countermeasure::new(CountermeasureId(2), UnitId(4), 2), 0).unwrap();

        registry.remove_unit(OWNER);

        assert!(!registry.has_active(OWNER));
        assert!(registry.has_active(UnitId(4)));
    }
}
