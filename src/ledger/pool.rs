//! The psi resource ledger.
//!
//! Owns every unit's energy pool. Energy only changes through
//! [`PsiLedger::spend`], [`PsiLedger::regenerate_tick`] and
//! [`PsiLedger::set_energy`]; it is unsigned, so it can never go negative.

use im::HashMap as ImHashMap;

use super::unit::{PsiSchool, PsiUnit, MAX_RESISTANCE};
use crate::abilities::AbilityType;
use crate::core::{PsiError, PsiResult, UnitId};

/// Energy pools and psionic traits of every registered unit.
///
/// Backed by a persistent map so snapshots of an encounter clone in O(1).
///
/// ```
/// use psionic_core::core::UnitId;
/// use psionic_core::ledger::PsiLedger;
///
/// let mut ledger = PsiLedger::new();
/// ledger.register(UnitId(1), 100, 10).unwrap();
/// ledger.spend(UnitId(1), 30).unwrap();
/// assert_eq!(ledger.energy(UnitId(1)), Some(70));
///
/// ledger.regenerate_tick();
/// assert_eq!(ledger.energy(UnitId(1)), Some(80));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PsiLedger {
    units: ImHashMap<UnitId, PsiUnit>,
}

impl PsiLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit with a full pool.
    pub fn register(&mut self, unit: UnitId, capacity: u32, regen: u32) -> PsiResult<()> {
        if self.units.contains_key(&unit) {
            return Err(PsiError::DuplicateUnit(unit));
        }
        self.units.insert(unit, PsiUnit::new(unit, capacity, regen));
        Ok(())
    }

    /// Remove a unit that left the encounter.
    pub fn remove(&mut self, unit: UnitId) -> Option<PsiUnit> {
        self.units.remove(&unit)
    }

    /// Look up a unit.
    #[must_use]
    pub fn get(&self, unit: UnitId) -> Option<&PsiUnit> {
        self.units.get(&unit)
    }

    /// Look up a unit or `UnregisteredUnit`.
    pub fn require(&self, unit: UnitId) -> PsiResult<&PsiUnit> {
        self.units.get(&unit).ok_or(PsiError::UnregisteredUnit(unit))
    }

    fn require_mut(&mut self, unit: UnitId) -> PsiResult<&mut PsiUnit> {
        self.units.get_mut(&unit).ok_or(PsiError::UnregisteredUnit(unit))
    }

    /// Is the unit registered?
    #[must_use]
    pub fn contains(&self, unit: UnitId) -> bool {
        self.units.contains_key(&unit)
    }

    /// Number of registered units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if no units are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Registered unit ids, sorted.
    #[must_use]
    pub fn unit_ids(&self) -> Vec<UnitId> {
        let mut ids: Vec<_> = self.units.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Set resistance, clamped to 0..=100.
    pub fn set_resistance(&mut self, unit: UnitId, resistance: u32) -> PsiResult<()> {
        self.require_mut(unit)?.resistance = resistance.min(MAX_RESISTANCE);
        Ok(())
    }

    /// Assign a school.
    pub fn set_school(&mut self, unit: UnitId, school: PsiSchool) -> PsiResult<()> {
        self.require_mut(unit)?.school = school;
        Ok(())
    }

    /// Make the unit immune to an ability.
    pub fn add_immunity(&mut self, unit: UnitId, ability: AbilityType) -> PsiResult<()> {
        self.require_mut(unit)?.immunities.insert(ability);
        Ok(())
    }

    /// Lift an immunity. Returns whether the unit had it.
    pub fn remove_immunity(&mut self, unit: UnitId, ability: AbilityType) -> PsiResult<bool> {
        Ok(self.require_mut(unit)?.immunities.remove(&ability).is_some())
    }

    /// Add `regen + school bonus` to every unit.
    ///
    /// Energy is allowed to rise above capacity; the excess models
    /// temporary buffs and is spent like any other energy.
    pub fn regenerate_tick(&mut self) {
        for (_, unit) in self.units.iter_mut() {
            unit.energy = unit.energy.saturating_add(unit.regen_per_turn());
        }
    }

    /// Deduct `cost`. Fails without touching the pool if it is too small.
    pub fn spend(&mut self, unit: UnitId, cost: u32) -> PsiResult<()> {
        let record = self.require_mut(unit)?;
        if record.energy < cost {
            return Err(PsiError::InsufficientEnergy {
                unit,
                required: cost,
                available: record.energy,
            });
        }
        record.energy -= cost;
        Ok(())
    }

    /// Overwrite a unit's energy (used by energy-sharing effects).
    pub fn set_energy(&mut self, unit: UnitId, energy: u32) -> PsiResult<()> {
        self.require_mut(unit)?.energy = energy;
        Ok(())
    }

    /// Current energy.
    #[must_use]
    pub fn energy(&self, unit: UnitId) -> Option<u32> {
        self.get(unit).map(|u| u.energy)
    }

    /// Pool capacity.
    #[must_use]
    pub fn capacity(&self, unit: UnitId) -> Option<u32> {
        self.get(unit).map(|u| u.capacity)
    }

    /// Regeneration per turn, school bonus included.
    #[must_use]
    pub fn regen_rate(&self, unit: UnitId) -> Option<u32> {
        self.get(unit).map(PsiUnit::regen_per_turn)
    }

    /// Resistance score.
    #[must_use]
    pub fn resistance(&self, unit: UnitId) -> Option<u32> {
        self.get(unit).map(|u| u.resistance)
    }

    /// Immunities, sorted.
    #[must_use]
    pub fn immunities(&self, unit: UnitId) -> Vec<AbilityType> {
        self.get(unit)
            .map(|u| u.immunities.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: UnitId = UnitId(1);
    const B: UnitId = UnitId(2);

    #[test]
    fn test_register() {
        let mut ledger = PsiLedger::new();
        ledger.register(A, 100, 10).unwrap();

        assert_eq!(ledger.energy(A), Some(100));
        assert_eq!(ledger.capacity(A), Some(100));
        assert_eq!(ledger.regen_rate(A), Some(10));
        assert_eq!(ledger.register(A, 50, 5), Err(PsiError::DuplicateUnit(A)));
        assert_eq!(ledger.capacity(A), Some(100));
    }

    #[test]
    fn test_spend() {
        let mut ledger = PsiLedger::new();
        ledger.register(A, 40, 0).unwrap();

        ledger.spend(A, 30).unwrap();
        assert_eq!(ledger.energy(A), Some(10));

        let err = ledger.spend(A, 11).unwrap_err();
        assert_eq!(
            err,
            PsiError::InsufficientEnergy { unit: A, required: 11, available: 10 }
        );
        assert_eq!(ledger.energy(A), Some(10));

        ledger.spend(A, 10).unwrap();
        assert_eq!(ledger.energy(A), Some(0));
    }

    #[test]
    fn test_spend_unregistered() {
        let mut ledger = PsiLedger::new();
        assert_eq!(ledger.spend(B, 1), Err(PsiError::UnregisteredUnit(B)));
    }

    #[test]
    fn test_regeneration_exceeds_capacity() {
        let mut ledger = PsiLedger::new();
        ledger.register(A, 100, 10).unwrap();
        ledger.set_school(A, PsiSchool::Telepathy).unwrap();

        ledger.regenerate_tick();
        assert_eq!(ledger.energy(A), Some(112));

        ledger.regenerate_tick();
        assert_eq!(ledger.energy(A), Some(124));
    }

    #[test]
    fn test_regeneration_applies_to_all_units() {
        let mut ledger = PsiLedger::new();
        ledger.register(A, 50, 5).unwrap();
        ledger.register(B, 50, 0).unwrap();
        ledger.set_school(B, PsiSchool::PsychicWarfare).unwrap();
        ledger.spend(A, 50).unwrap();
        ledger.spend(B, 50).unwrap();

        ledger.regenerate_tick();

        assert_eq!(ledger.energy(A), Some(5));
        assert_eq!(ledger.energy(B), Some(3));
    }

    #[test]
    fn test_resistance_clamped() {
        let mut ledger = PsiLedger::new();
        ledger.register(A, 10, 1).unwrap();
        ledger.set_resistance(A, 250).unwrap();
        assert_eq!(ledger.resistance(A), Some(100));
    }

    #[test]
    fn test_immunities() {
        let mut ledger = PsiLedger::new();
        ledger.register(A, 10, 1).unwrap();
        ledger.add_immunity(A, AbilityType::MindControl).unwrap();
        ledger.add_immunity(A, AbilityType::Domination).unwrap();

        assert_eq!(
            ledger.immunities(A),
            vec![AbilityType::MindControl, AbilityType::Domination]
        );
        assert!(ledger.remove_immunity(A, AbilityType::MindControl).unwrap());
        assert!(!ledger.remove_immunity(A, AbilityType::MindControl).unwrap());
        assert_eq!(ledger.immunities(A), vec![AbilityType::Domination]);
    }

    #[test]
    fn test_remove() {
        let mut ledger = PsiLedger::new();
        ledger.register(A, 10, 1).unwrap();
        ledger.register(B, 10, 1).unwrap();
        assert!(ledger.remove(A).is_some());
        assert!(!ledger.contains(A));
        assert_eq!(ledger.unit_ids(), vec![B]);
        assert_eq!(ledger.set_school(A, PsiSchool::Telepathy), Err(PsiError::UnregisteredUnit(A)));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut ledger = PsiLedger::new();
        ledger.register(A, 100, 10).unwrap();
        let snapshot = ledger.clone();

        ledger.spend(A, 60).unwrap();

        assert_eq!(ledger.energy(A), Some(40));
        assert_eq!(snapshot.energy(A), Some(100));
    }
}
