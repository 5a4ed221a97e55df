//! Per-unit ability state.
//!
//! `AbilityInstance` is one unit's copy of an ability: whether it is
//! unlocked and how long until it can be used again. Instances are created
//! by unlocking and only change through use (cooldown starts) and tick decay.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::catalog::AbilityCatalog;
use super::definition::AbilityType;
use crate::core::{Countdown, PsiError, PsiResult, UnitId};

/// An ability unlocked by a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityInstance {
    /// Which ability.
    pub ability: AbilityType,

    /// Turns until the ability is ready.
    pub cooldown: Countdown,
}

impl AbilityInstance {
    /// A freshly unlocked, ready instance.
    #[must_use]
    pub fn new(ability: AbilityType) -> Self {
        Self {
            ability,
            cooldown: Countdown::elapsed(),
        }
    }

    /// Ready to use (cooldown at zero).
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cooldown.is_elapsed()
    }
}

/// Unlock state and cooldowns for every unit.
#[derive(Clone, Debug, Default)]
pub struct AbilityTracker {
    units: FxHashMap<UnitId, FxHashMap<AbilityType, AbilityInstance>>,
}

impl AbilityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock an ability for a unit.
    ///
    /// Returns `Ok(false)` if it was already unlocked (the existing cooldown
    /// is kept). The ability must be defined in the catalog.
    pub fn unlock(&mut self, unit: UnitId, ability: AbilityType, catalog: &AbilityCatalog) -> PsiResult<bool> {
        catalog.require(ability)?;
        let abilities = self.units.entry(unit).or_default();
        if abilities.contains_key(&ability) {
            return Ok(false);
        }
        abilities.insert(ability, AbilityInstance::new(ability));
        Ok(true)
    }

    /// Get a unit's instance of an ability.
    #[must_use]
    pub fn instance(&self, unit: UnitId, ability: AbilityType) -> Option<&AbilityInstance> {
        self.units.get(&unit).and_then(|a| a.get(&ability))
    }

    /// Has the unit unlocked this ability?
    #[must_use]
    pub fn is_unlocked(&self, unit: UnitId, ability: AbilityType) -> bool {
        self.instance(unit, ability).is_some()
    }

    /// Remaining cooldown, or `None` if not unlocked.
    #[must_use]
    pub fn cooldown(&self, unit: UnitId, ability: AbilityType) -> Option<u32> {
        self.instance(unit, ability).map(|i| i.cooldown.remaining())
    }

    /// Check the ability is unlocked and off cooldown.
    pub fn ensure_ready(&self, unit: UnitId, ability: AbilityType) -> PsiResult<()> {
        let instance = self
            .instance(unit, ability)
            .ok_or(PsiError::AbilityNotUnlocked { unit, ability })?;
        if !instance.is_ready() {
            return Err(PsiError::AbilityOnCooldown {
                ability,
                remaining: instance.cooldown.remaining(),
            });
        }
        Ok(())
    }

    /// Start the ability's cooldown. No-op if the ability is not unlocked.
    pub fn start_cooldown(&mut self, unit: UnitId, ability: AbilityType, turns: u32) {
        if let Some(instance) = self.units.get_mut(&unit).and_then(|a| a.get_mut(&ability)) {
            instance.cooldown.restart(turns);
        }
    }

    /// Unlocked abilities of a unit, sorted.
    #[must_use]
    pub fn unlocked(&self, unit: UnitId) -> Vec<AbilityType> {
        let mut abilities: Vec<_> = self
            .units
            .get(&unit)
            .map(|a| a.keys().copied().collect())
            .unwrap_or_default();
        abilities.sort();
        abilities
    }

    /// Unlocked abilities that are off cooldown, sorted.
    #[must_use]
    pub fn ready(&self, unit: UnitId) -> Vec<AbilityType> {
        let mut abilities: Vec<_> = self
            .units
            .get(&unit)
            .map(|a| a.values().filter(|i| i.is_ready()).map(|i| i.ability).collect())
            .unwrap_or_default();
        abilities.sort();
        abilities
    }

    /// Decrease every cooldown by one turn.
    pub fn tick(&mut self) {
        for instance in self.units.values_mut().flat_map(|a| a.values_mut()) {
            instance.cooldown.tick();
        }
    }

    /// Forget everything about a unit.
    pub fn remove_unit(&mut self, unit: UnitId) {
        self.units.remove(&unit);
    }
}
