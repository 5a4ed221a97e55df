//! Ability resolution.
//!
//! ## Order of checks
//!
//! 1. Caster and target are registered, the ability is known and has a handler
//! 2. The caster has the ability unlocked and off cooldown, and can pay for it
//! 3. The target is a legal target for the ability
//! 4. The target is not immune (robotic units are immune to control)
//! 5. Control abilities: the target is not already controlled and has no
//!    active countermeasure, and the configured control lasts at least a turn
//!
//! Every check runs before anything is mutated. Then the success chance is
//! rolled. A resisted attempt spends nothing; a resisted control attempt
//! also gives the target its feedback checks against the caster. A
//! successful attempt spends the cost, starts the cooldown and dispatches
//! the registered handler.

use super::context::EffectContext;
use super::handlers::ControlProfile;
use super::outcome::AbilityOutcome;
use super::registry::{EffectHandler, EffectRegistry};
use crate::abilities::{AbilityCatalog, AbilityDefinition, AbilityType};
use crate::core::{PsiConfig, PsiError, PsiResult, PsiRng, UnitId};
use crate::encounter::{EncounterState, UnitQuery};

/// Validates and resolves ability uses against an encounter.
#[derive(Clone, Copy, Debug)]
pub struct AbilityResolver<'a> {
    config: &'a PsiConfig,
    catalog: &'a AbilityCatalog,
    effects: &'a EffectRegistry,
}

impl<'a> AbilityResolver<'a> {
    /// Create a resolver over the encounter's static data.
    #[must_use]
    pub fn new(config: &'a PsiConfig, catalog: &'a AbilityCatalog, effects: &'a EffectRegistry) -> Self {
        Self { config, catalog, effects }
    }

    /// Success chance of `caster` using `ability` on `target`.
    ///
    /// Immune targets always yield 0; otherwise the configured base chance
    /// minus the target's resistance, clamped to `[floor, 100]`.
    pub fn calculate_success_chance(
        &self,
        state: &EncounterState,
        units: &dyn UnitQuery,
        caster: UnitId,
        target: UnitId,
        ability: AbilityType,
    ) -> PsiResult<u32> {
        state.ledger.require(caster)?;
        let target_unit = state.ledger.require(target)?;
        self.catalog.require(ability)?;

        if target_unit.is_immune_to(ability) || (ability.is_control() && units.is_robotic(target)) {
            return Ok(0);
        }
        Ok(self.config.success_chance(target_unit.resistance))
    }

    /// Attempt an ability. Every call is counted in the statistics.
    pub fn attempt(
        &self,
        state: &mut EncounterState,
        rng: &mut dyn PsiRng,
        units: &dyn UnitQuery,
        caster: UnitId,
        target: UnitId,
        ability: AbilityType,
    ) -> PsiResult<AbilityOutcome> {
        let result = self.resolve(state, rng, units, caster, target, ability);
        let success = matches!(result, Ok(AbilityOutcome::Resolved { .. }));
        state.stats.record_attempt(success);

        match &result {
            Ok(outcome) => tracing::debug!(
                caster = %caster,
                target = %target,
                ability = ?ability,
                success,
                outcome = ?outcome,
                "ability attempted"
            ),
            Err(err) => tracing::debug!(
                caster = %caster,
                target = %target,
                ability = ?ability,
                error = %err,
                "ability rejected"
            ),
        }
        result
    }

    fn resolve(
        &self,
        state: &mut EncounterState,
        rng: &mut dyn PsiRng,
        units: &dyn UnitQuery,
        caster: UnitId,
        target: UnitId,
        ability: AbilityType,
    ) -> PsiResult<AbilityOutcome> {
        let (definition, handler) = self.validate(state, units, caster, target, ability)?;

        let resistance = state.ledger.require(target)?.resistance;
        let chance = self.config.success_chance(resistance);
        let roll = rng.roll_percent();
        if roll >= chance {
            if let Some(profile) = ControlProfile::for_ability(ability, &self.config.effects) {
                state.resist_control(caster, target, profile.tier, self.config, &mut *rng)?;
            }
            return Ok(AbilityOutcome::Resisted { chance, roll });
        }

        state.ledger.spend(caster, definition.cost)?;
        state.abilities.start_cooldown(caster, ability, definition.cooldown);

        let mut ctx = EffectContext {
            caster,
            target,
            definition,
            config: self.config,
            state,
            rng,
        };
        let effect = handler(&mut ctx);
        Ok(AbilityOutcome::Resolved { chance, roll, effect })
    }

    fn validate(
        &self,
        state: &EncounterState,
        units: &dyn UnitQuery,
        caster: UnitId,
        target: UnitId,
        ability: AbilityType,
    ) -> PsiResult<(&'a AbilityDefinition, EffectHandler)> {
        let caster_unit = state.ledger.require(caster)?;
        let target_unit = state.ledger.require(target)?;
        let definition = self.catalog.require(ability)?;
        let handler = self.effects.get(ability).ok_or(PsiError::UnknownAbility(ability))?;

        state.abilities.ensure_ready(caster, ability)?;
        if !caster_unit.can_afford(definition.cost) {
            return Err(PsiError::InsufficientEnergy {
                unit: caster,
                required: definition.cost,
                available: caster_unit.energy,
            });
        }
        if !definition.target.permits(caster == target) {
            return Err(PsiError::InvalidTarget { ability, target });
        }
        if target_unit.is_immune_to(ability) || (ability.is_control() && units.is_robotic(target)) {
            return Err(PsiError::TargetImmune { target, ability });
        }
        if ability.is_control() {
            state.controls.ensure_controllable(target, &state.countermeasures)?;
        }
        if ControlProfile::for_ability(ability, &self.config.effects).is_some_and(|p| p.duration == 0) {
            return Err(PsiError::InvalidDuration);
        }
        Ok((definition, handler))
    }
}
