//! The encounter facade.
//!
//! `PsiEncounter` owns the configuration, ability catalog, handler table,
//! mutable state, random source and the view of the unit layer for one
//! encounter. It is the single entry point an outer simulation drives.
//!
//! ## Tick pipeline
//!
//! [`PsiEncounter::tick`] must run exactly once per turn. Its steps always
//! run in this order:
//!
//! 1. regenerate energy
//! 2. decay ability cooldowns
//! 3. decay status effects
//! 4. age control instances, then roll sustain feedback for the survivors
//! 5. age feedback events
//! 6. age countermeasures
//!
//! Control aging reads the resistance snapshot taken when each control was
//! established, so the order of steps 1-3 never changes its outcome.

use serde::{Deserialize, Serialize};

use super::presentation::Presentation;
use super::query::{NoUnitQuery, UnitQuery};
use super::state::{release, EncounterState};
use super::stats::EncounterStats;
use crate::abilities::{AbilityCatalog, AbilityType};
use crate::control::{ActionKind, ControlInstance, ControlRequest};
use crate::core::{ControlId, GameRng, PsiConfig, PsiError, PsiResult, PsiRng, UnitId};
use crate::countermeasures::Countermeasure;
use crate::effects::{AbilityOutcome, AbilityResolver, EffectRegistry};
use crate::feedback::{FeedbackBatch, FeedbackEvent};
use crate::ledger::{PsiSchool, PsiUnit};
use crate::status::StatusBook;

/// What one tick changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Turn number after the tick.
    pub turn: u32,
    /// Statuses that ran out.
    pub expired_statuses: usize,
    /// Controls whose duration reached zero.
    pub expired_controls: Vec<ControlId>,
    /// Sustain feedback events generated in step 4.
    pub feedback_created: usize,
    /// Feedback events that ran out.
    pub expired_feedback: usize,
    /// Countermeasures that ran out.
    pub expired_countermeasures: usize,
}

/// One psionic encounter.
///
/// `R` supplies randomness and `Q` answers questions about units the core
/// does not own (positions, robotic bodies).
///
/// ```
/// use psionic_core::abilities::AbilityType;
/// use psionic_core::core::{ScriptedRng, UnitId};
/// use psionic_core::encounter::PsiEncounter;
///
/// let mut encounter = PsiEncounter::with_rng(ScriptedRng::always_succeed());
/// let (caster, target) = (UnitId::new(1), UnitId::new(2));
/// encounter.register_unit(caster, 100, 10).unwrap();
/// encounter.register_unit(target, 80, 5).unwrap();
/// encounter.unlock(caster, AbilityType::MindControl).unwrap();
///
/// let outcome = encounter.attempt(caster, target, AbilityType::MindControl).unwrap();
/// assert!(outcome.control().is_some());
/// assert_eq!(encounter.energy(caster), Some(70));
/// ```
pub struct PsiEncounter<R: PsiRng = GameRng, Q: UnitQuery = NoUnitQuery> {
    config: PsiConfig,
    catalog: AbilityCatalog,
    effects: EffectRegistry,
    state: EncounterState,
    rng: R,
    units: Q,
}

impl PsiEncounter {
    /// Standard rules with a seeded ChaCha8 generator.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }
}

impl<R: PsiRng> PsiEncounter<R> {
    /// Standard rules with a caller-supplied random source.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self {
            config: PsiConfig::default(),
            catalog: AbilityCatalog::standard(),
            effects: EffectRegistry::standard(),
            state: EncounterState::new(),
            rng,
            units: NoUnitQuery,
        }
    }
}

impl<R: PsiRng, Q: UnitQuery> PsiEncounter<R, Q> {
    /// Replace the configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: PsiConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the ability catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: AbilityCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the effect handler table.
    #[must_use]
    pub fn with_effects(mut self, effects: EffectRegistry) -> Self {
        self.effects = effects;
        self
    }

    /// Attach a view of the unit layer.
    #[must_use]
    pub fn with_unit_query<Q2: UnitQuery>(self, units: Q2) -> PsiEncounter<R, Q2> {
        PsiEncounter {
            config: self.config,
            catalog: self.catalog,
            effects: self.effects,
            state: self.state,
            rng: self.rng,
            units,
        }
    }

    // === Units ===

    /// Add a unit with a full pool of `capacity`.
    pub fn register_unit(&mut self, unit: UnitId, capacity: u32, regen: u32) -> PsiResult<()> {
        self.state.ledger.register(unit, capacity, regen)?;
        tracing::debug!(unit = %unit, capacity, regen, "unit registered");
        Ok(())
    }

    /// Take a unit out of the encounter.
    pub fn remove_unit(&mut self, unit: UnitId) -> PsiResult<()> {
        self.state.remove_unit(unit)
    }

    pub fn set_resistance(&mut self, unit: UnitId, resistance: u32) -> PsiResult<()> {
        self.state.ledger.set_resistance(unit, resistance)
    }

    pub fn set_school(&mut self, unit: UnitId, school: PsiSchool) -> PsiResult<()> {
        self.state.ledger.set_school(unit, school)
    }

    pub fn add_immunity(&mut self, unit: UnitId, ability: AbilityType) -> PsiResult<()> {
        self.state.ledger.add_immunity(unit, ability)
    }

    pub fn remove_immunity(&mut self, unit: UnitId, ability: AbilityType) -> PsiResult<bool> {
        self.state.ledger.remove_immunity(unit, ability)
    }

    /// Unlock an ability for a unit. Returns `false` if it was already unlocked.
    pub fn unlock(&mut self, unit: UnitId, ability: AbilityType) -> PsiResult<bool> {
        self.state.ledger.require(unit)?;
        self.state.abilities.unlock(unit, ability, &self.catalog)
    }

    // === Abilities ===

    /// Try to use an ability.
    pub fn attempt(&mut self, caster: UnitId, target: UnitId, ability: AbilityType) -> PsiResult<AbilityOutcome> {
        AbilityResolver::new(&self.config, &self.catalog, &self.effects).attempt(
            &mut self.state,
            &mut self.rng,
            &self.units,
            caster,
            target,
            ability,
        )
    }

    /// Chance that `ability` would succeed right now, 0..=100.
    pub fn calculate_success_chance(&self, caster: UnitId, target: UnitId, ability: AbilityType) -> PsiResult<u32> {
        AbilityResolver::new(&self.config, &self.catalog, &self.effects)
            .calculate_success_chance(&self.state, &self.units, caster, target, ability)
    }

    // === Control ===

    /// Establish control directly, without an ability.
    ///
    /// Counted in the statistics like an ability attempt: an established
    /// control is a success, any rejection a failure.
    pub fn attempt_control(&mut self, request: ControlRequest) -> PsiResult<ControlId> {
        let result = self.establish(request);
        self.state.stats.record_attempt(result.is_ok());
        if let Err(err) = &result {
            tracing::debug!(
                controller = %request.controller,
                target = %request.target,
                error = %err,
                "control attempt rejected"
            );
        }
        result
    }

    fn establish(&mut self, request: ControlRequest) -> PsiResult<ControlId> {
        self.state.ledger.require(request.controller)?;
        self.state.establish_control(request, &self.config, &mut self.rng)
    }

    /// Order a controlled unit to act.
    ///
    /// The range check uses the distance from the controlled unit to
    /// `action_target` and is skipped when either position is unknown.
    pub fn execute_action(
        &mut self,
        control: ControlId,
        action: ActionKind,
        action_target: Option<UnitId>,
    ) -> PsiResult<FeedbackBatch> {
        let controlled = self
            .state
            .controls
            .get(control)
            .ok_or(PsiError::UnknownControl(control))?
            .target;
        let distance = action_target.and_then(|t| self.units.distance(controlled, t));
        self.state
            .execute_action(control, action, action_target, distance, &self.config, &mut self.rng)
    }

    /// Break a control; the controller takes psionic feedback.
    pub fn break_control(&mut self, control: ControlId) -> PsiResult<FeedbackEvent> {
        self.state.break_control(control, &self.config)
    }

    /// Raise a countermeasure. Returns the control it dispelled, if any.
    pub fn add_countermeasure(&mut self, countermeasure: Countermeasure) -> PsiResult<Option<ControlId>> {
        self.state.add_countermeasure(countermeasure, &self.config)
    }

    // === Turn ===

    /// Advance one turn through the fixed pipeline.
    pub fn tick(&mut self) -> TickReport {
        let state = &mut self.state;
        state.turn += 1;
        let turn = state.turn;

        tracing::trace!(turn, "regenerate energy");
        state.ledger.regenerate_tick();

        tracing::trace!(turn, "decay ability cooldowns");
        state.abilities.tick();

        tracing::trace!(turn, "decay statuses");
        let expired_statuses = state.statuses.tick();

        tracing::trace!(turn, "age controls");
        let expired_controls = state.controls.tick(turn);
        for id in &expired_controls {
            if let Some(instance) = state.controls.get(*id) {
                release(&mut state.statuses, &mut state.notifications, instance);
            }
        }
        state.stats.record_expirations(expired_controls.len());

        let mut feedback_created = 0;
        for instance in state.controls.active() {
            if state
                .feedback
                .sustain_check(instance, &self.config.feedback, &mut self.rng)
                .is_some()
            {
                feedback_created += 1;
            }
        }
        state.stats.record_feedback(feedback_created);

        tracing::trace!(turn, "age feedback");
        let expired_feedback = state.feedback.tick().len();

        tracing::trace!(turn, "age countermeasures");
        let expired_countermeasures = state.countermeasures.tick().len();

        tracing::debug!(
            turn,
            expired_controls = expired_controls.len(),
            feedback_created,
            expired_feedback,
            expired_countermeasures,
            "tick complete"
        );

        TickReport {
            turn,
            expired_statuses,
            expired_controls,
            feedback_created,
            expired_feedback,
            expired_countermeasures,
        }
    }

    /// Take the queued presentation notifications.
    pub fn drain_presentation(&mut self) -> Vec<Presentation> {
        self.state.drain_presentation()
    }

    // === Queries ===

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    #[must_use]
    pub fn config(&self) -> &PsiConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &AbilityCatalog {
        &self.catalog
    }

    /// The random source, e.g. to checkpoint a [`GameRng`].
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Read-only view of the mutable state.
    #[must_use]
    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    #[must_use]
    pub fn stats(&self) -> &EncounterStats {
        &self.state.stats
    }

    #[must_use]
    pub fn statuses(&self) -> &StatusBook {
        &self.state.statuses
    }

    #[must_use]
    pub fn unit(&self, unit: UnitId) -> Option<&PsiUnit> {
        self.state.ledger.get(unit)
    }

    #[must_use]
    pub fn energy(&self, unit: UnitId) -> Option<u32> {
        self.state.ledger.energy(unit)
    }

    #[must_use]
    pub fn max_energy(&self, unit: UnitId) -> Option<u32> {
        self.state.ledger.capacity(unit)
    }

    /// Energy regained per turn, school bonus included.
    #[must_use]
    pub fn regen_rate(&self, unit: UnitId) -> Option<u32> {
        self.state.ledger.regen_rate(unit)
    }

    #[must_use]
    pub fn immunities(&self, unit: UnitId) -> Vec<AbilityType> {
        self.state.ledger.immunities(unit)
    }

    /// Remaining cooldown of an unlocked ability.
    #[must_use]
    pub fn cooldown(&self, unit: UnitId, ability: AbilityType) -> Option<u32> {
        self.state.abilities.cooldown(unit, ability)
    }

    #[must_use]
    pub fn unlocked_abilities(&self, unit: UnitId) -> Vec<AbilityType> {
        self.state.abilities.unlocked(unit)
    }

    /// Unlocked abilities that are off cooldown and affordable right now.
    #[must_use]
    pub fn available_abilities(&self, unit: UnitId) -> Vec<AbilityType> {
        let energy = self.energy(unit).unwrap_or(0);
        self.state
            .abilities
            .ready(unit)
            .into_iter()
            .filter(|ability| self.catalog.get(*ability).is_some_and(|d| d.cost <= energy))
            .collect()
    }

    #[must_use]
    pub fn control(&self, control: ControlId) -> Option<&ControlInstance> {
        self.state.controls.get(control)
    }

    /// The active control over a unit, if any.
    #[must_use]
    pub fn controlling(&self, target: UnitId) -> Option<&ControlInstance> {
        self.state.controls.active_for_target(target)
    }

    #[must_use]
    pub fn active_control_count(&self) -> usize {
        self.state.controls.active_count()
    }

    #[must_use]
    pub fn active_feedback_count(&self) -> usize {
        self.state.feedback.active_count()
    }

    #[must_use]
    pub fn active_countermeasure_count(&self) -> usize {
        self.state.countermeasures.active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlTier;
    use crate::core::ScriptedRng;

    const A: UnitId = UnitId(1);
    const B: UnitId = UnitId(2);

    fn encounter(rng: ScriptedRng) -> PsiEncounter<ScriptedRng> {
        let mut encounter = PsiEncounter::with_rng(rng);
        encounter.register_unit(A, 100, 10).unwrap();
        encounter.register_unit(B, 80, 5).unwrap();
        encounter
    }

    #[test]
    fn test_tick_advances_turn_and_regenerates() {
        let mut encounter = encounter(ScriptedRng::always_fail());
        encounter.set_school(A, PsiSchool::PsychicWarfare).unwrap();

        let report = encounter.tick();

        assert_eq!(report.turn, 1);
        assert_eq!(encounter.turn(), 1);
        assert_eq!(encounter.energy(A), Some(113));
        assert_eq!(encounter.energy(B), Some(85));
    }

    #[test]
    fn test_unlock_requires_registered_unit() {
        let mut encounter = encounter(ScriptedRng::always_succeed());
        assert_eq!(
            encounter.unlock(UnitId(9), AbilityType::Telepathy).unwrap_err(),
            PsiError::UnregisteredUnit(UnitId(9))
        );
        assert!(encounter.unlock(A, AbilityType::Telepathy).unwrap());
        assert!(!encounter.unlock(A, AbilityType::Telepathy).unwrap());
    }

    #[test]
    fn test_available_abilities_respects_cooldown_and_energy() {
        let mut encounter = encounter(ScriptedRng::always_succeed());
        encounter.unlock(A, AbilityType::Telepathy).unwrap();
        encounter.unlock(A, AbilityType::Domination).unwrap();

        assert_eq!(
            encounter.available_abilities(A),
            vec![AbilityType::Telepathy, AbilityType::Domination]
        );

        encounter.attempt(A, A, AbilityType::Telepathy).unwrap();
        assert_eq!(encounter.available_abilities(A), vec![AbilityType::Domination]);

        encounter.state.ledger.set_energy(A, 40).unwrap();
        assert!(encounter.available_abilities(A).is_empty());
        assert_eq!(
            encounter.unlocked_abilities(A),
            vec![AbilityType::Telepathy, AbilityType::Domination]
        );
    }

    #[test]
    fn test_control_expires_with_presentation() {
        let mut encounter = encounter(ScriptedRng::always_fail());
        let id = encounter
            .attempt_control(ControlRequest::new(A, B, ControlTier::Full, 2))
            .unwrap();
        assert_eq!(encounter.drain_presentation().len(), 2);

        assert!(encounter.tick().expired_controls.is_empty());
        let report = encounter.tick();
        assert_eq!(report.expired_controls, vec![id]);
        assert_eq!(encounter.active_control_count(), 0);
        assert_eq!(encounter.stats().control_expirations(), 1);

        let released = encounter.drain_presentation();
        assert_eq!(released.len(), 2);
        assert!(released.iter().all(|p| matches!(p, Presentation::Expired { .. })));
        assert_eq!(encounter.control(id).unwrap().ended_at, Some(2));
    }
}
