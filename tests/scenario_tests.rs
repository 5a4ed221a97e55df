//! End-to-end ability resolution scenarios.
//!
//! These drive a `PsiEncounter` through its public surface only, with a
//! scripted RNG so every roll is known in advance.

use psionic_core::abilities::{AbilityCatalog, AbilityDefinition, AbilityType, TargetKind};
use psionic_core::control::{ActionKind, ControlRequest, ControlState, ControlTier};
use psionic_core::core::{CountermeasureId, EffectTuning, GridPos, PsiConfig, PsiError, ScriptedRng, UnitId};
use psionic_core::countermeasures::Countermeasure;
use psionic_core::effects::{AbilityOutcome, EffectContext, EffectOutcome, EffectRegistry};
use psionic_core::encounter::{PsiEncounter, UnitQuery};
use psionic_core::feedback::FeedbackKind;
use psionic_core::status::StatusKind;

const A: UnitId = UnitId(1);
const B: UnitId = UnitId(2);
const C: UnitId = UnitId(3);

fn encounter(rng: ScriptedRng) -> PsiEncounter<ScriptedRng> {
    let mut encounter = PsiEncounter::with_rng(rng);
    encounter.register_unit(A, 100, 10).unwrap();
    encounter.register_unit(B, 100, 10).unwrap();
    encounter.register_unit(C, 100, 10).unwrap();
    encounter
}

// =============================================================================
// Mind Control Scenarios
// =============================================================================

/// Always-succeed RNG: control succeeds, cost is paid, cooldown starts.
#[test]
fn test_mind_control_succeeds() {
    let mut encounter = encounter(ScriptedRng::always_succeed());
    encounter.unlock(A, AbilityType::MindControl).unwrap();

    let outcome = encounter.attempt(A, B, AbilityType::MindControl).unwrap();

    assert!(outcome.is_success());
    assert_eq!(encounter.energy(A), Some(70));
    assert_eq!(encounter.cooldown(A, AbilityType::MindControl), Some(5));

    let control = outcome.control().expect("control established");
    let instance = encounter.control(control).unwrap();
    assert_eq!(instance.controller, A);
    assert_eq!(instance.target, B);
    assert_eq!(instance.tier, ControlTier::Full);
    assert_eq!(instance.state, ControlState::Active);
    assert!(encounter.statuses().has_status(B, StatusKind::Controlled));
    assert_eq!(encounter.active_control_count(), 1);
}

/// Immune targets cannot be affected whatever the dice say.
#[test]
fn test_immune_target_fails() {
    let mut encounter = encounter(ScriptedRng::always_succeed());
    encounter.unlock(A, AbilityType::MindControl).unwrap();
    encounter.add_immunity(B, AbilityType::MindControl).unwrap();

    let result = encounter.attempt(A, B, AbilityType::MindControl);

    assert_eq!(
        result.unwrap_err(),
        PsiError::TargetImmune { target: B, ability: AbilityType::MindControl }
    );
    assert_eq!(encounter.energy(A), Some(100));
    assert_eq!(encounter.cooldown(A, AbilityType::MindControl), Some(0));
    assert_eq!(encounter.active_control_count(), 0);
    assert!(encounter.statuses().statuses(B).is_empty());
    assert_eq!(
        encounter.calculate_success_chance(A, B, AbilityType::MindControl).unwrap(),
        0
    );
}

/// A second control attempt on a held target is refused and changes nothing.
#[test]
fn test_already_controlled_target_rejected() {
    let mut encounter = encounter(ScriptedRng::always_succeed());
    encounter.unlock(A, AbilityType::MindControl).unwrap();
    encounter.unlock(C, AbilityType::Domination).unwrap();

    let first = encounter
        .attempt(A, B, AbilityType::MindControl)
        .unwrap()
        .control()
        .unwrap();
    let before = encounter.control(first).unwrap().clone();

    let result = encounter.attempt(C, B, AbilityType::Domination);
    assert_eq!(result.unwrap_err(), PsiError::TargetAlreadyControlled(B));
    assert_eq!(encounter.energy(C), Some(100));

    let direct = encounter.attempt_control(ControlRequest::new(C, B, ControlTier::Influence, 5));
    assert_eq!(direct.unwrap_err(), PsiError::TargetAlreadyControlled(B));

    assert_eq!(encounter.control(first).unwrap(), &before);
    assert_eq!(encounter.active_control_count(), 1);
}

/// Direct control requests count as attempts, whether accepted or refused.
#[test]
fn test_direct_control_attempts_are_counted() {
    let mut encounter = encounter(ScriptedRng::always_fail());

    encounter
        .attempt_control(ControlRequest::new(A, B, ControlTier::Full, 3))
        .unwrap();
    let refused = encounter.attempt_control(ControlRequest::new(C, B, ControlTier::Partial, 3));
    assert_eq!(refused.unwrap_err(), PsiError::TargetAlreadyControlled(B));
    let unknown = encounter.attempt_control(ControlRequest::new(UnitId(42), C, ControlTier::Full, 3));
    assert_eq!(unknown.unwrap_err(), PsiError::UnregisteredUnit(UnitId(42)));

    assert_eq!(encounter.stats().attempts(), 3);
    assert_eq!(encounter.stats().successes(), 1);
    assert_eq!(encounter.stats().failures(), 2);
}

/// An active countermeasure blocks control and the caster keeps their energy.
#[test]
fn test_countermeasure_blocks_control() {
    let mut encounter = encounter(ScriptedRng::always_succeed());
    encounter.unlock(A, AbilityType::MindControl).unwrap();
    encounter
        .add_countermeasure(Countermeasure::new(CountermeasureId(1), B, 2))
        .unwrap();

    let result = encounter.attempt(A, B, AbilityType::MindControl);

    assert_eq!(result.unwrap_err(), PsiError::TargetHasActiveCountermeasure(B));
    assert_eq!(encounter.energy(A), Some(100));
    assert_eq!(encounter.cooldown(A, AbilityType::MindControl), Some(0));
    assert_eq!(encounter.active_control_count(), 0);
    assert_eq!(encounter.stats().countermeasures_used(), 1);
}

/// A resisted attempt spends nothing and starts no cooldown.
#[test]
fn test_resisted_attempt_spends_nothing() {
    let mut encounter = encounter(ScriptedRng::always_fail());
    encounter.unlock(A, AbilityType::MindControl).unwrap();

    let outcome = encounter.attempt(A, B, AbilityType::MindControl).unwrap();

    assert_eq!(outcome, AbilityOutcome::Resisted { chance: 85, roll: 99 });
    assert_eq!(encounter.energy(A), Some(100));
    assert_eq!(encounter.cooldown(A, AbilityType::MindControl), Some(0));
    assert_eq!(encounter.stats().failures(), 1);
}

/// The sub-roll can miss after the main roll passed: the cost is still paid.
#[test]
fn test_sub_roll_miss_still_costs() {
    // Main roll 10 passes 85; sub-roll 90 misses Mind Control's 85.
    let mut encounter = encounter(ScriptedRng::sequence([10, 90]));
    encounter.unlock(A, AbilityType::MindControl).unwrap();

    let outcome = encounter.attempt(A, B, AbilityType::MindControl).unwrap();

    assert_eq!(outcome.effect(), Some(&EffectOutcome::Fizzled { chance: 85, roll: 90 }));
    assert_eq!(encounter.energy(A), Some(70));
    assert_eq!(encounter.cooldown(A, AbilityType::MindControl), Some(5));
    assert_eq!(encounter.active_control_count(), 0);
}

/// A resisting target strains the caster even though no control was made.
#[test]
fn test_resisted_control_provokes_feedback() {
    let mut encounter = encounter(ScriptedRng::always_fail());
    encounter.set_resistance(B, 80).unwrap();
    encounter.unlock(A, AbilityType::MindControl).unwrap();

    let outcome = encounter.attempt(A, B, AbilityType::MindControl).unwrap();

    assert_eq!(outcome, AbilityOutcome::Resisted { chance: 5, roll: 99 });
    assert_eq!(encounter.active_feedback_count(), 1);
    let event = &encounter.state().feedback().events()[0];
    assert_eq!(event.kind, FeedbackKind::MentalResistance);
    assert_eq!((event.source, event.target), (B, A));
    assert_eq!(event.control, None);
    assert_eq!(event.intensity, 28);
    assert_eq!(encounter.stats().feedback_events(), 1);
    assert_eq!(encounter.energy(A), Some(100));
}

/// Resisted non-control abilities never provoke feedback.
#[test]
fn test_resisted_blast_is_silent() {
    let mut encounter = encounter(ScriptedRng::always_fail());
    encounter.set_resistance(B, 80).unwrap();
    encounter.unlock(A, AbilityType::PsychicBlast).unwrap();

    encounter.attempt(A, B, AbilityType::PsychicBlast).unwrap();

    assert_eq!(encounter.active_feedback_count(), 0);
}

/// A control ability configured to last no turns is refused before any cost.
#[test]
fn test_zero_duration_control_rejected_up_front() {
    let effects = EffectTuning {
        mind_control_duration: 0,
        ..EffectTuning::default()
    };
    let mut encounter = PsiEncounter::with_rng(ScriptedRng::always_succeed())
        .with_config(PsiConfig::default().with_effects(effects));
    encounter.register_unit(A, 100, 10).unwrap();
    encounter.register_unit(B, 100, 10).unwrap();
    encounter.unlock(A, AbilityType::MindControl).unwrap();

    let result = encounter.attempt(A, B, AbilityType::MindControl);

    assert_eq!(result.unwrap_err(), PsiError::InvalidDuration);
    assert_eq!(encounter.energy(A), Some(100));
    assert_eq!(encounter.cooldown(A, AbilityType::MindControl), Some(0));
    assert_eq!(encounter.stats().successes(), 0);
    assert_eq!(encounter.stats().failures(), 1);
}

// =============================================================================
// Validation
// =============================================================================

/// Cooldown blocks reuse until it has fully decayed.
#[test]
fn test_cooldown_blocks_reuse() {
    let mut encounter = encounter(ScriptedRng::always_succeed());
    encounter.unlock(A, AbilityType::PsychicBlast).unwrap();

    encounter.attempt(A, B, AbilityType::PsychicBlast).unwrap();
    let err = encounter.attempt(A, B, AbilityType::PsychicBlast).unwrap_err();
    assert_eq!(err, PsiError::AbilityOnCooldown { ability: AbilityType::PsychicBlast, remaining: 2 });

    encounter.tick();
    assert!(encounter.attempt(A, B, AbilityType::PsychicBlast).is_err());
    encounter.tick();
    assert!(encounter.attempt(A, B, AbilityType::PsychicBlast).unwrap().is_success());
}

/// Each precondition produces its own error and nothing is spent.
#[test]
fn test_preconditions() {
    let mut encounter = encounter(ScriptedRng::always_succeed());

    assert_eq!(
        encounter.attempt(A, B, AbilityType::PsychicBlast).unwrap_err(),
        PsiError::AbilityNotUnlocked { unit: A, ability: AbilityType::PsychicBlast }
    );
    assert_eq!(
        encounter.attempt(UnitId(42), B, AbilityType::PsychicBlast).unwrap_err(),
        PsiError::UnregisteredUnit(UnitId(42))
    );

    encounter.unlock(A, AbilityType::Teleport).unwrap();
    assert_eq!(
        encounter.attempt(A, B, AbilityType::Teleport).unwrap_err(),
        PsiError::InvalidTarget { ability: AbilityType::Teleport, target: B }
    );

    encounter.unlock(A, AbilityType::Domination).unwrap();
    encounter.attempt(A, C, AbilityType::Domination).unwrap();
    assert_eq!(encounter.energy(A), Some(50));
    encounter.unlock(A, AbilityType::MindScorch).unwrap();
    encounter.attempt(A, B, AbilityType::MindScorch).unwrap();
    assert_eq!(
        encounter.attempt(A, B, AbilityType::MindControl).unwrap_err(),
        PsiError::AbilityNotUnlocked { unit: A, ability: AbilityType::MindControl }
    );

    encounter.unlock(A, AbilityType::PsychicBlast).unwrap();
    assert_eq!(
        encounter.attempt(A, B, AbilityType::PsychicBlast).unwrap_err(),
        PsiError::InsufficientEnergy { unit: A, required: 25, available: 15 }
    );
    assert_eq!(encounter.energy(A), Some(15));

    assert_eq!(encounter.stats().attempts(), 7);
    assert_eq!(encounter.stats().successes(), 2);
    assert_eq!(encounter.stats().failures(), 5);
}

/// Abilities missing from the catalog are reported as unknown.
#[test]
fn test_unknown_ability() {
    let catalog = AbilityCatalog::new().with_definition(
        AbilityDefinition::new(AbilityType::Telepathy, "Telepathy")
            .with_cost(10)
            .with_target(TargetKind::Any),
    );
    let mut encounter = PsiEncounter::with_rng(ScriptedRng::always_succeed()).with_catalog(catalog);
    encounter.register_unit(A, 100, 10).unwrap();

    assert_eq!(
        encounter.unlock(A, AbilityType::MindControl).unwrap_err(),
        PsiError::UnknownAbility(AbilityType::MindControl)
    );
    assert!(encounter.unlock(A, AbilityType::Telepathy).unwrap());
}

// =============================================================================
// Resistance
// =============================================================================

/// Resistance lowers the chance; the floor holds for non-immune targets.
#[test]
fn test_resistance_lowers_chance() {
    let mut encounter = encounter(ScriptedRng::always_succeed());
    encounter.set_resistance(B, 60).unwrap();
    assert_eq!(encounter.calculate_success_chance(A, B, AbilityType::PsychicBlast).unwrap(), 25);

    encounter.set_resistance(B, 100).unwrap();
    assert_eq!(encounter.calculate_success_chance(A, B, AbilityType::PsychicBlast).unwrap(), 0);

    encounter.unlock(A, AbilityType::PsychicBlast).unwrap();
    let outcome = encounter.attempt(A, B, AbilityType::PsychicBlast).unwrap();
    assert_eq!(outcome, AbilityOutcome::Resisted { chance: 0, roll: 0 });

    let mut floored = PsiEncounter::with_rng(ScriptedRng::always_succeed())
        .with_config(PsiConfig::default().with_success_floor(10));
    floored.register_unit(A, 100, 0).unwrap();
    floored.register_unit(B, 100, 0).unwrap();
    floored.set_resistance(B, 100).unwrap();
    assert_eq!(floored.calculate_success_chance(A, B, AbilityType::PsychicBlast).unwrap(), 10);

    floored.add_immunity(B, AbilityType::PsychicBlast).unwrap();
    assert_eq!(floored.calculate_success_chance(A, B, AbilityType::PsychicBlast).unwrap(), 0);
}

struct Robots;

impl UnitQuery for Robots {
    fn is_robotic(&self, unit: UnitId) -> bool {
        unit == B
    }
}

/// Robotic units have no mind to control but still take psychic damage.
#[test]
fn test_robotic_units_immune_to_control() {
    let mut encounter = encounter(ScriptedRng::always_succeed()).with_unit_query(Robots);
    encounter.unlock(A, AbilityType::PsychicDominance).unwrap();
    encounter.unlock(A, AbilityType::PsychicBlast).unwrap();

    assert_eq!(
        encounter.calculate_success_chance(A, B, AbilityType::PsychicDominance).unwrap(),
        0
    );
    assert_eq!(
        encounter.attempt(A, B, AbilityType::PsychicDominance).unwrap_err(),
        PsiError::TargetImmune { target: B, ability: AbilityType::PsychicDominance }
    );
    assert!(encounter.attempt(A, B, AbilityType::PsychicBlast).unwrap().is_success());
    assert!(encounter.attempt(A, C, AbilityType::PsychicDominance).unwrap().is_success());
}

// =============================================================================
// Effects
// =============================================================================

/// Mind merge averages both pools.
#[test]
fn test_mind_merge() {
    let mut encounter = encounter(ScriptedRng::always_succeed());
    encounter.unlock(A, AbilityType::MindMerge).unwrap();
    encounter.unlock(B, AbilityType::MindScorch).unwrap();
    encounter.attempt(B, C, AbilityType::MindScorch).unwrap();

    // A pays 25 first: 75 and 65 merge to 70.
    let outcome = encounter.attempt(A, B, AbilityType::MindMerge).unwrap();

    assert_eq!(outcome.effect(), Some(&EffectOutcome::Merged { energy: 70 }));
    assert_eq!(encounter.energy(A), Some(70));
    assert_eq!(encounter.energy(B), Some(70));
    assert!(encounter.statuses().has_status(A, StatusKind::Merged));
    assert!(encounter.statuses().has_status(B, StatusKind::Merged));
}

/// Damage lands in the status sink.
#[test]
fn test_blast_damage_recorded() {
    let mut encounter = encounter(ScriptedRng::always_succeed());
    encounter.unlock(A, AbilityType::PsychicBlast).unwrap();

    let outcome = encounter.attempt(A, B, AbilityType::PsychicBlast).unwrap();

    assert_eq!(outcome.effect(), Some(&EffectOutcome::Damaged { target: B, amount: 40 }));
    assert_eq!(encounter.statuses().damage_taken(B), 40);
}

fn silence(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let caster = ctx.caster;
    ctx.sink().take_damage(caster, 1);
    EffectOutcome::Applied
}

/// A replacement handler takes over without touching the resolver.
#[test]
fn test_custom_handler() {
    let effects = EffectRegistry::standard().with_handler(AbilityType::Telepathy, silence);
    let mut encounter = encounter(ScriptedRng::always_succeed()).with_effects(effects);
    encounter.unlock(A, AbilityType::Telepathy).unwrap();

    encounter.attempt(A, B, AbilityType::Telepathy).unwrap();

    assert_eq!(encounter.statuses().damage_taken(A), 1);
    assert!(!encounter.statuses().has_status(A, StatusKind::TelepathicLink));
}

/// Abilities without a handler are refused before anything is spent.
#[test]
fn test_missing_handler() {
    let mut encounter = encounter(ScriptedRng::always_succeed()).with_effects(EffectRegistry::new());
    encounter.unlock(A, AbilityType::Telepathy).unwrap();

    assert_eq!(
        encounter.attempt(A, B, AbilityType::Telepathy).unwrap_err(),
        PsiError::UnknownAbility(AbilityType::Telepathy)
    );
    assert_eq!(encounter.energy(A), Some(100));
}

// =============================================================================
// Unit Removal
// =============================================================================

/// Removing a unit ends its controls and forgets everything about it.
#[test]
fn test_remove_unit_cascades() {
    let mut encounter = encounter(ScriptedRng::always_succeed());
    encounter.unlock(A, AbilityType::MindControl).unwrap();
    let control = encounter.attempt(A, B, AbilityType::MindControl).unwrap().control().unwrap();

    encounter.remove_unit(A).unwrap();

    assert_eq!(encounter.control(control).unwrap().state, ControlState::Broken);
    assert_eq!(encounter.active_control_count(), 0);
    assert!(!encounter.statuses().has_status(B, StatusKind::Controlled));
    assert_eq!(encounter.energy(A), None);
    assert!(encounter.unlocked_abilities(A).is_empty());
    assert_eq!(encounter.remove_unit(A).unwrap_err(), PsiError::UnregisteredUnit(A));
}

// =============================================================================
// Positions
// =============================================================================

struct Line;

impl UnitQuery for Line {
    fn position(&self, unit: UnitId) -> Option<GridPos> {
        match unit {
            B => Some(GridPos::new(0, 0)),
            C => Some(GridPos::new(7, 0)),
            _ => None,
        }
    }
}

/// Range checks use unit positions and are skipped for unplaced units.
#[test]
fn test_controlled_action_range() {
    let mut encounter = encounter(ScriptedRng::always_fail()).with_unit_query(Line);
    let control = encounter
        .attempt_control(ControlRequest::new(A, B, ControlTier::Full, 3))
        .unwrap();

    let err = encounter
        .execute_action(control, ActionKind::Move, Some(C))
        .unwrap_err();
    assert!(matches!(err, PsiError::OutOfRange { distance: 7, range: 6, .. }));

    assert!(encounter
        .execute_action(control, ActionKind::Move, Some(A))
        .is_ok());
}
