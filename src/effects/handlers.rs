//! Standard effect handlers, one per ability type.
//!
//! Handlers run after the resolver has validated the attempt, spent the
//! cost and started the cooldown. Control abilities roll their own
//! independent chance on top of the resolver's success roll. When it passes
//! they go through the control manager, so the controller gets an
//! actionable instance as well as the status; when it misses, the target
//! gets its feedback checks as for a resisted attempt.

use super::context::EffectContext;
use super::outcome::EffectOutcome;
use crate::abilities::AbilityType;
use crate::control::{ControlRequest, ControlTier};
use crate::core::{EffectTuning, PsiError, PsiResult};
use crate::status::StatusKind;

/// Mark the caster as teleported and mirror the cooldown as a status.
pub fn teleport(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let caster = ctx.caster;
    let cooldown = ctx.definition.cooldown;
    let sink = ctx.sink();
    sink.add_status_effect(caster, StatusKind::Teleported, 0, 0);
    sink.add_status_effect(caster, StatusKind::TeleportCooldown, cooldown, 0);
    EffectOutcome::Applied
}

/// How a control ability takes hold once the resolver's roll has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ControlProfile {
    /// Independent sub-roll chance.
    pub chance: u32,
    pub tier: ControlTier,
    /// Turns the control and its status last.
    pub duration: u32,
    pub status: StatusKind,
}

impl ControlProfile {
    /// Profile of a control ability; `None` for every other ability.
    pub(crate) fn for_ability(ability: AbilityType, tuning: &EffectTuning) -> Option<Self> {
        match ability {
            AbilityType::PsychicDominance => Some(Self {
                chance: tuning.dominance_chance,
                tier: ControlTier::Partial,
                duration: tuning.dominance_duration,
                status: StatusKind::Controlled,
            }),
            AbilityType::MindControl => Some(Self {
                chance: tuning.mind_control_chance,
                tier: ControlTier::Full,
                duration: tuning.mind_control_duration,
                status: StatusKind::Controlled,
            }),
            AbilityType::Domination => Some(Self {
                chance: tuning.domination_chance,
                tier: ControlTier::Influence,
                duration: tuning.domination_duration,
                status: StatusKind::Dominated,
            }),
            _ => None,
        }
    }
}

pub fn psychic_dominance(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    take_control(ctx, AbilityType::PsychicDominance)
}

pub fn mind_control(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    take_control(ctx, AbilityType::MindControl)
}

pub fn domination(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    take_control(ctx, AbilityType::Domination)
}

fn take_control(ctx: &mut EffectContext<'_>, ability: AbilityType) -> EffectOutcome {
    let Some(profile) = ControlProfile::for_ability(ability, &ctx.config.effects) else {
        return EffectOutcome::Rejected(PsiError::UnknownAbility(ability));
    };
    let (caster, target) = (ctx.caster, ctx.target);

    let roll = ctx.rng.roll_percent();
    if roll >= profile.chance.min(100) {
        let chance = profile.chance;
        tracing::debug!(caster = %caster, target = %target, chance, roll, "control sub-roll missed");
        // The target fought the attempt off and may lash back.
        if let Err(err) = ctx.state.resist_control(caster, target, profile.tier, ctx.config, &mut *ctx.rng) {
            tracing::warn!(target = %target, error = %err, "resisted control produced no feedback");
        }
        return EffectOutcome::Fizzled { chance, roll };
    }

    let request = ControlRequest::new(caster, target, profile.tier, profile.duration);
    match ctx.state.establish_control(request, ctx.config, &mut *ctx.rng) {
        Ok(control) => {
            ctx.sink().add_status_effect(target, profile.status, profile.duration, 0);
            EffectOutcome::Controlled(control)
        }
        Err(err) => {
            tracing::warn!(target = %target, error = %err, "control could not be established");
            EffectOutcome::Rejected(err)
        }
    }
}

/// Share both pools: each side ends with the floor of the average.
pub fn mind_merge(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    merge_energy(ctx).unwrap_or_else(EffectOutcome::Rejected)
}

fn merge_energy(ctx: &mut EffectContext<'_>) -> PsiResult<EffectOutcome> {
    let (caster, target) = (ctx.caster, ctx.target);
    let ledger = ctx.state.ledger_mut();
    let total = u64::from(ledger.require(caster)?.energy) + u64::from(ledger.require(target)?.energy);
    let energy = (total / 2) as u32;
    ledger.set_energy(caster, energy)?;
    ledger.set_energy(target, energy)?;

    let duration = ctx.config.effects.merge_duration;
    let sink = ctx.sink();
    sink.add_status_effect(caster, StatusKind::Merged, duration, 0);
    sink.add_status_effect(target, StatusKind::Merged, duration, 0);
    Ok(EffectOutcome::Merged { energy })
}

pub fn psychic_barrier(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let duration = ctx.config.effects.barrier_duration;
    protect(ctx, duration)
}

pub fn psychic_shield(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let duration = ctx.config.effects.shield_duration;
    protect(ctx, duration)
}

fn protect(ctx: &mut EffectContext<'_>, duration: u32) -> EffectOutcome {
    let target = ctx.target;
    let magnitude = i64::from(ctx.definition.magnitude);
    let sink = ctx.sink();
    sink.add_status_effect(target, StatusKind::Protected, duration, magnitude);
    sink.add_status_effect(target, StatusKind::Shielded, duration, magnitude);
    EffectOutcome::Applied
}

pub fn psychic_blast(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let variance = ctx.config.effects.blast_variance_pct;
    psychic_damage(ctx, variance)
}

pub fn mind_scorch(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let variance = ctx.config.effects.scorch_variance_pct;
    psychic_damage(ctx, variance)
}

/// Damage is the ability magnitude shifted by a uniform whole-percent variance.
fn psychic_damage(ctx: &mut EffectContext<'_>, variance_pct: u32) -> EffectOutcome {
    let spread = variance_pct.min(100) as i32;
    let variance = ctx.rng.roll_between(-spread, spread);
    let magnitude = i64::from(ctx.definition.magnitude);
    let amount = u32::try_from(magnitude * i64::from(100 + variance) / 100).unwrap_or(0);

    let target = ctx.target;
    let sink = ctx.sink();
    sink.add_status_effect(target, StatusKind::PsychicDamage, 0, i64::from(amount));
    sink.take_damage(target, amount);
    tracing::debug!(target = %target, amount, variance, "psychic damage dealt");
    EffectOutcome::Damaged { target, amount }
}

/// Informational only: a zero-magnitude link marker on the caster.
pub fn telepathy(ctx: &mut EffectContext<'_>) -> EffectOutcome {
    let caster = ctx.caster;
    ctx.sink().add_status_effect(caster, StatusKind::TelepathicLink, 0, 0);
    EffectOutcome::Applied
}
