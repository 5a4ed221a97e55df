//! Error types for psionic resolution.
//!
//! Every rejected request is reported as a [`PsiError`] and leaves the
//! encounter exactly as it was. None of these are fatal: callers retry,
//! pick another ability, or move on.

use serde::{Deserialize, Serialize};

use super::entity::{ControlId, CountermeasureId, UnitId};
use crate::abilities::AbilityType;
use crate::control::ActionKind;

/// Result alias used throughout the crate.
pub type PsiResult<T> = Result<T, PsiError>;

/// Reasons an encounter operation can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum PsiError {
    /// The unit was never registered or has left the encounter.
    #[error("unregistered unit: {0}")]
    UnregisteredUnit(UnitId),

    /// A unit with this id is already registered.
    #[error("duplicate unit: {0}")]
    DuplicateUnit(UnitId),

    /// The catalog has no definition for this ability.
    #[error("unknown ability: {0:?}")]
    UnknownAbility(AbilityType),

    /// The catalog already defines this ability.
    #[error("duplicate ability definition: {0:?}")]
    DuplicateAbility(AbilityType),

    /// The caster has not unlocked the ability.
    #[error("{unit} has not unlocked {ability:?}")]
    AbilityNotUnlocked {
        /// Caster.
        unit: UnitId,
        /// Requested ability.
        ability: AbilityType,
    },

    /// The ability's cooldown has not run out.
    #[error("{ability:?} is on cooldown for {remaining} more turns")]
    AbilityOnCooldown {
        /// Requested ability.
        ability: AbilityType,
        /// Turns left on the cooldown.
        remaining: u32,
    },

    /// The unit cannot pay the energy cost.
    #[error("insufficient energy: {unit} needs {required} but has {available}")]
    InsufficientEnergy {
        /// Unit that would pay.
        unit: UnitId,
        /// Cost of the request.
        required: u32,
        /// Energy currently available.
        available: u32,
    },

    /// The target cannot be affected by this ability at all.
    #[error("{target} is immune to {ability:?}")]
    TargetImmune {
        /// Target unit.
        target: UnitId,
        /// Requested ability.
        ability: AbilityType,
    },

    /// The ability cannot be aimed at this target.
    #[error("{ability:?} cannot target {target}")]
    InvalidTarget {
        /// Requested ability.
        ability: AbilityType,
        /// Rejected target.
        target: UnitId,
    },

    /// The target is already under an active control instance.
    #[error("{0} is already controlled")]
    TargetAlreadyControlled(UnitId),

    /// An active countermeasure protects the target.
    #[error("{0} has an active countermeasure")]
    TargetHasActiveCountermeasure(UnitId),

    /// Control and countermeasure durations must be at least one turn.
    #[error("duration must be at least one turn")]
    InvalidDuration,

    /// No control instance with this id exists.
    #[error("unknown control instance: {0}")]
    UnknownControl(ControlId),

    /// The control instance has expired or been broken.
    #[error("{0} is no longer active")]
    ControlInactive(ControlId),

    /// The action is not part of this instance's tier, or is disabled.
    #[error("{action:?} is not available on {control}")]
    ActionUnavailable {
        /// Control instance.
        control: ControlId,
        /// Requested action.
        action: ActionKind,
    },

    /// The action was used too recently.
    #[error("{action:?} on {control} is on cooldown for {remaining} more turns")]
    ActionOnCooldown {
        /// Control instance.
        control: ControlId,
        /// Requested action.
        action: ActionKind,
        /// Turns left on the cooldown.
        remaining: u32,
    },

    /// The action's target is further away than its range.
    #[error("{action:?} out of range: distance {distance}, range {range}")]
    OutOfRange {
        /// Requested action.
        action: ActionKind,
        /// Measured grid distance.
        distance: u32,
        /// Maximum allowed distance.
        range: u32,
    },

    /// A countermeasure with this id is already registered.
    #[error("duplicate countermeasure: {0}")]
    DuplicateCountermeasure(CountermeasureId),
}
