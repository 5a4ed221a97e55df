//! Ability definitions - static ability data.
//!
//! `AbilityDefinition` holds the immutable properties of an ability type:
//! what it costs, how long it cools down, how strong its effect is and who
//! it may be aimed at. Per-unit state (unlocked, cooldown remaining) is kept
//! separately in `AbilityInstance`.

use serde::{Deserialize, Serialize};

use crate::ledger::PsiSchool;

/// The psionic abilities an encounter knows how to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityType {
    Teleport,
    PsychicDominance,
    MindMerge,
    PsychicBarrier,
    PsychicShield,
    MindControl,
    PsychicBlast,
    MindScorch,
    Telepathy,
    Domination,
}

impl AbilityType {
    /// Every ability type, in declaration order.
    pub const ALL: [AbilityType; 10] = [
        AbilityType::Teleport,
        AbilityType::PsychicDominance,
        AbilityType::MindMerge,
        AbilityType::PsychicBarrier,
        AbilityType::PsychicShield,
        AbilityType::MindControl,
        AbilityType::PsychicBlast,
        AbilityType::MindScorch,
        AbilityType::Telepathy,
        AbilityType::Domination,
    ];

    /// Abilities whose effect establishes a control instance.
    ///
    /// These are refused up front when the target is already controlled or
    /// protected by a countermeasure.
    #[must_use]
    pub const fn is_control(self) -> bool {
        matches!(
            self,
            AbilityType::PsychicDominance | AbilityType::MindControl | AbilityType::Domination
        )
    }
}

/// Who an ability may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Only the caster; any other target is refused.
    SelfOnly,
    /// Any other unit (the caster included).
    Ally,
    /// Any unit except the caster.
    Enemy,
    /// Any unit.
    Any,
}

impl TargetKind {
    /// Whether `caster` may aim at a unit, given whether it is the caster itself.
    #[must_use]
    pub const fn permits(self, targets_self: bool) -> bool {
        match self {
            TargetKind::SelfOnly => targets_self,
            TargetKind::Enemy => !targets_self,
            TargetKind::Ally | TargetKind::Any => true,
        }
    }
}

/// Static ability definition.
///
/// ## Example
///
/// ```
/// use psionic_core::abilities::{AbilityDefinition, AbilityType, TargetKind};
/// use psionic_core::ledger::PsiSchool;
///
/// let control = AbilityDefinition::new(AbilityType::MindControl, "Mind Control")
///     .with_cost(30)
///     .with_cooldown(5)
///     .with_target(TargetKind::Enemy)
///     .with_school(PsiSchool::MindControl);
///
/// assert_eq!(control.cost, 30);
/// assert_eq!(control.cooldown, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    /// Which ability this defines.
    pub ability: AbilityType,

    /// Display name.
    pub name: String,

    /// Psi energy spent on a successful use.
    pub cost: u32,

    /// Turns before the ability can be used again.
    pub cooldown: u32,

    /// Base strength of the effect (damage, shield value, ...).
    pub magnitude: u32,

    /// Who the ability may be aimed at.
    pub target: TargetKind,

    /// School the ability belongs to.
    pub school: PsiSchool,
}

impl AbilityDefinition {
    /// Create a free, instant, self-targeted definition with no school.
    #[must_use]
    pub fn new(ability: AbilityType, name: impl Into<String>) -> Self {
        Self {
            ability,
            name: name.into(),
            cost: 0,
            cooldown: 0,
            magnitude: 0,
            target: TargetKind::SelfOnly,
            school: PsiSchool::None,
        }
    }

    /// Set the energy cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set the cooldown (builder pattern).
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set the effect magnitude (builder pattern).
    #[must_use]
    pub fn with_magnitude(mut self, magnitude: u32) -> Self {
        self.magnitude = magnitude;
        self
    }

    /// Set the target kind (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    /// Set the school (builder pattern).
    #[must_use]
    pub fn with_school(mut self, school: PsiSchool) -> Self {
        self.school = school;
        self
    }
}
