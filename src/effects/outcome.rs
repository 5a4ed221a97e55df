//! What an ability use did.

use serde::{Deserialize, Serialize};

use crate::core::{ControlId, PsiError, UnitId};

/// Result of one effect handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// Statuses were applied; nothing else to report.
    Applied,

    /// A control instance was established.
    Controlled(ControlId),

    /// Psychic damage was dealt.
    Damaged { target: UnitId, amount: u32 },

    /// Two minds merged; both now hold `energy`.
    Merged { energy: u32 },

    /// The handler's own success roll missed. Cost and cooldown still apply.
    Fizzled { chance: u32, roll: u32 },

    /// The effect could not be applied after the ability was paid for.
    Rejected(PsiError),
}

/// Result of an ability attempt that passed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityOutcome {
    /// The success roll passed: cost paid, cooldown started, effect dispatched.
    Resolved {
        chance: u32,
        roll: u32,
        effect: EffectOutcome,
    },

    /// The target resisted. Nothing was spent.
    Resisted { chance: u32, roll: u32 },
}

impl AbilityOutcome {
    /// Did the success roll pass?
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, AbilityOutcome::Resolved { .. })
    }

    /// The handler's outcome, for resolved attempts.
    #[must_use]
    pub fn effect(&self) -> Option<&EffectOutcome> {
        match self {
            AbilityOutcome::Resolved { effect, .. } => Some(effect),
            AbilityOutcome::Resisted { .. } => None,
        }
    }

    /// Control established by this attempt, if any.
    #[must_use]
    pub fn control(&self) -> Option<ControlId> {
        match self.effect() {
            Some(EffectOutcome::Controlled(id)) => Some(*id),
            _ => None,
        }
    }
}
