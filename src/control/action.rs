//! Control tiers and the actions a controller may issue.
//!
//! The tier of a control instance decides which actions exist on it:
//!
//! | Tier      | Actions                          |
//! |-----------|----------------------------------|
//! | Full      | move, attack, defend, use-ability|
//! | Partial   | move, defend                     |
//! | Influence | move (shorter range, dearer)     |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Countdown;

/// Strength category of a control relationship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlTier {
    Full,
    Partial,
    Influence,
}

impl ControlTier {
    /// The action set a new instance of this tier starts with.
    #[must_use]
    pub fn action_set(self) -> ActionSet {
        match self {
            ControlTier::Full => SmallVec::from_iter([
                ControlledAction::new(ActionKind::Move, 1, 6, 0),
                ControlledAction::new(ActionKind::Attack, 2, 8, 1),
                ControlledAction::new(ActionKind::Defend, 1, 0, 1),
                ControlledAction::new(ActionKind::UseAbility, 2, 8, 2),
            ]),
            ControlTier::Partial => SmallVec::from_iter([
                ControlledAction::new(ActionKind::Move, 1, 6, 0),
                ControlledAction::new(ActionKind::Defend, 1, 0, 1),
            ]),
            ControlTier::Influence => SmallVec::from_iter([ControlledAction::new(ActionKind::Move, 2, 3, 1)]),
        }
    }
}

/// What a controller can make the controlled unit do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    Attack,
    Defend,
    UseAbility,
}

/// The actions available on one control instance.
pub type ActionSet = SmallVec<[ControlledAction; 4]>;

/// One action available to a controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlledAction {
    /// Which action.
    pub kind: ActionKind,

    /// Action points it costs the controlled unit.
    pub ap_cost: u32,

    /// Maximum grid distance to the action's target.
    pub range: u32,

    /// Cooldown started each time the action is used.
    pub base_cooldown: u32,

    /// Turns until the action can be used again.
    pub cooldown: Countdown,

    /// Disabled actions are refused even when off cooldown.
    pub available: bool,
}

impl ControlledAction {
    /// An available action, ready to use.
    #[must_use]
    pub fn new(kind: ActionKind, ap_cost: u32, range: u32, base_cooldown: u32) -> Self {
        Self {
            kind,
            ap_cost,
            range,
            base_cooldown,
            cooldown: Countdown::elapsed(),
            available: true,
        }
    }

    /// Available and off cooldown.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.available && self.cooldown.is_elapsed()
    }
}
