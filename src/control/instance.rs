//! Control instances - one controller directing one target.
//!
//! ## Lifecycle
//!
//! ```text
//! Active --duration reaches 0--> Expired
//! Active --explicit break------> Broken
//! ```
//!
//! Both end states are terminal. An instance remembers the target's
//! resistance at the moment control was established; later changes to the
//! unit do not affect a running instance.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionKind, ActionSet, ControlTier, ControlledAction};
use crate::core::{ControlId, Countdown, UnitId};

/// Lifecycle state of a control instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlState {
    Active,
    Expired,
    Broken,
}

/// An action a controller performed, for the instance's log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformedAction {
    /// Which action.
    pub kind: ActionKind,
    /// Who it was aimed at, if anyone.
    pub target: Option<UnitId>,
    /// Turn it was performed on.
    pub turn: u32,
}

/// Parameters of a control attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRequest {
    /// Unit taking control.
    pub controller: UnitId,
    /// Unit being controlled.
    pub target: UnitId,
    /// Strength category.
    pub tier: ControlTier,
    /// Turns the control lasts.
    pub duration: u32,
}

impl ControlRequest {
    /// Build a request.
    #[must_use]
    pub const fn new(controller: UnitId, target: UnitId, tier: ControlTier, duration: u32) -> Self {
        Self {
            controller,
            target,
            tier,
            duration,
        }
    }
}

/// A mind-control relationship.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInstance {
    /// Instance id.
    pub id: ControlId,

    /// Unit giving orders.
    pub controller: UnitId,

    /// Unit being directed.
    pub target: UnitId,

    /// Strength category.
    pub tier: ControlTier,

    /// How firmly the controller holds the target, 0..=100.
    pub strength: u32,

    /// Chance per check that the target lashes back, 0..=100.
    pub break_chance: u32,

    /// Target resistance when control was established.
    pub resistance: u32,

    /// Turns left.
    pub duration: Countdown,

    /// Actions the controller may issue.
    pub actions: ActionSet,

    /// Actions performed so far.
    pub log: Vector<PerformedAction>,

    /// Lifecycle state.
    pub state: ControlState,

    /// Turn control was established.
    pub started_at: u32,

    /// Turn control ended, once it has.
    pub ended_at: Option<u32>,
}

impl ControlInstance {
    /// Is the instance still running?
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == ControlState::Active
    }

    /// Turns left.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.duration.remaining()
    }

    /// Look up an action by kind.
    #[must_use]
    pub fn action(&self, kind: ActionKind) -> Option<&ControlledAction> {
        self.actions.iter().find(|a| a.kind == kind)
    }

    /// Mutable action lookup.
    pub fn action_mut(&mut self, kind: ActionKind) -> Option<&mut ControlledAction> {
        self.actions.iter_mut().find(|a| a.kind == kind)
    }

    /// Actions ready to be issued right now.
    #[must_use]
    pub fn ready_actions(&self) -> Vec<ActionKind> {
        if !self.is_active() {
            return Vec::new();
        }
        self.actions.iter().filter(|a| a.is_ready()).map(|a| a.kind).collect()
    }

    /// Does the instance involve this unit on either side?
    #[must_use]
    pub fn involves(&self, unit: UnitId) -> bool {
        self.controller == unit || self.target == unit
    }

    pub(crate) fn finish(&mut self, state: ControlState, turn: u32) {
        self.state = state;
        self.ended_at = Some(turn);
        self.duration.clear();
    }
}
