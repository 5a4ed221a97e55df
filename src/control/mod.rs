//! Mind control: tiers, controlled actions, instances and their manager.
//!
//! ## Key Types
//!
//! - `ControlTier`: Full / Partial / Influence
//! - `ControlledAction`: an order the controller may issue
//! - `ControlInstance`: one controller directing one target
//! - `ControlManager`: lifecycle and the one-controller-per-target rule

mod action;
mod instance;
mod manager;

pub use action::{ActionKind, ActionSet, ControlTier, ControlledAction};
pub use instance::{ControlInstance, ControlRequest, ControlState, PerformedAction};
pub use manager::ControlManager;
