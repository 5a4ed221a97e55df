//! Ability system: definitions, catalog, and per-unit instances.
//!
//! ## Key Types
//!
//! - `AbilityType`: The abilities the resolver understands
//! - `AbilityDefinition`: Static ability data (cost, cooldown, magnitude)
//! - `AbilityCatalog`: Definition lookup, shared read-only
//! - `AbilityTracker`: Which unit has unlocked what, and cooldowns

pub mod definition;
pub mod catalog;
pub mod tracker;

pub use definition::{AbilityDefinition, AbilityType, TargetKind};
pub use catalog::AbilityCatalog;
pub use tracker::{AbilityInstance, AbilityTracker};
