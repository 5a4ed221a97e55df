//! Ability effects and their resolution.
//!
//! - `AbilityResolver`: validates a use request and rolls for success
//! - `EffectRegistry`: maps each ability type to its handler function
//! - `EffectContext`: what a handler is allowed to touch
//! - `handlers`: the standard handler for every ability in the catalog
//!
//! ## Adding an ability
//!
//! Register its definition in the `AbilityCatalog` and a handler in the
//! `EffectRegistry`. Nothing in the resolver needs to change.

mod context;
pub mod handlers;
mod outcome;
mod registry;
mod resolver;

pub use context::EffectContext;
pub use outcome::{AbilityOutcome, EffectOutcome};
pub use registry::{EffectHandler, EffectRegistry};
pub use resolver::AbilityResolver;
