//! Ability type → effect handler table.
//!
//! Resolution never matches on the ability type. It looks the handler up
//! here, so a new ability only needs a catalog entry and a registered
//! handler.
//!
//! ```
//! use psionic_core::abilities::AbilityType;
//! use psionic_core::effects::{EffectContext, EffectOutcome, EffectRegistry};
//!
//! fn quiet_teleport(_ctx: &mut EffectContext<'_>) -> EffectOutcome {
//!     EffectOutcome::Applied
//! }
//!
//! let mut registry = EffectRegistry::standard();
//! let previous = registry.register(AbilityType::Teleport, quiet_teleport);
//! assert!(previous.is_some());
//! ```

use std::fmt;

use rustc_hash::FxHashMap;

use super::handlers;
use super::outcome::EffectOutcome;
use super::EffectContext;
use crate::abilities::AbilityType;

/// An effect handler. Called only after the ability has been paid for.
pub type EffectHandler = fn(&mut EffectContext<'_>) -> EffectOutcome;

/// Registered handlers, keyed by ability type.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    handlers: FxHashMap<AbilityType, EffectHandler>,
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut abilities: Vec<_> = self.handlers.keys().collect();
        abilities.sort();
        f.debug_struct("EffectRegistry").field("abilities", &abilities).finish()
    }
}

impl EffectRegistry {
    /// Create a registry with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a handler for every standard ability.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_handler(AbilityType::Teleport, handlers::teleport)
            .with_handler(AbilityType::PsychicDominance, handlers::psychic_dominance)
            .with_handler(AbilityType::MindMerge, handlers::mind_merge)
            .with_handler(AbilityType::PsychicBarrier, handlers::psychic_barrier)
            .with_handler(AbilityType::PsychicShield, handlers::psychic_shield)
            .with_handler(AbilityType::MindControl, handlers::mind_control)
            .with_handler(AbilityType::PsychicBlast, handlers::psychic_blast)
            .with_handler(AbilityType::MindScorch, handlers::mind_scorch)
            .with_handler(AbilityType::Telepathy, handlers::telepathy)
            .with_handler(AbilityType::Domination, handlers::domination)
    }

    /// Set the handler for an ability. Returns the handler it replaced.
    pub fn register(&mut self, ability: AbilityType, handler: EffectHandler) -> Option<EffectHandler> {
        self.handlers.insert(ability, handler)
    }

    /// Set a handler (builder pattern).
    #[must_use]
    pub fn with_handler(mut self, ability: AbilityType, handler: EffectHandler) -> Self {
        self.register(ability, handler);
        self
    }

    /// Look up the handler for an ability.
    #[must_use]
    pub fn get(&self, ability: AbilityType) -> Option<EffectHandler> {
        self.handlers.get(&ability).copied()
    }

    /// Is a handler registered?
    #[must_use]
    pub fn contains(&self, ability: AbilityType) -> bool {
        self.handlers.contains_key(&ability)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
