//! Everything a handler may read or change.

use crate::abilities::AbilityDefinition;
use crate::core::{PsiConfig, PsiRng, UnitId};
use crate::encounter::EncounterState;
use crate::status::StatusSink;

/// Borrowed view of an encounter handed to an effect handler.
pub struct EffectContext<'a> {
    /// Unit using the ability.
    pub caster: UnitId,
    /// Unit the ability was aimed at (the caster for self-only abilities).
    pub target: UnitId,
    /// Definition of the ability being resolved.
    pub definition: &'a AbilityDefinition,
    /// Encounter configuration.
    pub config: &'a PsiConfig,
    /// Encounter state.
    pub state: &'a mut EncounterState,
    /// Randomness for sub-rolls and variance.
    pub rng: &'a mut dyn PsiRng,
}

impl EffectContext<'_> {
    /// The status sink statuses and damage are sent to.
    pub fn sink(&mut self) -> &mut dyn StatusSink {
        self.state.statuses_mut()
    }
}
