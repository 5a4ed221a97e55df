//! # psionic-core
//!
//! Psionic combat and mind-control resolution for turn-based tactical
//! simulations.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: all randomness flows through an injected
//!    [`PsiRng`]. A seeded [`GameRng`] replays an encounter exactly;
//!    [`ScriptedRng`] pins outcomes in tests.
//!
//! 2. **Nothing is fatal**: every rejected request is a [`PsiError`] and
//!    leaves the encounter untouched. Preconditions are checked before any
//!    mutation.
//!
//! 3. **Table-driven effects**: abilities are dispatched through an
//!    [`EffectRegistry`] of handler functions, never a central match.
//!
//! 4. **One timer model**: cooldowns, durations and expiries are all
//!    [`Countdown`]s decayed by the fixed tick pipeline.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, timers, configuration, errors
//! - `ledger`: per-unit energy pools, resistance, immunities, schools
//! - `abilities`: ability catalog and per-unit unlock/cooldown tracking
//! - `status`: status effects and the sink handlers write to
//! - `effects`: ability resolver, handler registry, standard handlers
//! - `control`: control tiers, controlled actions, control instances
//! - `feedback`: retaliation against controllers
//! - `countermeasures`: defences that block new control attempts
//! - `encounter`: the `PsiEncounter` facade and its tick pipeline

pub mod core;
pub mod ledger;
pub mod abilities;
pub mod status;
pub mod effects;
pub mod control;
pub mod feedback;
pub mod countermeasures;
pub mod encounter;

// Re-export commonly used types
pub use crate::core::{
    ControlId, CountermeasureId, GridPos, UnitId,
    GameRng, GameRngState, PsiRng, ScriptedRng,
    Countdown,
    PsiConfig, FeedbackTuning, ControlTuning, EffectTuning,
    PsiError, PsiResult,
};

pub use crate::ledger::{PsiLedger, PsiSchool, PsiUnit};

pub use crate::abilities::{
    AbilityCatalog, AbilityDefinition, AbilityTracker, AbilityType, TargetKind,
};

pub use crate::status::{StatusBook, StatusKind, StatusSink};

pub use crate::effects::{
    AbilityOutcome, AbilityResolver, EffectContext, EffectOutcome, EffectRegistry,
};

pub use crate::control::{
    ActionKind, ControlInstance, ControlManager, ControlRequest, ControlState, ControlTier,
};

pub use crate::feedback::{FeedbackEngine, FeedbackEvent, FeedbackKind};

pub use crate::countermeasures::{Countermeasure, CountermeasureRegistry};

pub use crate::encounter::{
    EncounterState, EncounterStats, NoUnitQuery, Presentation, PsiEncounter, TickReport, UnitQuery,
};
