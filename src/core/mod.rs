//! Core types: identifiers, RNG, timers, configuration, errors.
//!
//! Everything here is independent of psionic rules; the ledger, ability,
//! control and feedback modules build on it.

pub mod entity;
pub mod rng;
pub mod timer;
pub mod config;
pub mod error;

pub use entity::{ControlId, CountermeasureId, GridPos, UnitId};
pub use rng::{GameRng, GameRngState, PsiRng, ScriptedRng};
pub use timer::{tick_and_prune, Countdown, Timed};
pub use config::{ControlTuning, EffectTuning, FeedbackTuning, PsiConfig};
pub use error::{PsiError, PsiResult};
