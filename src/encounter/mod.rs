//! The encounter: state, statistics, unit-layer boundary and the facade.
//!
//! ## Key Types
//!
//! - `PsiEncounter`: entry point; owns everything and runs the tick pipeline
//! - `EncounterState`: the mutable components of one encounter
//! - `EncounterStats`: monotonic counters for observability
//! - `UnitQuery`: positions and unit types supplied by the outer simulation
//! - `Presentation`: visual/sound notifications for the presentation layer

mod engine;
mod presentation;
mod query;
mod state;
mod stats;

pub use engine::{PsiEncounter, TickReport};
pub use presentation::{EffectChannel, Presentation};
pub use query::{NoUnitQuery, UnitQuery};
pub use state::EncounterState;
pub use stats::EncounterStats;
