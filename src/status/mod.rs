//! Status effects and the sink abilities apply them through.

mod book;
mod effect;

pub use book::{StatusBook, StatusSink};
pub use effect::{StatusEffect, StatusKind};
