//! Defensive countermeasures against mind control.

mod registry;

pub use registry::{Countermeasure, CountermeasureRegistry};
