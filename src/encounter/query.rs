//! Read access to the unit layer.

use crate::core::{GridPos, UnitId};

/// What the core needs to know about units it does not own.
///
/// Implemented by the outer simulation. Both methods have conservative
/// defaults so a bare encounter works without a map.
pub trait UnitQuery {
    /// Where the unit stands, if it is on the grid.
    fn position(&self, unit: UnitId) -> Option<GridPos> {
        let _ = unit;
        None
    }

    /// Robotic units have no mind to control.
    fn is_robotic(&self, unit: UnitId) -> bool {
        let _ = unit;
        false
    }

    /// Grid distance between two units, when both are placed.
    fn distance(&self, from: UnitId, to: UnitId) -> Option<u32> {
        Some(self.position(from)?.distance(self.position(to)?))
    }
}

/// A unit layer that knows nothing: no positions, nothing robotic.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoUnitQuery;

impl UnitQuery for NoUnitQuery {}
