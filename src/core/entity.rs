//! Identifiers for the things an encounter tracks.
//!
//! - `UnitId`: a unit taking part in the encounter (caster, target, controller)
//! - `ControlId`: one mind-control relationship
//! - `CountermeasureId`: one defensive countermeasure
//!
//! Units are allocated by the outer simulation; the encounter never invents a
//! `UnitId`. Control ids are allocated by `ControlManager`, countermeasure ids
//! by whoever creates the countermeasure.

use serde::{Deserialize, Serialize};

/// Identifier of a unit in the encounter.
///
/// ```
/// use psionic_core::core::UnitId;
///
/// let unit = UnitId::new(7);
/// assert_eq!(unit.raw(), 7);
/// assert_eq!(unit.to_string(), "Unit(7)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a new unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// Identifier of a control instance.
///
/// Allocated sequentially, so ordering by id is ordering by creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ControlId(pub u32);

impl ControlId {
    /// Create a new control ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Control({})", self.0)
    }
}

/// Identifier of a countermeasure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountermeasureId(pub u32);

impl CountermeasureId {
    /// Create a new countermeasure ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CountermeasureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Countermeasure({})", self.0)
    }
}

/// Integer position on the tactical grid.
///
/// Positions are owned by the outer simulation and only read here for range
/// checks on controlled actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Create a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (diagonal moves cost 1).
    ///
    /// ```
    /// use psionic_core::core::GridPos;
    ///
    /// assert_eq!(GridPos::new(0, 0).distance(GridPos::new(3, -5)), 5);
    /// ```
    #[must_use]
    pub fn distance(self, other: GridPos) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }
}
