//! Psionic unit records.
//!
//! A `PsiUnit` is the ledger's view of a unit: its energy pool and the
//! static traits that gate abilities aimed at it (resistance, immunities).
//! Everything else about the unit (hit points, position, inventory) belongs
//! to the outer simulation.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::abilities::AbilityType;
use crate::core::UnitId;

/// Highest possible resistance score.
pub const MAX_RESISTANCE: u32 = 100;

/// Psionic specialization. Each school adds a flat regeneration bonus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PsiSchool {
    #[default]
    None,
    Telepathy,
    MindControl,
    PsychicWarfare,
    Teleportation,
}

impl PsiSchool {
    /// Extra energy regenerated per turn.
    ///
    /// ```
    /// use psionic_core::ledger::PsiSchool;
    ///
    /// assert_eq!(PsiSchool::PsychicWarfare.regen_bonus(), 3);
    /// assert_eq!(PsiSchool::None.regen_bonus(), 0);
    /// ```
    #[must_use]
    pub const fn regen_bonus(self) -> u32 {
        match self {
            PsiSchool::None => 0,
            PsiSchool::Telepathy => 2,
            PsiSchool::MindControl => 1,
            PsiSchool::PsychicWarfare => 3,
            PsiSchool::Teleportation => 1,
        }
    }
}

/// A unit's energy pool and psionic traits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsiUnit {
    /// Unit identity.
    pub id: UnitId,

    /// Current energy. May exceed `capacity` after regeneration.
    pub energy: u32,

    /// Nominal pool size; the starting energy.
    pub capacity: u32,

    /// Energy regained per turn before the school bonus.
    pub regen: u32,

    /// Resistance to psionic effects, 0..=100.
    pub resistance: u32,

    /// Abilities that can never affect this unit.
    pub immunities: OrdSet<AbilityType>,

    /// Psionic school.
    pub school: PsiSchool,
}

impl PsiUnit {
    /// A unit with a full pool, no resistance, no immunities and no school.
    #[must_use]
    pub fn new(id: UnitId, capacity: u32, regen: u32) -> Self {
        Self {
            id,
            energy: capacity,
            capacity,
            regen,
            resistance: 0,
            immunities: OrdSet::new(),
            school: PsiSchool::None,
        }
    }

    /// Energy gained per regeneration tick, school bonus included.
    #[must_use]
    pub fn regen_per_turn(&self) -> u32 {
        self.regen + self.school.regen_bonus()
    }

    /// Is this unit immune to the ability?
    #[must_use]
    pub fn is_immune_to(&self, ability: AbilityType) -> bool {
        self.immunities.contains(&ability)
    }

    /// Can the unit pay `cost` right now?
    #[must_use]
    pub fn can_afford(&self, cost: u32) -> bool {
        self.energy >= cost
    }
}
