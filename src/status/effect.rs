//! Status effects applied by psionic abilities.

use serde::{Deserialize, Serialize};

use crate::core::{Countdown, Timed};

/// Kinds of status the standard abilities apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Transient marker left on a unit that just teleported.
    Teleported,
    /// Mirrors the teleport cooldown so the unit layer can display it.
    TeleportCooldown,
    /// Unit is under mind control.
    Controlled,
    /// Unit is dominated.
    Dominated,
    /// Unit shares a mind merge.
    Merged,
    /// Unit is protected by a psychic barrier or shield.
    Protected,
    /// Shield points; magnitude is the shield value.
    Shielded,
    /// Instantaneous psychic damage; magnitude is the damage dealt.
    PsychicDamage,
    /// Informational telepathic link; no gameplay effect.
    TelepathicLink,
}

/// A status on a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// What kind of status.
    pub kind: StatusKind,

    /// Effect strength; meaning depends on the kind.
    pub magnitude: i64,

    /// Turns left. Zero-duration statuses disappear on the next tick.
    pub timer: Countdown,
}

impl StatusEffect {
    /// Create a status lasting `duration` turns.
    #[must_use]
    pub fn new(kind: StatusKind, duration: u32, magnitude: i64) -> Self {
        Self {
            kind,
            magnitude,
            timer: Countdown::new(duration),
        }
    }

    /// Turns left.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.timer.remaining()
    }
}

impl Timed for StatusEffect {
    fn timer(&self) -> &Countdown {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Countdown {
        &mut self.timer
    }
}
