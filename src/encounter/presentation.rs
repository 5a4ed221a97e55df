//! Notifications for the presentation layer.
//!
//! The core never renders or plays anything. When a control instance starts
//! or ends it queues one notification per channel; the caller drains them
//! with `PsiEncounter::drain_presentation` and forwards them to whatever
//! draws the swirl and plays the hum.

use serde::{Deserialize, Serialize};

use crate::control::ControlInstance;
use crate::core::{ControlId, UnitId};

/// Output channel of a presentation effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectChannel {
    Visual,
    Sound,
}

impl EffectChannel {
    /// Both channels, in notification order.
    pub const ALL: [EffectChannel; 2] = [EffectChannel::Visual, EffectChannel::Sound];
}

/// A presentation effect registration or release, keyed by control id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// Start an effect on the controlled unit.
    Created {
        control: ControlId,
        target: UnitId,
        channel: EffectChannel,
        duration: u32,
        intensity: u32,
    },
    /// Stop the effect registered for this control.
    Expired {
        control: ControlId,
        target: UnitId,
        channel: EffectChannel,
    },
}

impl Presentation {
    /// Notifications for a freshly established control.
    #[must_use]
    pub fn created(instance: &ControlInstance) -> [Presentation; 2] {
        EffectChannel::ALL.map(|channel| Presentation::Created {
            control: instance.id,
            target: instance.target,
            channel,
            duration: instance.duration.total(),
            intensity: instance.strength,
        })
    }

    /// Notifications for a control that expired or was broken.
    #[must_use]
    pub fn expired(instance: &ControlInstance) -> [Presentation; 2] {
        EffectChannel::ALL.map(|channel| Presentation::Expired {
            control: instance.id,
            target: instance.target,
            channel,
        })
    }

    /// Control id the notification belongs to.
    #[must_use]
    pub fn control(&self) -> ControlId {
        match self {
            Presentation::Created { control, .. } | Presentation::Expired { control, .. } => *control,
        }
    }
}
