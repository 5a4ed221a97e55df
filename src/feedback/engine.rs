//! Retaliatory feedback against controllers.
//!
//! Feedback is generated around control-resolving actions, and when a target
//! fights off a control attempt:
//!
//! - a roll under the break chance produces *psionic feedback*
//! - a resistance above the threshold always produces *mental resistance*
//!
//! Both checks are independent, so one action can produce two events.
//! Intensity is `base + resistance / divisor`, clamped to the configured
//! bounds, and every event lasts a fixed number of turns after the turn it
//! was created in.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::control::ControlInstance;
use crate::core::{tick_and_prune, ControlId, Countdown, FeedbackTuning, PsiRng, Timed, UnitId};

/// Kind of retaliation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    /// The target's mind lashed back at the controller.
    PsionicFeedback,
    /// The target's resistance strained the controller.
    MentalResistance,
}

/// A retaliatory effect against a controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    /// Resisting unit.
    pub source: UnitId,

    /// Controller, or would-be controller, receiving the feedback.
    pub target: UnitId,

    /// Control instance that caused it; `None` for a resisted attempt.
    pub control: Option<ControlId>,

    /// Kind of retaliation.
    pub kind: FeedbackKind,

    /// Strength, within the configured bounds.
    pub intensity: u32,

    /// Turns left.
    pub timer: Countdown,
}

impl FeedbackEvent {
    /// Turns left.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.timer.remaining()
    }
}

impl Timed for FeedbackEvent {
    fn timer(&self) -> &Countdown {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Countdown {
        &mut self.timer
    }
}

/// Events created by one check.
pub type FeedbackBatch = SmallVec<[FeedbackEvent; 2]>;

/// Who retaliates against whom.
#[derive(Clone, Copy, Debug)]
struct Cause {
    source: UnitId,
    target: UnitId,
    control: Option<ControlId>,
    resistance: u32,
    break_chance: u32,
}

impl From<&ControlInstance> for Cause {
    fn from(instance: &ControlInstance) -> Self {
        Self {
            source: instance.target,
            target: instance.controller,
            control: Some(instance.id),
            resistance: instance.resistance,
            break_chance: instance.break_chance,
        }
    }
}

/// Generates and ages feedback events.
#[derive(Clone, Debug, Default)]
pub struct FeedbackEngine {
    events: Vec<FeedbackEvent>,
    /// Sustain feedback waiting for the end of the current aging pass.
    fresh: Vec<FeedbackEvent>,
}

impl FeedbackEngine {
    /// Create an engine with no events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run both checks after a control-resolving action.
    pub fn after_control_action(
        &mut self,
        instance: &ControlInstance,
        tuning: &FeedbackTuning,
        rng: &mut dyn PsiRng,
    ) -> FeedbackBatch {
        self.retaliate(Cause::from(instance), tuning, rng)
    }

    /// Run both checks for a control attempt that `source` fought off.
    ///
    /// `break_chance` is what the attempted control would have had.
    pub fn on_resisted(
        &mut self,
        source: UnitId,
        caster: UnitId,
        resistance: u32,
        break_chance: u32,
        tuning: &FeedbackTuning,
        rng: &mut dyn PsiRng,
    ) -> FeedbackBatch {
        let cause = Cause {
            source,
            target: caster,
            control: None,
            resistance,
            break_chance,
        };
        self.retaliate(cause, tuning, rng)
    }

    /// Per-turn struggle of a held target: only the break-chance roll.
    ///
    /// The event joins the live set at the end of the next [`tick`](Self::tick),
    /// so the pass that created it does not age it.
    pub fn sustain_check(
        &mut self,
        instance: &ControlInstance,
        tuning: &FeedbackTuning,
        rng: &mut dyn PsiRng,
    ) -> Option<FeedbackEvent> {
        if !rng.check(instance.break_chance) {
            return None;
        }
        let event = Self::event(&Cause::from(instance), FeedbackKind::PsionicFeedback, tuning);
        self.fresh.push(event.clone());
        Some(event)
    }

    /// The target broke free; the controller always takes psionic feedback.
    pub fn on_break(&mut self, instance: &ControlInstance, tuning: &FeedbackTuning) -> FeedbackEvent {
        self.emit(&Cause::from(instance), FeedbackKind::PsionicFeedback, tuning)
    }

    fn retaliate(&mut self, cause: Cause, tuning: &FeedbackTuning, rng: &mut dyn PsiRng) -> FeedbackBatch {
        let mut created = FeedbackBatch::new();
        if rng.check(cause.break_chance) {
            created.push(self.emit(&cause, FeedbackKind::PsionicFeedback, tuning));
        }
        if cause.resistance > tuning.resistance_threshold {
            created.push(self.emit(&cause, FeedbackKind::MentalResistance, tuning));
        }
        created
    }

    fn emit(&mut self, cause: &Cause, kind: FeedbackKind, tuning: &FeedbackTuning) -> FeedbackEvent {
        let event = Self::event(cause, kind, tuning);
        self.events.push(event.clone());
        event
    }

    fn event(cause: &Cause, kind: FeedbackKind, tuning: &FeedbackTuning) -> FeedbackEvent {
        let event = FeedbackEvent {
            source: cause.source,
            target: cause.target,
            control: cause.control,
            kind,
            intensity: tuning.intensity(cause.resistance),
            timer: Countdown::new(tuning.duration),
        };
        tracing::debug!(
            control = ?cause.control,
            source = %event.source,
            target = %event.target,
            kind = ?kind,
            intensity = event.intensity,
            "feedback generated"
        );
        event
    }

    /// Live events.
    #[must_use]
    pub fn events(&self) -> &[FeedbackEvent] {
        &self.events
    }

    /// Number of live events.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.events.len()
    }

    /// Summed intensity of live events against a controller.
    #[must_use]
    pub fn intensity_against(&self, controller: UnitId) -> u32 {
        self.events
            .iter()
            .filter(|e| e.target == controller)
            .map(|e| e.intensity)
            .sum()
    }

    /// Decay every event and drop the expired ones, then admit the sustain
    /// feedback created since the last pass.
    pub fn tick(&mut self) -> Vec<FeedbackEvent> {
        let expired = tick_and_prune(&mut self.events);
        self.events.append(&mut self.fresh);
        expired
    }

    /// Drop events involving a unit.
    pub fn remove_unit(&mut self, unit: UnitId) {
        self.events.retain(|e| e.source != unit && e.target != unit);
        self.fresh.retain(|e| e.source != unit && e.target != unit);
    }
}
