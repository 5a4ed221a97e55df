//! Mutable state of one encounter.
//!
//! `EncounterState` bundles every component that changes while an encounter
//! runs. Ability handlers receive it through `EffectContext`; operations that
//! touch several components at once (establishing or breaking control,
//! raising a countermeasure, removing a unit) live here so they keep the
//! components consistent with each other.

use crate::abilities::AbilityTracker;
use crate::control::{ActionKind, ControlInstance, ControlManager, ControlRequest, ControlTier};
use crate::core::{ControlId, PsiConfig, PsiResult, PsiRng, UnitId};
use crate::countermeasures::{Countermeasure, CountermeasureRegistry};
use crate::feedback::{FeedbackBatch, FeedbackEngine, FeedbackEvent};
use crate::ledger::PsiLedger;
use crate::status::{StatusBook, StatusKind};

use super::presentation::Presentation;
use super::stats::EncounterStats;

/// Everything an encounter mutates.
#[derive(Clone, Debug, Default)]
pub struct EncounterState {
    pub(crate) ledger: PsiLedger,
    pub(crate) abilities: AbilityTracker,
    pub(crate) statuses: StatusBook,
    pub(crate) controls: ControlManager,
    pub(crate) feedback: FeedbackEngine,
    pub(crate) countermeasures: CountermeasureRegistry,
    pub(crate) stats: EncounterStats,
    pub(crate) notifications: Vec<Presentation>,
    pub(crate) turn: u32,
}

impl EncounterState {
    /// Create an empty state at turn 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ledger(&self) -> &PsiLedger {
        &self.ledger
    }

    /// Mutable ledger access for handlers that move energy around.
    pub fn ledger_mut(&mut self) -> &mut PsiLedger {
        &mut self.ledger
    }

    #[must_use]
    pub fn abilities(&self) -> &AbilityTracker {
        &self.abilities
    }

    #[must_use]
    pub fn statuses(&self) -> &StatusBook {
        &self.statuses
    }

    /// The status sink handlers write to.
    pub fn statuses_mut(&mut self) -> &mut StatusBook {
        &mut self.statuses
    }

    #[must_use]
    pub fn controls(&self) -> &ControlManager {
        &self.controls
    }

    #[must_use]
    pub fn feedback(&self) -> &FeedbackEngine {
        &self.feedback
    }

    #[must_use]
    pub fn countermeasures(&self) -> &CountermeasureRegistry {
        &self.countermeasures
    }

    #[must_use]
    pub fn stats(&self) -> &EncounterStats {
        &self.stats
    }

    /// Current turn number.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Put `request.target` under control and run the post-action feedback checks.
    ///
    /// The target's current resistance is snapshotted into the instance.
    pub fn establish_control(
        &mut self,
        request: ControlRequest,
        config: &PsiConfig,
        rng: &mut dyn PsiRng,
    ) -> PsiResult<ControlId> {
        let resistance = self.ledger.require(request.target)?.resistance;
        let instance = self.controls.attempt_control(
            request,
            resistance,
            &self.countermeasures,
            &config.control,
            self.turn,
        )?;

        self.notifications.extend(Presentation::created(instance));
        let created = self.feedback.after_control_action(instance, &config.feedback, rng);
        self.stats.record_feedback(created.len());
        Ok(instance.id)
    }

    /// `target` fought off a control attempt by `caster`.
    ///
    /// Runs the feedback checks with the break chance a `tier` control
    /// would have had; the caster is the one who takes the feedback.
    pub fn resist_control(
        &mut self,
        caster: UnitId,
        target: UnitId,
        tier: ControlTier,
        config: &PsiConfig,
        rng: &mut dyn PsiRng,
    ) -> PsiResult<FeedbackBatch> {
        let resistance = self.ledger.require(target)?.resistance;
        let break_chance = config.control.break_chance(tier, resistance);
        let created = self
            .feedback
            .on_resisted(target, caster, resistance, break_chance, &config.feedback, rng);
        self.stats.record_feedback(created.len());
        Ok(created)
    }

    /// Issue an order through an active control.
    ///
    /// Returns the feedback the order provoked.
    pub fn execute_action(
        &mut self,
        control: ControlId,
        action: ActionKind,
        action_target: Option<UnitId>,
        distance: Option<u32>,
        config: &PsiConfig,
        rng: &mut dyn PsiRng,
    ) -> PsiResult<FeedbackBatch> {
        let instance = self
            .controls
            .execute_action(control, action, action_target, distance, self.turn)?;
        let created = self.feedback.after_control_action(instance, &config.feedback, rng);
        self.stats.record_feedback(created.len());
        Ok(created)
    }

    /// Force a control to end. The freed target lashes back at its controller.
    pub fn break_control(&mut self, control: ControlId, config: &PsiConfig) -> PsiResult<FeedbackEvent> {
        let instance = self.controls.break_control(control, self.turn)?;
        release(&mut self.statuses, &mut self.notifications, instance);
        self.stats.record_break();

        let event = self.feedback.on_break(instance, &config.feedback);
        self.stats.record_feedback(1);
        Ok(event)
    }

    /// Activate a countermeasure.
    ///
    /// A dispelling countermeasure also breaks a control already held over
    /// its owner; that control's id is returned.
    pub fn add_countermeasure(
        &mut self,
        countermeasure: Countermeasure,
        config: &PsiConfig,
    ) -> PsiResult<Option<ControlId>> {
        self.ledger.require(countermeasure.owner)?;
        let added = self.countermeasures.add(countermeasure, self.turn)?;
        let (id, owner, dispel) = (added.id, added.owner, added.dispel);
        self.stats.record_countermeasure();
        tracing::debug!(countermeasure = %id, owner = %owner, dispel, "countermeasure activated");

        if !dispel {
            return Ok(None);
        }
        match self.controls.active_for_target(owner).map(|i| i.id) {
            Some(control) => {
                self.break_control(control, config)?;
                Ok(Some(control))
            }
            None => Ok(None),
        }
    }

    /// Take a unit out of the encounter, ending every control it takes part in.
    ///
    /// Controls are broken without feedback; the other side has nobody left
    /// to retaliate against or to be retaliated by.
    pub fn remove_unit(&mut self, unit: UnitId) -> PsiResult<()> {
        self.ledger.require(unit)?;
        for control in self.controls.active_involving(unit) {
            let instance = self.controls.break_control(control, self.turn)?;
            release(&mut self.statuses, &mut self.notifications, instance);
            self.stats.record_break();
        }
        self.ledger.remove(unit);
        self.abilities.remove_unit(unit);
        self.statuses.remove_unit(unit);
        self.feedback.remove_unit(unit);
        self.countermeasures.remove_unit(unit);
        tracing::info!(unit = %unit, "unit removed from encounter");
        Ok(())
    }

    /// Presentation notifications queued since the last drain.
    #[must_use]
    pub fn pending_presentation(&self) -> &[Presentation] {
        &self.notifications
    }

    /// Take the queued presentation notifications.
    pub fn drain_presentation(&mut self) -> Vec<Presentation> {
        std::mem::take(&mut self.notifications)
    }
}

/// Drop the control statuses of a freed target and queue the expiry notifications.
pub(crate) fn release(statuses: &mut StatusBook, notifications: &mut Vec<Presentation>, instance: &ControlInstance) {
    statuses.clear_status(instance.target, StatusKind::Controlled);
    statuses.clear_status(instance.target, StatusKind::Dominated);
    notifications.extend(Presentation::expired(instance));
}
