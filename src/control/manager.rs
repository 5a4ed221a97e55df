//! Control instance manager.
//!
//! Creates, ages and terminates control instances, and enforces that a
//! target is held by at most one active instance at a time. Finished
//! instances are kept (in their terminal state) so their logs stay
//! queryable until [`ControlManager::clear_finished`] is called.

use std::collections::BTreeMap;

use im::Vector;
use rustc_hash::FxHashMap;

use super::action::ActionKind;
use super::instance::{ControlInstance, ControlRequest, ControlState, PerformedAction};
use crate::core::{ControlId, ControlTuning, Countdown, PsiError, PsiResult, UnitId};
use crate::countermeasures::CountermeasureRegistry;

/// Owner of every control instance in an encounter.
#[derive(Clone, Debug, Default)]
pub struct ControlManager {
    instances: BTreeMap<ControlId, ControlInstance>,
    active_by_target: FxHashMap<UnitId, ControlId>,
    next_id: u32,
}

impl ControlManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that a new control over `target` would be allowed.
    ///
    /// Does not mutate anything; used by the resolver before it spends energy.
    pub fn ensure_controllable(&self, target: UnitId, countermeasures: &CountermeasureRegistry) -> PsiResult<()> {
        if self.active_by_target.contains_key(&target) {
            return Err(PsiError::TargetAlreadyControlled(target));
        }
        if countermeasures.has_active(target) {
            return Err(PsiError::TargetHasActiveCountermeasure(target));
        }
        Ok(())
    }

    /// Establish control.
    ///
    /// `resistance` is the target's current resistance; it is snapshotted
    /// into the instance and drives strength and break chance.
    pub fn attempt_control(
        &mut self,
        request: ControlRequest,
        resistance: u32,
        countermeasures: &CountermeasureRegistry,
        tuning: &ControlTuning,
        turn: u32,
    ) -> PsiResult<&ControlInstance> {
        self.ensure_controllable(request.target, countermeasures)?;
        if request.duration == 0 {
            return Err(PsiError::InvalidDuration);
        }

        let id = ControlId::new(self.next_id);
        self.next_id += 1;

        let instance = ControlInstance {
            id,
            controller: request.controller,
            target: request.target,
            tier: request.tier,
            strength: tuning.strength(request.tier, resistance),
            break_chance: tuning.break_chance(request.tier, resistance),
            resistance,
            duration: Countdown::new(request.duration),
            actions: request.tier.action_set(),
            log: Vector::new(),
            state: ControlState::Active,
            started_at: turn,
            ended_at: None,
        };

        tracing::info!(
            control = %id,
            controller = %instance.controller,
            target = %instance.target,
            tier = ?instance.tier,
            strength = instance.strength,
            break_chance = instance.break_chance,
            duration = request.duration,
            "control established"
        );

        self.active_by_target.insert(request.target, id);
        Ok(&*self.instances.entry(id).or_insert(instance))
    }

    /// Have the controlled unit perform an action.
    ///
    /// `distance` is the grid distance from the controlled unit to the
    /// action's target, when known; unknown distances skip the range check.
    pub fn execute_action(
        &mut self,
        id: ControlId,
        kind: ActionKind,
        action_target: Option<UnitId>,
        distance: Option<u32>,
        turn: u32,
    ) -> PsiResult<&ControlInstance> {
        let instance = self.instances.get_mut(&id).ok_or(PsiError::UnknownControl(id))?;
        if !instance.is_active() {
            return Err(PsiError::ControlInactive(id));
        }

        let action = instance
            .action_mut(kind)
            .filter(|a| a.available)
            .ok_or(PsiError::ActionUnavailable { control: id, action: kind })?;
        if !action.cooldown.is_elapsed() {
            return Err(PsiError::ActionOnCooldown {
                control: id,
                action: kind,
                remaining: action.cooldown.remaining(),
            });
        }
        if let Some(distance) = distance {
            if distance > action.range {
                return Err(PsiError::OutOfRange {
                    action: kind,
                    distance,
                    range: action.range,
                });
            }
        }

        action.cooldown.restart(action.base_cooldown);
        instance.log.push_back(PerformedAction {
            kind,
            target: action_target,
            turn,
        });

        tracing::debug!(control = %id, action = ?kind, "controlled action executed");
        Ok(&*instance)
    }

    /// Age every active instance by one turn.
    ///
    /// Returns the instances that expired on this tick.
    pub fn tick(&mut self, turn: u32) -> Vec<ControlId> {
        let mut expired = Vec::new();
        for instance in self.instances.values_mut().filter(|i| i.is_active()) {
            for action in &mut instance.actions {
                action.cooldown.tick();
            }
            if instance.duration.tick() {
                instance.finish(ControlState::Expired, turn);
                expired.push(instance.id);
            }
        }
        for id in &expired {
            self.release_target(*id);
            tracing::info!(control = %id, "control expired");
        }
        expired
    }

    /// Force an active instance to end.
    pub fn break_control(&mut self, id: ControlId, turn: u32) -> PsiResult<&ControlInstance> {
        let instance = self.instances.get_mut(&id).ok_or(PsiError::UnknownControl(id))?;
        if !instance.is_active() {
            return Err(PsiError::ControlInactive(id));
        }
        instance.finish(ControlState::Broken, turn);
        let target = instance.target;
        self.active_by_target.remove(&target);
        tracing::info!(control = %id, target = %target, "control broken");
        Ok(&self.instances[&id])
    }

    fn release_target(&mut self, id: ControlId) {
        if let Some(instance) = self.instances.get(&id) {
            if self.active_by_target.get(&instance.target) == Some(&id) {
                self.active_by_target.remove(&instance.target);
            }
        }
    }

    /// Look up an instance, active or finished.
    #[must_use]
    pub fn get(&self, id: ControlId) -> Option<&ControlInstance> {
        self.instances.get(&id)
    }

    /// The active instance holding a target, if any.
    #[must_use]
    pub fn active_for_target(&self, target: UnitId) -> Option<&ControlInstance> {
        self.active_by_target.get(&target).and_then(|id| self.instances.get(id))
    }

    /// Is the target currently controlled?
    #[must_use]
    pub fn is_controlled(&self, target: UnitId) -> bool {
        self.active_by_target.contains_key(&target)
    }

    /// Active instances in creation order.
    pub fn active(&self) -> impl Iterator<Item = &ControlInstance> {
        self.instances.values().filter(|i| i.is_active())
    }

    /// Ids of active instances in creation order.
    #[must_use]
    pub fn active_ids(&self) -> Vec<ControlId> {
        self.active().map(|i| i.id).collect()
    }

    /// Number of active instances.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_by_target.len()
    }

    /// Active instances a unit takes part in, as controller or target.
    #[must_use]
    pub fn active_involving(&self, unit: UnitId) -> Vec<ControlId> {
        self.active().filter(|i| i.involves(unit)).map(|i| i.id).collect()
    }

    /// Drop finished instances. Returns how many were removed.
    pub fn clear_finished(&mut self) -> usize {
        let before = self.instances.len();
        self.instances.retain(|_, i| i.is_active());
        before - self.instances.len()
    }
}
