//! Encounter configuration.
//!
//! All tunable numbers live here so an encounter can be rebalanced without
//! touching resolution code. `PsiConfig::default()` reproduces the standard
//! rules; builders override individual values.
//!
//! ```
//! use psionic_core::core::PsiConfig;
//!
//! let config = PsiConfig::default()
//!     .with_base_success_chance(90)
//!     .with_success_floor(10);
//!
//! assert_eq!(config.success_chance(30), 60);
//! assert_eq!(config.success_chance(95), 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::control::ControlTier;

/// Top-level encounter configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsiConfig {
    /// Success chance against a target with zero resistance.
    pub base_success_chance: u32,

    /// Lowest success chance a non-immune target can reduce an ability to.
    /// Immune targets are always at 0 regardless of this floor.
    pub success_floor: u32,

    /// Feedback rules.
    pub feedback: FeedbackTuning,

    /// Per-tier control rules.
    pub control: ControlTuning,

    /// Constants used by the standard effect handlers.
    pub effects: EffectTuning,
}

impl Default for PsiConfig {
    fn default() -> Self {
        Self {
            base_success_chance: 85,
            success_floor: 0,
            feedback: FeedbackTuning::default(),
            control: ControlTuning::default(),
            effects: EffectTuning::default(),
        }
    }
}

impl PsiConfig {
    /// Set the zero-resistance success chance.
    #[must_use]
    pub fn with_base_success_chance(mut self, chance: u32) -> Self {
        self.base_success_chance = chance.min(100);
        self
    }

    /// Set the minimum success chance for non-immune targets.
    #[must_use]
    pub fn with_success_floor(mut self, floor: u32) -> Self {
        self.success_floor = floor.min(100);
        self
    }

    /// Replace the feedback rules.
    #[must_use]
    pub fn with_feedback(mut self, feedback: FeedbackTuning) -> Self {
        self.feedback = feedback;
        self
    }

    /// Replace the control rules.
    #[must_use]
    pub fn with_control(mut self, control: ControlTuning) -> Self {
        self.control = control;
        self
    }

    /// Replace the effect constants.
    #[must_use]
    pub fn with_effects(mut self, effects: EffectTuning) -> Self {
        self.effects = effects;
        self
    }

    /// Resistance-adjusted success chance for a non-immune target.
    ///
    /// `clamp(floor, 100, base - resistance)`. Non-increasing in resistance.
    #[must_use]
    pub fn success_chance(&self, resistance: u32) -> u32 {
        let floor = self.success_floor.min(100);
        self.base_success_chance
            .saturating_sub(resistance)
            .clamp(floor, 100)
    }
}

/// Feedback generation rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackTuning {
    /// Resistance strictly above this always produces mental resistance feedback.
    pub resistance_threshold: u32,
    /// Intensity before the resistance bonus.
    pub base_intensity: u32,
    /// Resistance points per point of extra intensity.
    pub resistance_divisor: u32,
    /// Lower intensity bound.
    pub min_intensity: u32,
    /// Upper intensity bound.
    pub max_intensity: u32,
    /// Turns a feedback event lasts.
    pub duration: u32,
}

impl Default for FeedbackTuning {
    fn default() -> Self {
        Self {
            resistance_threshold: 50,
            base_intensity: 20,
            resistance_divisor: 10,
            min_intensity: 10,
            max_intensity: 100,
            duration: 3,
        }
    }
}

impl FeedbackTuning {
    /// Intensity of a feedback event caused by a unit with `resistance`.
    #[must_use]
    pub fn intensity(&self, resistance: u32) -> u32 {
        let bonus = resistance.checked_div(self.resistance_divisor).unwrap_or(0);
        let low = self.min_intensity.min(self.max_intensity);
        self.base_intensity.saturating_add(bonus).clamp(low, self.max_intensity)
    }
}

/// Strength and break chance bases per control tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlTuning {
    /// Strength of a Full control before resistance.
    pub full_strength: u32,
    /// Strength of a Partial control before resistance.
    pub partial_strength: u32,
    /// Strength of an Influence before resistance.
    pub influence_strength: u32,
    /// Break chance of a Full control before resistance.
    pub full_break_chance: u32,
    /// Break chance of a Partial control before resistance.
    pub partial_break_chance: u32,
    /// Break chance of an Influence before resistance.
    pub influence_break_chance: u32,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            full_strength: 100,
            partial_strength: 75,
            influence_strength: 50,
            full_break_chance: 10,
            partial_break_chance: 20,
            influence_break_chance: 30,
        }
    }
}

impl ControlTuning {
    /// Control strength: tier base minus half the resistance, within 0..=100.
    #[must_use]
    pub fn strength(&self, tier: ControlTier, resistance: u32) -> u32 {
        let base = match tier {
            ControlTier::Full => self.full_strength,
            ControlTier::Partial => self.partial_strength,
            ControlTier::Influence => self.influence_strength,
        };
        base.saturating_sub(resistance / 2).min(100)
    }

    /// Break chance: tier base plus a quarter of the resistance, within 0..=100.
    #[must_use]
    pub fn break_chance(&self, tier: ControlTier, resistance: u32) -> u32 {
        let base = match tier {
            ControlTier::Full => self.full_break_chance,
            ControlTier::Partial => self.partial_break_chance,
            ControlTier::Influence => self.influence_break_chance,
        };
        base.saturating_add(resistance / 4).min(100)
    }
}

/// Constants used by the standard ability handlers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTuning {
    /// Independent sub-roll for Psychic Dominance.
    pub dominance_chance: u32,
    /// Independent sub-roll for Mind Control.
    pub mind_control_chance: u32,
    /// Independent sub-roll for Domination.
    pub domination_chance: u32,
    /// Turns a Psychic Dominance control lasts.
    pub dominance_duration: u32,
    /// Turns a Mind Control control lasts.
    pub mind_control_duration: u32,
    /// Turns a Domination control lasts.
    pub domination_duration: u32,
    /// Turns the merged status lasts.
    pub merge_duration: u32,
    /// Turns Psychic Barrier protects.
    pub barrier_duration: u32,
    /// Turns Psychic Shield protects.
    pub shield_duration: u32,
    /// Damage variance of Psychic Blast, in percent either way.
    pub blast_variance_pct: u32,
    /// Damage variance of Mind Scorch, in percent either way.
    pub scorch_variance_pct: u32,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            dominance_chance: 90,
            mind_control_chance: 85,
            domination_chance: 80,
            dominance_duration: 3,
            mind_control_duration: 3,
            domination_duration: 5,
            merge_duration: 4,
            barrier_duration: 5,
            shield_duration: 3,
            blast_variance_pct: 20,
            scorch_variance_pct: 15,
        }
    }
}
