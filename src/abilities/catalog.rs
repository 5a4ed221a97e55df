//! Ability catalog for definition lookup.
//!
//! The catalog is built once, then shared read-only between encounters
//! (typically behind an `Arc`).

use rustc_hash::FxHashMap;

use super::definition::{AbilityDefinition, AbilityType, TargetKind};
use crate::core::{PsiError, PsiResult};
use crate::ledger::PsiSchool;

/// Registry of ability definitions.
///
/// ## Example
///
/// ```
/// use psionic_core::abilities::{AbilityCatalog, AbilityType};
///
/// let catalog = AbilityCatalog::standard();
/// let control = catalog.get(AbilityType::MindControl).unwrap();
/// assert_eq!(control.cost, 30);
/// assert_eq!(control.cooldown, 5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    definitions: FxHashMap<AbilityType, AbilityDefinition>,
}

impl AbilityCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard definitions for every ability type.
    #[must_use]
    pub fn standard() -> Self {
        let mut definitions = FxHashMap::default();
        for def in standard_definitions() {
            definitions.insert(def.ability, def);
        }
        Self { definitions }
    }

    /// Register a definition. Refuses a second definition for the same ability.
    pub fn register(&mut self, definition: AbilityDefinition) -> PsiResult<()> {
        if self.definitions.contains_key(&definition.ability) {
            return Err(PsiError::DuplicateAbility(definition.ability));
        }
        self.definitions.insert(definition.ability, definition);
        Ok(())
    }

    /// Register a definition, replacing any existing one (builder pattern).
    #[must_use]
    pub fn with_definition(mut self, definition: AbilityDefinition) -> Self {
        self.definitions.insert(definition.ability, definition);
        self
    }

    /// Get a definition.
    #[must_use]
    pub fn get(&self, ability: AbilityType) -> Option<&AbilityDefinition> {
        self.definitions.get(&ability)
    }

    /// Get a definition or `UnknownAbility`.
    pub fn require(&self, ability: AbilityType) -> PsiResult<&AbilityDefinition> {
        self.get(ability).ok_or(PsiError::UnknownAbility(ability))
    }

    /// Check if an ability is defined.
    #[must_use]
    pub fn contains(&self, ability: AbilityType) -> bool {
        self.definitions.contains_key(&ability)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.definitions.values()
    }

    /// Definitions belonging to one school, sorted by ability.
    #[must_use]
    pub fn by_school(&self, school: PsiSchool) -> Vec<&AbilityDefinition> {
        let mut found: Vec<_> = self.definitions.values().filter(|d| d.school == school).collect();
        found.sort_by_key(|d| d.ability);
        found
    }
}

fn standard_definitions() -> [AbilityDefinition; 10] {
    use AbilityType as A;
    [
        AbilityDefinition::new(A::Teleport, "Teleport")
            .with_cost(20)
            .with_cooldown(3)
            .with_target(TargetKind::SelfOnly)
            .with_school(PsiSchool::Teleportation),
        AbilityDefinition::new(A::PsychicDominance, "Psychic Dominance")
            .with_cost(40)
            .with_cooldown(6)
            .with_target(TargetKind::Enemy)
            .with_school(PsiSchool::MindControl),
        AbilityDefinition::new(A::MindMerge, "Mind Merge")
            .with_cost(25)
            .with_cooldown(4)
            .with_target(TargetKind::Ally)
            .with_school(PsiSchool::Telepathy),
        AbilityDefinition::new(A::PsychicBarrier, "Psychic Barrier")
            .with_cost(20)
            .with_cooldown(4)
            .with_magnitude(30)
            .with_target(TargetKind::Ally)
            .with_school(PsiSchool::Telepathy),
        AbilityDefinition::new(A::PsychicShield, "Psychic Shield")
            .with_cost(15)
            .with_cooldown(3)
            .with_magnitude(20)
            .with_target(TargetKind::Ally)
            .with_school(PsiSchool::Telepathy),
        AbilityDefinition::new(A::MindControl, "Mind Control")
            .with_cost(30)
            .with_cooldown(5)
            .with_target(TargetKind::Enemy)
            .with_school(PsiSchool::MindControl),
        AbilityDefinition::new(A::PsychicBlast, "Psychic Blast")
            .with_cost(25)
            .with_cooldown(2)
            .with_magnitude(40)
            .with_target(TargetKind::Enemy)
            .with_school(PsiSchool::PsychicWarfare),
        AbilityDefinition::new(A::MindScorch, "Mind Scorch")
            .with_cost(35)
            .with_cooldown(3)
            .with_magnitude(60)
            .with_target(TargetKind::Enemy)
            .with_school(PsiSchool::PsychicWarfare),
        AbilityDefinition::new(A::Telepathy, "Telepathy")
            .with_cost(10)
            .with_cooldown(1)
            .with_target(TargetKind::Any)
            .with_school(PsiSchool::Telepathy),
        AbilityDefinition::new(A::Domination, "Domination")
            .with_cost(50)
            .with_cooldown(8)
            .with_target(TargetKind::Enemy)
            .with_school(PsiSchool::MindControl),
    ]
}
