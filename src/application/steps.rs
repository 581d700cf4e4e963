//! # Step Registry
//!
//! The static, ordered list of wizard steps and their completeness predicates.
//! Built once at startup and shared read-only by every session.

use crate::application::state::WizardState;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    DetailsGeneral,
    DetailsOptions,
    ReviewSummary,
    ReviewProgress,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::DetailsGeneral => "details-general",
            StepId::DetailsOptions => "details-options",
            StepId::ReviewSummary => "review-summary",
            StepId::ReviewProgress => "review-progress",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type CompletenessCheck = fn(&WizardState) -> bool;

#[derive(Clone)]
pub struct StepDefinition {
    pub id: StepId,
    pub order: usize,
    pub title: &'static str,
    pub is_complete: CompletenessCheck,
}

impl StepDefinition {
    pub fn new(id: StepId, order: usize, title: &'static str, is_complete: CompletenessCheck) -> Self {
        Self {
            id,
            order,
            title,
            is_complete,
        }
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("id", &self.id)
            .field("order", &self.order)
            .field("title", &self.title)
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a wizard needs at least one step")]
    Empty,
    #[error("step `{0}` is registered twice")]
    DuplicateStep(StepId),
    #[error("step orders must run 0..{expected} without gaps or repeats, found {found}")]
    BadOrder { expected: usize, found: usize },
}

/// Ordered step sequence. Index in `steps` equals the step's `order`.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<StepDefinition>,
}

impl StepRegistry {
    #[allow(dead_code)]
    pub fn new(mut steps: Vec<StepDefinition>) -> Result<Self, RegistryError> {
        if steps.is_empty() {
            return Err(RegistryError::Empty);
        }
        steps.sort_by_key(|s| s.order);
        for (index, step) in steps.iter().enumerate() {
            if step.order != index {
                return Err(RegistryError::BadOrder {
                    expected: steps.len(),
                    found: step.order,
                });
            }
            if steps[..index].iter().any(|s| s.id == step.id) {
                return Err(RegistryError::DuplicateStep(step.id));
            }
        }
        Ok(Self { steps })
    }

    /// General details, options, review summary, then the generation step.
    pub fn standard() -> Self {
        Self {
            steps: vec![
                StepDefinition::new(StepId::DetailsGeneral, 0, "General", WizardState::has_identity),
                StepDefinition::new(StepId::DetailsOptions, 1, "Options", |_| true),
                StepDefinition::new(StepId::ReviewSummary, 2, "Review", |_| true),
                StepDefinition::new(
                    StepId::ReviewProgress,
                    3,
                    "Generate",
                    WizardState::submission_complete,
                ),
            ],
        }
    }

    pub fn first(&self) -> &StepDefinition {
        &self.steps[0]
    }

    pub fn terminal(&self) -> &StepDefinition {
        &self.steps[self.steps.len() - 1]
    }

    pub fn is_terminal(&self, id: StepId) -> bool {
        self.terminal().id == id
    }

    pub fn get(&self, id: StepId) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.get(id).map(|s| s.order)
    }

    pub fn previous(&self, id: StepId) -> Option<&StepDefinition> {
        let index = self.index_of(id)?;
        index.checked_sub(1).map(|i| &self.steps[i])
    }

    /// Steps ordered strictly before `id`.
    pub fn preceding(&self, id: StepId) -> &[StepDefinition] {
        match self.index_of(id) {
            Some(index) => &self.steps[..index],
            None => &[],
        }
    }

    pub fn next(&self, id: StepId) -> Option<&StepDefinition> {
        let index = self.index_of(id)?;
        self.steps.get(index + 1)
    }

    /// Unknown steps are never complete.
    pub fn is_complete(&self, id: StepId, state: &WizardState) -> bool {
        self.get(id).is_some_and(|s| (s.is_complete)(state))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sequence() {
        let registry = StepRegistry::standard();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.first().id, StepId::DetailsGeneral);
        assert_eq!(registry.terminal().id, StepId::ReviewProgress);
        assert_eq!(registry.index_of(StepId::ReviewSummary), Some(2));
        assert!(registry.previous(StepId::DetailsGeneral).is_none());
        assert!(registry.next(StepId::ReviewProgress).is_none());
        assert_eq!(
            registry.next(StepId::DetailsGeneral).map(|s| s.id),
            Some(StepId::DetailsOptions)
        );
        assert_eq!(
            registry.previous(StepId::ReviewProgress).map(|s| s.id),
            Some(StepId::ReviewSummary)
        );
        assert!(registry.preceding(StepId::DetailsGeneral).is_empty());
        let before_review: Vec<StepId> =
            registry.preceding(StepId::ReviewSummary).iter().map(|s| s.id).collect();
        assert_eq!(before_review, vec![StepId::DetailsGeneral, StepId::DetailsOptions]);
    }

    #[test]
    fn test_standard_predicates() {
        let registry = StepRegistry::standard();
        let mut state = WizardState::default();
        assert!(!registry.is_complete(StepId::DetailsGeneral, &state));
        assert!(registry.is_complete(StepId::DetailsOptions, &state));
        assert!(!registry.is_complete(StepId::ReviewProgress, &state));

        state.name = "app".to_string();
        state.version = "1.0".to_string();
        assert!(registry.is_complete(StepId::DetailsGeneral, &state));
    }

    #[test]
    fn test_new_sorts_by_order() {
        let registry = StepRegistry::new(vec![
            StepDefinition::new(StepId::ReviewSummary, 1, "Review", |_| true),
            StepDefinition::new(StepId::DetailsGeneral, 0, "General", |_| true),
        ])
        .unwrap();
        assert_eq!(registry.first().id, StepId::DetailsGeneral);
        assert_eq!(registry.terminal().id, StepId::ReviewSummary);
    }

    #[test]
    fn test_new_rejects_gaps() {
        let err = StepRegistry::new(vec![
            StepDefinition::new(StepId::DetailsGeneral, 0, "General", |_| true),
            StepDefinition::new(StepId::ReviewSummary, 2, "Review", |_| true),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::BadOrder { expected: 2, found: 2 });
    }

    #[test]
    fn test_new_rejects_duplicates_and_empty() {
        assert_eq!(StepRegistry::new(vec![]).unwrap_err(), RegistryError::Empty);
        let err = StepRegistry::new(vec![
            StepDefinition::new(StepId::DetailsGeneral, 0, "General", |_| true),
            StepDefinition::new(StepId::DetailsGeneral, 1, "Again", |_| true),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateStep(StepId::DetailsGeneral));
    }
}
