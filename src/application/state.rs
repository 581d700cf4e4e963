//! # Wizard State
//!
//! Defines the mutable aggregate (`WizardState`) a single wizard session collects:
//! identity fields, option/capability toggles, the step cursor and the submission phase.
//! One instance per open session; it is dropped when the session closes.

use crate::application::generation::Outcome;
use crate::application::steps::StepId;
use crate::domain::types::{Capability, ProjectOption, SubmissionRequest};
use std::collections::BTreeSet;

/// Where the session stands on the submission axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct WizardState {
    pub name: String,
    pub version: String,
    options: BTreeSet<ProjectOption>,
    capabilities: BTreeSet<Capability>,
    pub current_step: StepId,
    pub submission: SubmissionPhase,
    /// Request frozen on the last entry into the terminal step
    pub request: Option<SubmissionRequest>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            options: ProjectOption::ALL.into_iter().collect(),
            capabilities: BTreeSet::from([Capability::Bpm]),
            current_step: StepId::DetailsGeneral,
            submission: SubmissionPhase::Idle,
            request: None,
        }
    }
}

impl WizardState {
    pub fn new(first_step: StepId) -> Self {
        Self {
            current_step: first_step,
            ..Self::default()
        }
    }

    pub fn has_identity(&self) -> bool {
        !self.name.trim().is_empty() && !self.version.trim().is_empty()
    }

    pub fn option_enabled(&self, option: ProjectOption) -> bool {
        self.options.contains(&option)
    }

    pub fn capability_enabled(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn set_option(&mut self, option: ProjectOption, enabled: bool) {
        if enabled {
            self.options.insert(option);
        } else {
            self.options.remove(&option);
        }
    }

    pub fn set_capability(&mut self, capability: Capability, enabled: bool) {
        if enabled {
            self.capabilities.insert(capability);
        } else {
            self.capabilities.remove(&capability);
        }
    }

    /// Flips an option or capability by its wire name. Unknown names are ignored
    /// and reported as `None`; otherwise returns the new value.
    pub fn toggle(&mut self, flag: &str) -> Option<bool> {
        if let Some(option) = ProjectOption::from_str(flag) {
            let enabled = !self.option_enabled(option);
            self.set_option(option, enabled);
            return Some(enabled);
        }
        if let Some(capability) = Capability::from_str(flag) {
            let enabled = !self.capability_enabled(capability);
            self.set_capability(capability, enabled);
            return Some(enabled);
        }
        None
    }

    /// Records the result of the in-flight submission. Either way the submission is
    /// complete and no longer in flight.
    pub fn record_outcome(&mut self, outcome: &Outcome) {
        self.submission = match outcome {
            Outcome::Success { .. } => SubmissionPhase::Succeeded,
            Outcome::Failure { reason } => SubmissionPhase::Failed(reason.clone()),
        };
    }

    pub fn submission_in_flight(&self) -> bool {
        self.submission == SubmissionPhase::InFlight
    }

    pub fn submission_complete(&self) -> bool {
        matches!(
            self.submission,
            SubmissionPhase::Succeeded | SubmissionPhase::Failed(_)
        )
    }
}
