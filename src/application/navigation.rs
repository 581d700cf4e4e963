//! # Navigation Controller
//!
//! Enforces the step-gating protocol over a `WizardState`: forward moves need the
//! current step to be complete, backward moves are free, and entering the terminal
//! step freezes a fresh `SubmissionRequest` and starts the submission.
//!
//! Everything here is synchronous. The session layer (`launch`) performs the actual
//! submission and the `wizard.done` signalling.

use crate::application::assembler;
use crate::application::state::{SubmissionPhase, WizardState};
use crate::application::steps::{StepId, StepRegistry};
use crate::domain::types::SubmissionRequest;
use crate::strings::wizard as labels;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("step `{0}` is incomplete")]
    Blocked(StepId),
    #[error("already at the first step")]
    AtStart,
    #[error("a submission is in flight")]
    SubmissionInFlight,
    #[error("only available on the final step")]
    NotAtTerminal,
    #[error("no submission outcome has been recorded yet")]
    NoOutcome,
    #[error("the wizard is closed")]
    SessionClosed,
}

/// Result of a successful forward move.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub step: StepId,
    pub label: &'static str,
    /// Set when the move entered the terminal step
    pub submission: Option<SubmissionRequest>,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    steps: Arc<StepRegistry>,
}

impl NavigationController {
    pub fn new(steps: Arc<StepRegistry>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &StepRegistry {
        &self.steps
    }

    /// Fresh state positioned at the first step.
    pub fn initial_state(&self) -> WizardState {
        WizardState::new(self.steps.first().id)
    }

    /// Label of the forward affordance shown while `step` is current.
    pub fn label(&self, step: StepId) -> &'static str {
        if self.steps.is_terminal(step) {
            labels::FINISH_LABEL
        } else if self.steps.next(step).is_some_and(|s| self.steps.is_terminal(s.id)) {
            labels::GENERATE_LABEL
        } else {
            labels::NEXT_LABEL
        }
    }

    /// First step at or before `upto` whose predicate does not hold.
    fn first_incomplete(&self, state: &WizardState, upto: StepId) -> Option<StepId> {
        self.steps
            .preceding(upto)
            .iter()
            .chain(self.steps.get(upto))
            .find(|s| !(s.is_complete)(state))
            .map(|s| s.id)
    }

    /// Every step behind the cursor must stay complete. Edits are checked against this
    /// before they are committed.
    pub fn check_reached(&self, state: &WizardState) -> Result<(), NavigationError> {
        match self
            .steps
            .preceding(state.current_step)
            .iter()
            .find(|s| !(s.is_complete)(state))
        {
            Some(step) => Err(NavigationError::Blocked(step.id)),
            None => Ok(()),
        }
    }

    pub fn advance(&self, state: &mut WizardState) -> Result<Advance, NavigationError> {
        let current = state.current_step;
        if let Some(blocked) = self.first_incomplete(state, current) {
            return Err(NavigationError::Blocked(blocked));
        }
        let next = self
            .steps
            .next(current)
            .ok_or(NavigationError::Blocked(current))?
            .id;

        state.current_step = next;
        tracing::debug!("Wizard advanced {} -> {}", current, next);

        let submission = if self.steps.is_terminal(next) {
            Some(self.reach_terminal(state))
        } else {
            None
        };

        Ok(Advance {
            step: next,
            label: self.label(next),
            submission,
        })
    }

    pub fn retreat(&self, state: &mut WizardState) -> Result<StepId, NavigationError> {
        let current = state.current_step;
        if self.steps.is_terminal(current) && state.submission_in_flight() {
            return Err(NavigationError::SubmissionInFlight);
        }
        let previous = self
            .steps
            .previous(current)
            .ok_or(NavigationError::AtStart)?
            .id;

        if self.steps.is_terminal(current) {
            state.submission = SubmissionPhase::Idle;
        }
        state.current_step = previous;
        tracing::debug!("Wizard retreated {} -> {}", current, previous);
        Ok(previous)
    }

    /// Entry hook of the terminal step. Runs on every entry so edits made after a
    /// retreat are picked up.
    pub fn reach_terminal(&self, state: &mut WizardState) -> SubmissionRequest {
        let request = assembler::build(state);
        state.request = Some(request.clone());
        state.submission = SubmissionPhase::InFlight;
        request
    }

    /// Starts another submission from the terminal step with a rebuilt request.
    pub fn retry(&self, state: &mut WizardState) -> Result<SubmissionRequest, NavigationError> {
        if !self.steps.is_terminal(state.current_step) {
            return Err(NavigationError::NotAtTerminal);
        }
        if state.submission_in_flight() {
            return Err(NavigationError::SubmissionInFlight);
        }
        if let Some(blocked) = self
            .steps
            .previous(state.current_step)
            .and_then(|s| self.first_incomplete(state, s.id))
        {
            return Err(NavigationError::Blocked(blocked));
        }
        Ok(self.reach_terminal(state))
    }

    /// Checks whether `finish` may be emitted for this state.
    pub fn finish(&self, state: &WizardState) -> Result<(), NavigationError> {
        if !self.steps.is_terminal(state.current_step) {
            return Err(NavigationError::NotAtTerminal);
        }
        if state.submission_in_flight() {
            return Err(NavigationError::SubmissionInFlight);
        }
        if !state.submission_complete() {
            return Err(NavigationError::NoOutcome);
        }
        Ok(())
    }
}
