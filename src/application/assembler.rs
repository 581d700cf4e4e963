//! # Submission Assembler
//!
//! Projects a `WizardState` into the request body expected by the generation service.

use crate::application::state::WizardState;
use crate::domain::types::{Capability, ProjectOption, SubmissionRequest};

/// Builds the request from the session's current data. Walks the fixed universes in
/// canonical order, so toggle history never affects the output.
pub fn build(state: &WizardState) -> SubmissionRequest {
    SubmissionRequest {
        name: state.name.trim().to_string(),
        version: state.version.trim().to_string(),
        options: ProjectOption::ALL
            .iter()
            .filter(|o| state.option_enabled(**o))
            .map(|o| o.as_str().to_string())
            .collect(),
        capabilities: Capability::ALL
            .iter()
            .filter(|c| state.capability_enabled(**c))
            .map(|c| c.as_str().to_string())
            .collect(),
    }
}
