//! # Wizard Strings
//!
//! Strings and templates used by the interactive wizard.
//! Includes button labels and the per-step prompt rendering.

use crate::application::state::{SubmissionPhase, WizardState};
use crate::application::steps::{StepDefinition, StepId};
use crate::domain::types::{Capability, ProjectOption};

pub const NEXT_LABEL: &str = "Next >";
pub const GENERATE_LABEL: &str = "Generate";
pub const FINISH_LABEL: &str = "Close";

pub const LOADING: &str = "Loading Business Application wizard... please wait";
pub const CANCELLED: &str = "❌ Wizard cancelled.";
pub const FINISHED: &str = "✅ Wizard closed.";
pub const INCOMPLETE: &str = "Please enter both a project name and a version before continuing.";
pub const AT_START: &str = "Already at the first step.";
pub const IN_FLIGHT: &str = "⏳ Please wait ... generating app....";

pub const QUICK_LABEL: &str = "Generate preconfigured application";
pub const QUICK_BUSY: &str = "Please wait ... generating app....";

pub const COMMANDS: &str = "Commands: `name <value>`, `version <value>`, `toggle <flag>`, \
`.next`, `.back`, `.retry`, `.finish`, `.cancel`";

fn checkbox(enabled: bool) -> &'static str {
    if enabled { "[x]" } else { "[ ]" }
}

pub fn format_wizard_step(
    step: &StepDefinition,
    position: usize,
    total: usize,
    label: &str,
    state: &WizardState,
) -> String {
    let mut output = format!("### 🧙 Business Application ({}/{}): {}\n", position + 1, total, step.title);

    match step.id {
        StepId::DetailsGeneral => {
            output.push_str("Enter a name and a version for the new application.\n");
            output.push_str(&format!("**Name**: {}\n", state.name));
            output.push_str(&format!("**Version**: {}\n", state.version));
        }
        StepId::DetailsOptions => {
            output.push_str("**Project options** (`toggle <flag>`)\n");
            for option in ProjectOption::ALL {
                output.push_str(&format!("{} {}\n", checkbox(state.option_enabled(option)), option));
            }
            output.push_str("**Capabilities** (`toggle <flag>`)\n");
            for capability in Capability::ALL {
                output.push_str(&format!(
                    "{} {}\n",
                    checkbox(state.capability_enabled(capability)),
                    capability
                ));
            }
        }
        StepId::ReviewSummary => {
            output.push_str(&format!("**Name**: {}\n**Version**: {}\n", state.name, state.version));
            let options: Vec<&str> = ProjectOption::ALL
                .iter()
                .filter(|o| state.option_enabled(**o))
                .map(|o| o.as_str())
                .collect();
            let capabilities: Vec<&str> = Capability::ALL
                .iter()
                .filter(|c| state.capability_enabled(**c))
                .map(|c| c.as_str())
                .collect();
            output.push_str(&format!("**Options**: {}\n", options.join(", ")));
            output.push_str(&format!("**Capabilities**: {}\n", capabilities.join(", ")));
        }
        StepId::ReviewProgress => {
            let status = match &state.submission {
                SubmissionPhase::Idle => "Waiting to generate.".to_string(),
                SubmissionPhase::InFlight => IN_FLIGHT.to_string(),
                SubmissionPhase::Succeeded => "✅ Application generated.".to_string(),
                SubmissionPhase::Failed(reason) => {
                    format!("❌ Not possible to generate the project ({reason}). `.retry` to try again.")
                }
            };
            output.push_str(&status);
            output.push('\n');
        }
    }

    output.push_str(&format!("\n`.next` → {label}"));
    output
}
