//! # Quick Generate Command
//!
//! Generates the preconfigured business application without opening the wizard.

use crate::application::launch::LaunchController;
use crate::infrastructure::console::ConsoleHost;
use crate::strings::wizard as text;
use anyhow::Result;

/// Returns whether an archive was delivered. Failures have already been shown to the user;
/// a run that is already in progress surfaces as `LaunchError::QuickGenerateBusy`.
pub async fn handle_quick(launch: &LaunchController, host: &ConsoleHost) -> Result<bool> {
    host.show(&format!("{} ...", text::QUICK_LABEL));
    host.show(text::QUICK_BUSY);
    let outcome = launch.quick_generate().await?;
    Ok(outcome.is_success())
}
