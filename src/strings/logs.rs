//! # Log Strings
//!
//! Message templates for `tracing` output.

pub const STARTUP: &str = "Starting bizapp-wizard...";

pub fn config_loaded(url: &str) -> String {
    format!("Using generation service at {url}")
}

pub fn wizard_opened(id: u64) -> String {
    format!("Wizard session {id} opened")
}

pub fn wizard_closed(id: u64, reason: &str) -> String {
    format!("Wizard session {id} closed ({reason})")
}

pub fn submission_started(name: &str, version: &str) -> String {
    format!("Generating {name} {version}...")
}

pub fn submission_succeeded(name: &str, size: usize) -> String {
    format!("Generated {name} ({size} bytes)")
}

pub fn submission_failed(name: &str, err: &str) -> String {
    format!("Generation of {name} failed: {err}")
}

pub fn submission_discarded(id: u64) -> String {
    format!("Wizard session {id} is closed, discarding submission result")
}

pub fn submission_task_failed(id: u64, err: &str) -> String {
    format!("Submission task of session {id} failed: {err}")
}

pub fn unexpected_content_type(content_type: &str) -> String {
    format!("Generation service answered with unexpected content type {content_type}")
}

pub fn archive_saved(path: &str) -> String {
    format!("Archive saved to {path}")
}

pub fn archive_overwritten(path: &str) -> String {
    format!("Overwriting existing archive {path}")
}

pub fn archive_save_failed(filename: &str, err: &str) -> String {
    format!("Failed to save {filename}: {err}")
}
