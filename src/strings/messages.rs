//! # Messages
//!
//! User-facing notices shown by the host.

pub fn generation_failed(reason: &str) -> String {
    format!("Not possible to generate the project: {reason}")
}

pub fn save_failed(filename: &str, err: &str) -> String {
    format!("Generated `{filename}` but could not save it: {err}")
}

pub fn archive_saved(path: &str) -> String {
    format!("📦 Saved `{path}`")
}

pub fn unknown_flag(flag: &str) -> String {
    format!("Unknown option or capability `{flag}`.")
}

pub fn flag_toggled(flag: &str, enabled: bool) -> String {
    format!("`{flag}` {}", if enabled { "enabled" } else { "disabled" })
}

pub fn unknown_input(input: &str) -> String {
    format!("❓ Unknown input `{input}`.")
}

pub fn not_allowed(err: &str) -> String {
    format!("⚠️ {err}")
}
