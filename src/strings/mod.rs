//! # Strings Module
//!
//! Centralizes user-facing strings and log message templates.

pub mod logs;
pub mod messages;
pub mod wizard;
