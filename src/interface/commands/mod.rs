//! # Command Handlers
//!
//! Handler functions for the two entry points: the interactive wizard and quick generate.

pub mod quick;
pub mod wizard;
