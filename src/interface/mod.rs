//! # Interface Layer
//!
//! Terminal-facing entry points that drive the application layer.

pub mod commands;
