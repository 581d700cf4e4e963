//! # Application Layer
//!
//! Contains the wizard state machine and its orchestration: the step registry,
//! navigation rules, request assembly, the generation client and session launching.

pub mod assembler;
pub mod generation;
pub mod launch;
pub mod navigation;
pub mod state;
pub mod steps;
