//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (`GenerationTransport`, `Host`).

pub mod console;
pub mod files;
pub mod http;
