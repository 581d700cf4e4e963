//! # Domain Traits
//!
//! Abstract interfaces for the collaborators the wizard talks to (generation
//! service transport, host environment). Implementations live in the
//! Infrastructure layer; tests substitute in-memory fakes.

use crate::domain::types::{DoneReason, SubmissionRequest};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single generation call. Every variant is treated alike by the
/// wizard; the text only feeds the notice and the logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP {0}")]
    Status(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// Sends a generation request and returns the archive bytes.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn send(&self, request: &SubmissionRequest) -> Result<Bytes, TransportError>;
}

/// The environment hosting the wizard (terminal, browser, test harness).
#[async_trait]
pub trait Host: Send + Sync {
    /// Save a generated archive under the given file name.
    async fn save_bytes(&self, bytes: &[u8], filename: &str) -> anyhow::Result<PathBuf>;

    /// Present a blocking notice to the user.
    async fn notify(&self, message: &str);

    /// Receives the `wizard.done` signal once per session.
    fn wizard_done(&self, _reason: DoneReason) {}
}
