//! # Generation Client
//!
//! Sends a `SubmissionRequest` through a `GenerationTransport` and turns the result into
//! an `Outcome`. `deliver` applies the outcome to the host: one file save on success,
//! one blocking notice on failure. Nothing here retries on its own.

use crate::domain::traits::{GenerationTransport, Host};
use crate::domain::types::SubmissionRequest;
use crate::strings::{logs, messages};
use bytes::Bytes;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { bytes: Bytes, filename: String },
    Failure { reason: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

pub struct GenerationClient {
    transport: Arc<dyn GenerationTransport>,
}

impl GenerationClient {
    pub fn new(transport: Arc<dyn GenerationTransport>) -> Self {
        Self { transport }
    }

    pub async fn submit(&self, request: &SubmissionRequest) -> Outcome {
        tracing::info!("{}", logs::submission_started(&request.name, &request.version));
        match self.transport.send(request).await {
            Ok(bytes) => {
                tracing::info!("{}", logs::submission_succeeded(&request.name, bytes.len()));
                Outcome::Success {
                    bytes,
                    filename: request.archive_name(),
                }
            }
            Err(e) => {
                tracing::warn!("{}", logs::submission_failed(&request.name, &e.to_string()));
                Outcome::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Performs the host side effects of an outcome and returns the outcome to record.
///
/// A save that fails is reported like a generation failure so the user can retry.
pub async fn deliver(outcome: Outcome, host: &dyn Host) -> Outcome {
    match outcome {
        Outcome::Success { bytes, filename } => match host.save_bytes(&bytes, &filename).await {
            Ok(path) => {
                tracing::info!("{}", logs::archive_saved(&path.display().to_string()));
                Outcome::Success { bytes, filename }
            }
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::error!("{}", logs::archive_save_failed(&filename, &reason));
                host.notify(&messages::save_failed(&filename, &reason)).await;
                Outcome::Failure { reason }
            }
        },
        Outcome::Failure { reason } => {
            host.notify(&messages::generation_failed(&reason)).await;
            Outcome::Failure { reason }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory doubles shared by the application-layer tests.

    use super::*;
    use crate::domain::traits::TransportError;
    use crate::domain::types::DoneReason;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Replies with a canned result, optionally waiting until released.
    pub struct FakeTransport {
        reply: Result<Bytes, TransportError>,
        gate: Option<Arc<Notify>>,
        pub requests: Mutex<Vec<SubmissionRequest>>,
    }

    impl FakeTransport {
        pub fn ok(bytes: &'static [u8]) -> Self {
            Self {
                reply: Ok(Bytes::from_static(bytes)),
                gate: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(reason: &str) -> Self {
            Self {
                reply: Err(TransportError::Request(reason.to_string())),
                gate: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        pub fn sent(&self) -> Vec<SubmissionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationTransport for FakeTransport {
        async fn send(&self, request: &SubmissionRequest) -> Result<Bytes, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.reply.clone()
        }
    }

    /// Records every host interaction.
    #[derive(Default)]
    pub struct RecordingHost {
        pub saved: Mutex<Vec<(Vec<u8>, String)>>,
        pub notices: Mutex<Vec<String>>,
        pub done: Mutex<Vec<DoneReason>>,
        pub fail_saves: bool,
    }

    impl RecordingHost {
        pub fn saved(&self) -> Vec<(Vec<u8>, String)> {
            self.saved.lock().unwrap().clone()
        }

        pub fn notices(&self) -> Vec<String> {
            self.notices.lock().unwrap().clone()
        }

        pub fn done(&self) -> Vec<DoneReason> {
            self.done.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Host for RecordingHost {
        async fn save_bytes(&self, bytes: &[u8], filename: &str) -> anyhow::Result<PathBuf> {
            if self.fail_saves {
                anyhow::bail!("disk full");
            }
            self.saved
                .lock()
                .unwrap()
                .push((bytes.to_vec(), filename.to_string()));
            Ok(PathBuf::from(filename))
        }

        async fn notify(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }

        fn wizard_done(&self, reason: DoneReason) {
            self.done.lock().unwrap().push(reason);
        }
    }
}
