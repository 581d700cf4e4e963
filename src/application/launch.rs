//! # Launch Controller
//!
//! Entry point of the wizard. `open_wizard` creates an independent `WizardSession` and
//! registers its `wizard.done` listener; the first cancel/finish signal closes the session
//! and drops the listener. `quick_generate` skips the wizard and submits the
//! preconfigured application.

use crate::application::generation::{self, GenerationClient, Outcome};
use crate::application::navigation::{Advance, NavigationController, NavigationError};
use crate::application::state::WizardState;
use crate::application::steps::{StepId, StepRegistry};
use crate::domain::traits::Host;
use crate::domain::types::{DoneReason, SubmissionRequest};
use crate::strings::logs;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub type SessionId = u64;

type DoneListener = Box<dyn FnOnce(DoneReason) + Send>;
type ListenerTable = Arc<StdMutex<HashMap<SessionId, DoneListener>>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    #[error("a quick generation is already running")]
    QuickGenerateBusy,
}

pub struct LaunchController {
    steps: Arc<StepRegistry>,
    client: Arc<GenerationClient>,
    host: Arc<dyn Host>,
    listeners: ListenerTable,
    next_id: AtomicU64,
    quick_enabled: AtomicBool,
}

impl LaunchController {
    pub fn new(steps: Arc<StepRegistry>, client: Arc<GenerationClient>, host: Arc<dyn Host>) -> Self {
        Self {
            steps,
            client,
            host,
            listeners: Arc::new(StdMutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            quick_enabled: AtomicBool::new(true),
        }
    }

    /// Opens a fresh session positioned at the first step.
    pub fn open_wizard(&self) -> WizardSession {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let navigator = NavigationController::new(self.steps.clone());
        let open = Arc::new(AtomicBool::new(true));

        let listener_open = open.clone();
        let listener_host = self.host.clone();
        let listener: DoneListener = Box::new(move |reason| {
            listener_open.store(false, Ordering::SeqCst);
            tracing::info!("{}", logs::wizard_closed(id, reason.as_str()));
            listener_host.wizard_done(reason);
        });
        lock_table(&self.listeners).insert(id, listener);

        tracing::info!("{}", logs::wizard_opened(id));
        WizardSession {
            id,
            state: Arc::new(Mutex::new(navigator.initial_state())),
            open,
            navigator,
            client: self.client.clone(),
            host: self.host.clone(),
            listeners: self.listeners.clone(),
            inflight: Mutex::new(None),
        }
    }

    /// Number of sessions still waiting for their `wizard.done` signal.
    pub fn listener_count(&self) -> usize {
        lock_table(&self.listeners).len()
    }

    pub fn quick_generate_enabled(&self) -> bool {
        self.quick_enabled.load(Ordering::SeqCst)
    }

    /// Submits the preconfigured application without opening the wizard. The trigger
    /// stays disabled until an outcome has been delivered.
    pub async fn quick_generate(&self) -> Result<Outcome, LaunchError> {
        if self
            .quick_enabled
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(LaunchError::QuickGenerateBusy);
        }
        let _trigger = TriggerGuard(&self.quick_enabled);

        let request = SubmissionRequest::quick_default();
        let outcome = self.client.submit(&request).await;
        Ok(generation::deliver(outcome, self.host.as_ref()).await)
    }
}

/// Re-enables the quick generate trigger however the call ends.
struct TriggerGuard<'a>(&'a AtomicBool);

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

fn lock_table(table: &ListenerTable) -> std::sync::MutexGuard<'_, HashMap<SessionId, DoneListener>> {
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One open wizard. Step components mutate the shared `WizardState` only through
/// this handle.
pub struct WizardSession {
    id: SessionId,
    state: Arc<Mutex<WizardState>>,
    open: Arc<AtomicBool>,
    navigator: NavigationController,
    client: Arc<GenerationClient>,
    host: Arc<dyn Host>,
    listeners: ListenerTable,
    inflight: Mutex<Option<JoinHandle<()>>>,
}

impl WizardSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn navigator(&self) -> &NavigationController {
        &self.navigator
    }

    pub async fn snapshot(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    /// Applies a field edit to the session state. The edit is dropped if it would leave
    /// a step behind the cursor incomplete.
    pub async fn edit<R>(&self, f: impl FnOnce(&mut WizardState) -> R) -> Result<R, NavigationError> {
        let mut state = self.state.lock().await;
        self.ensure_open()?;
        let mut draft = state.clone();
        let result = f(&mut draft);
        self.navigator.check_reached(&draft)?;
        *state = draft;
        Ok(result)
    }

    pub async fn next(&self) -> Result<Advance, NavigationError> {
        let mut state = self.state.lock().await;
        self.ensure_open()?;
        let advance = self.navigator.advance(&mut state)?;
        if let Some(request) = &advance.submission {
            self.spawn_submission(request.clone()).await;
        }
        Ok(advance)
    }

    pub async fn back(&self) -> Result<StepId, NavigationError> {
        let mut state = self.state.lock().await;
        self.ensure_open()?;
        self.navigator.retreat(&mut state)
    }

    pub async fn retry(&self) -> Result<SubmissionRequest, NavigationError> {
        let mut state = self.state.lock().await;
        self.ensure_open()?;
        let request = self.navigator.retry(&mut state)?;
        self.spawn_submission(request.clone()).await;
        Ok(request)
    }

    pub async fn finish(&self) -> Result<(), NavigationError> {
        let state = self.state.lock().await;
        self.ensure_open()?;
        self.navigator.finish(&state)?;
        self.emit_done(DoneReason::Done);
        Ok(())
    }

    /// Closes the session without submitting. An in-flight request keeps running but
    /// its result is dropped. Returns `false` if the session was already closed.
    pub async fn cancel(&self) -> bool {
        let _state = self.state.lock().await;
        self.emit_done(DoneReason::Cancel)
    }

    /// Whether a submission task has been started and not yet awaited by `settled`.
    pub async fn has_submission(&self) -> bool {
        self.inflight.lock().await.is_some()
    }

    /// Waits for the current submission task, if any, to finish. Cancel safe: dropping
    /// the future leaves the task in place for the next call.
    pub async fn settled(&self) {
        let mut inflight = self.inflight.lock().await;
        if let Some(handle) = inflight.as_mut() {
            let result = handle.await;
            inflight.take();
            if let Err(e) = result {
                tracing::error!("{}", logs::submission_task_failed(self.id, &e.to_string()));
            }
        }
    }

    fn ensure_open(&self) -> Result<(), NavigationError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(NavigationError::SessionClosed)
        }
    }

    /// Fires the `wizard.done` listener. Only the first call per session does anything.
    fn emit_done(&self, reason: DoneReason) -> bool {
        let listener = lock_table(&self.listeners).remove(&self.id);
        match listener {
            Some(listener) => {
                listener(reason);
                true
            }
            None => false,
        }
    }

    async fn spawn_submission(&self, request: SubmissionRequest) {
        let id = self.id;
        let state = self.state.clone();
        let open = self.open.clone();
        let client = self.client.clone();
        let host = self.host.clone();

        let handle = tokio::spawn(async move {
            let outcome = client.submit(&request).await;

            let mut state = state.lock().await;
            if !open.load(Ordering::SeqCst) {
                tracing::info!("{}", logs::submission_discarded(id));
                return;
            }
            let recorded = generation::deliver(outcome, host.as_ref()).await;
            state.record_outcome(&recorded);
        });

        *self.inflight.lock().await = Some(handle);
    }
}

impl Drop for WizardSession {
    fn drop(&mut self) {
        // A dropped session is torn down: pending results are discarded and the
        // listener goes away without firing.
        self.open.store(false, Ordering::SeqCst);
        lock_table(&self.listeners).remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generation::testing::{FakeTransport, RecordingHost};
    use crate::application::state::SubmissionPhase;
    use crate::domain::types::ProjectOption;
    use crate::strings::messages;
    use tokio::sync::Notify;

    fn launcher(transport: Arc<FakeTransport>, host: Arc<RecordingHost>) -> LaunchController {
        LaunchController::new(
            Arc::new(StepRegistry::standard()),
            Arc::new(GenerationClient::new(transport)),
            host,
        )
    }

    async fn fill_and_submit(session: &WizardSession) {
        session
            .edit(|s| {
                s.name = "app".to_string();
                s.version = "1.0".to_string();
                s.set_option(ProjectOption::Model, false);
            })
            .await
            .unwrap();
        for _ in 0..3 {
            session.next().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_successful_submission_saves_archive() {
        let transport = Arc::new(FakeTransport::ok(b"zip-bytes"));
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(transport.clone(), host.clone());
        let session = launch.open_wizard();

        fill_and_submit(&session).await;
        session.settled().await;

        assert_eq!(
            host.saved(),
            vec![(b"zip-bytes".to_vec(), "app.zip".to_string())]
        );
        let state = session.snapshot().await;
        assert!(state.submission_complete());
        assert!(!state.submission_in_flight());
        assert_eq!(transport.sent()[0].options, vec!["kjar", "service"]);

        session.finish().await.unwrap();
        assert_eq!(host.done(), vec![DoneReason::Done]);
        assert!(!session.is_open());
        assert_eq!(launch.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_submission_allows_retry() {
        let transport = Arc::new(FakeTransport::failing("network"));
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(transport.clone(), host.clone());
        let session = launch.open_wizard();

        fill_and_submit(&session).await;
        session.settled().await;

        let state = session.snapshot().await;
        assert!(!state.submission_in_flight());
        assert!(state.submission_complete());
        assert!(host.saved().is_empty());
        assert_eq!(
            host.notices(),
            vec![messages::generation_failed("request failed: network")]
        );

        session.edit(|s| s.name = "renamed".to_string()).await.unwrap();
        let request = session.retry().await.unwrap();
        assert_eq!(request.name, "renamed");
        session.settled().await;
        assert_eq!(transport.sent().len(), 2);
        assert!(matches!(
            session.snapshot().await.submission,
            SubmissionPhase::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_in_flight_blocks_finish_and_retry() {
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(FakeTransport::ok(b"zip").gated(gate.clone()));
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(transport, host.clone());
        let session = launch.open_wizard();

        fill_and_submit(&session).await;
        assert_eq!(session.finish().await, Err(NavigationError::SubmissionInFlight));
        assert_eq!(
            session.retry().await.unwrap_err(),
            NavigationError::SubmissionInFlight
        );
        assert_eq!(session.back().await, Err(NavigationError::SubmissionInFlight));

        gate.notify_one();
        session.settled().await;
        assert_eq!(host.saved().len(), 1);
        assert_eq!(session.finish().await, Ok(()));
    }

    #[tokio::test]
    async fn test_cancel_while_in_flight_discards_result() {
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(FakeTransport::ok(b"zip").gated(gate.clone()));
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(transport, host.clone());
        let session = launch.open_wizard();

        fill_and_submit(&session).await;
        assert!(session.cancel().await);
        assert_eq!(launch.listener_count(), 0);

        gate.notify_one();
        session.settled().await;

        assert!(host.saved().is_empty());
        assert!(host.notices().is_empty());
        assert_eq!(host.done(), vec![DoneReason::Cancel]);
        assert!(session.snapshot().await.submission_in_flight());
        assert_eq!(
            session.next().await.unwrap_err(),
            NavigationError::SessionClosed
        );
    }

    #[tokio::test]
    async fn test_blanking_identity_after_leaving_first_step_is_rejected() {
        let transport = Arc::new(FakeTransport::ok(b"zip"));
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(transport.clone(), host.clone());
        let session = launch.open_wizard();

        session
            .edit(|s| {
                s.name = "app".to_string();
                s.version = "1.0".to_string();
            })
            .await
            .unwrap();
        session.next().await.unwrap();
        session.next().await.unwrap();

        assert_eq!(
            session.edit(|s| s.name.clear()).await,
            Err(NavigationError::Blocked(StepId::DetailsGeneral))
        );
        assert_eq!(
            session.edit(|s| s.version = " ".to_string()).await,
            Err(NavigationError::Blocked(StepId::DetailsGeneral))
        );
        session.edit(|s| s.name = "renamed".to_string()).await.unwrap();

        session.next().await.unwrap();
        session.settled().await;
        assert_eq!(transport.sent()[0].name, "renamed");
        assert_eq!(host.saved()[0].1, "renamed.zip");

        // Back on the first step the fields are free to edit again.
        session.back().await.unwrap();
        session.back().await.unwrap();
        session.back().await.unwrap();
        session.edit(|s| s.name.clear()).await.unwrap();
        assert_eq!(
            session.next().await.unwrap_err(),
            NavigationError::Blocked(StepId::DetailsGeneral)
        );
    }

    #[tokio::test]
    async fn test_dropped_session_discards_in_flight_result() {
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(FakeTransport::ok(b"zip").gated(gate.clone()));
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(transport.clone(), host.clone());
        let session = launch.open_wizard();

        fill_and_submit(&session).await;
        assert!(session.has_submission().await);
        let task = session.inflight.lock().await.take().unwrap();
        drop(session);
        assert_eq!(launch.listener_count(), 0);

        gate.notify_one();
        task.await.unwrap();

        assert_eq!(transport.sent().len(), 1);
        assert!(host.saved().is_empty());
        assert!(host.notices().is_empty());
        assert!(host.done().is_empty());
    }

    #[tokio::test]
    async fn test_done_signal_consumed_once() {
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(Arc::new(FakeTransport::ok(b"zip")), host.clone());
        let session = launch.open_wizard();

        assert!(session.cancel().await);
        assert!(!session.cancel().await);
        assert_eq!(session.finish().await, Err(NavigationError::SessionClosed));
        assert_eq!(host.done(), vec![DoneReason::Cancel]);
    }

    #[tokio::test]
    async fn test_repeated_opens_do_not_leak_listeners() {
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(Arc::new(FakeTransport::ok(b"zip")), host.clone());

        for _ in 0..5 {
            let session = launch.open_wizard();
            assert_eq!(launch.listener_count(), 1);
            session.cancel().await;
            assert_eq!(launch.listener_count(), 0);
        }

        // Dropping an open session also releases its listener.
        drop(launch.open_wizard());
        assert_eq!(launch.listener_count(), 0);
        assert_eq!(host.done().len(), 5);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let launch = launcher(
            Arc::new(FakeTransport::ok(b"zip")),
            Arc::new(RecordingHost::default()),
        );
        let first = launch.open_wizard();
        first.edit(|s| s.name = "first".to_string()).await.unwrap();
        first.cancel().await;

        let second = launch.open_wizard();
        assert_ne!(first.id(), second.id());
        let state = second.snapshot().await;
        assert!(state.name.is_empty());
        assert_eq!(state.current_step, StepId::DetailsGeneral);
    }

    #[tokio::test]
    async fn test_quick_generate_success() {
        let transport = Arc::new(FakeTransport::ok(b"zip"));
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(transport.clone(), host.clone());

        let outcome = launch.quick_generate().await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(transport.sent(), vec![SubmissionRequest::quick_default()]);
        assert_eq!(
            host.saved(),
            vec![(b"zip".to_vec(), "business-application.zip".to_string())]
        );
        assert!(launch.quick_generate_enabled());
    }

    #[tokio::test]
    async fn test_quick_generate_failure_reenables_trigger() {
        let host = Arc::new(RecordingHost::default());
        let launch = launcher(Arc::new(FakeTransport::failing("boom")), host.clone());

        let outcome = launch.quick_generate().await.unwrap();
        assert!(!outcome.is_success());
        assert_eq!(host.notices().len(), 1);
        assert!(launch.quick_generate_enabled());
    }

    #[tokio::test]
    async fn test_quick_generate_disabled_while_running() {
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(FakeTransport::ok(b"zip").gated(gate.clone()));
        let launch = Arc::new(launcher(
            transport.clone(),
            Arc::new(RecordingHost::default()),
        ));

        let running = launch.clone();
        let task = tokio::spawn(async move { running.quick_generate().await });
        while transport.sent().is_empty() {
            tokio::task::yield_now().await;
        }

        assert!(!launch.quick_generate_enabled());
        assert_eq!(
            launch.quick_generate().await.unwrap_err(),
            LaunchError::QuickGenerateBusy
        );

        gate.notify_one();
        assert!(task.await.unwrap().unwrap().is_success());
        assert!(launch.quick_generate_enabled());
    }
}
