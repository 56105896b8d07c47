//! Report shell
//!
//! The coordinator behind the compose form: owns the active tracker backend,
//! the log provider, the visibility flag, and the single-submission-in-flight
//! guard. Constructed explicitly for a composition root, or installed once as
//! the process-wide shared instance via the two factory paths.

use crate::error::{Error, Result};
use crate::logs::LogDataProvider;
use crate::tracker::{ManualHandle, ManualTracker, TrackerBackend, create_tracker_backend};
use crate::types::{Attachment, StoryDraft, StoryReceipt, TrackerConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, RwLock};

static SHARED: OnceLock<Arc<ReportShell>> = OnceLock::new();

/// The bug-report shell
///
/// At most one submission is in flight at a time; a second
/// [`submit`](Self::submit) is rejected with
/// [`Error::SubmissionInProgress`] rather than queued.
pub struct ReportShell {
    backend: RwLock<Arc<dyn TrackerBackend>>,
    test_mode: Mutex<Option<TestMode>>,
    logs: LogDataProvider,
    visible: AtomicBool,
    in_flight: AtomicBool,
}

/// Saved state while the manual backend is swapped in
struct TestMode {
    handle: ManualHandle,
    saved: Arc<dyn TrackerBackend>,
}

/// Clears the in-flight flag on every exit path
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            return Err(Error::SubmissionInProgress);
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ReportShell {
    /// Create a shell for explicit ownership by a composition root
    pub fn new(config: TrackerConfig, logs: LogDataProvider) -> Self {
        Self::with_backend(create_tracker_backend(&config), logs)
    }

    /// Create a shell around an already-built backend
    ///
    /// The injection seam for tests and hosts with custom backends.
    pub fn with_backend(backend: Arc<dyn TrackerBackend>, logs: LogDataProvider) -> Self {
        Self {
            backend: RwLock::new(backend),
            test_mode: Mutex::new(None),
            logs,
            visible: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Install the shared shell filing against Pivotal Tracker
    ///
    /// First factory call (this or [`install_trello`](Self::install_trello))
    /// creates the process-wide instance; later calls return it unchanged.
    pub fn install_pivotal(
        logs: LogDataProvider,
        token: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Arc<Self> {
        Self::install(
            TrackerConfig::Pivotal {
                token: token.into(),
                project_id: project_id.into(),
            },
            logs,
        )
    }

    /// Install the shared shell filing against Trello
    ///
    /// First factory call (this or [`install_pivotal`](Self::install_pivotal))
    /// creates the process-wide instance; later calls return it unchanged.
    pub fn install_trello(
        logs: LogDataProvider,
        app_key: impl Into<String>,
        auth_token: impl Into<String>,
        list_id: impl Into<String>,
    ) -> Arc<Self> {
        Self::install(
            TrackerConfig::Trello {
                app_key: app_key.into(),
                auth_token: auth_token.into(),
                list_id: list_id.into(),
            },
            logs,
        )
    }

    fn install(config: TrackerConfig, logs: LogDataProvider) -> Arc<Self> {
        SHARED
            .get_or_init(|| Arc::new(Self::new(config, logs)))
            .clone()
    }

    /// The shared shell, if a factory has run
    pub fn shared() -> Option<Arc<Self>> {
        SHARED.get().cloned()
    }

    fn active_backend(&self) -> Arc<dyn TrackerBackend> {
        self.backend.read().expect("backend lock poisoned").clone()
    }

    /// Submit a draft to the active backend
    ///
    /// Validates first, so an unsubmittable draft never reaches the network.
    /// Rejected with [`Error::SubmissionInProgress`] while another submission
    /// is in flight.
    pub async fn submit(&self, draft: StoryDraft) -> Result<StoryReceipt> {
        draft.validate()?;
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        // Clone the Arc out so no lock is held across the await.
        let backend = self.active_backend();
        tracing::info!(destination = %backend.destination(), title = %draft.title, "submitting story");

        let result = backend.create_story(&draft).await;
        match &result {
            Ok(receipt) => tracing::info!(id = %receipt.id, "story filed"),
            Err(err) => tracing::warn!(error = %err, "story submission failed"),
        }
        result
    }

    /// Abort the in-flight submission, if any
    ///
    /// Best-effort: the pending [`submit`](Self::submit) resolves with
    /// [`Error::Canceled`]. A no-op when idle.
    pub fn cancel(&self) {
        self.active_backend().cancel();
    }

    /// Flip the form's visibility, returning the new state
    pub fn toggle_visibility(&self) -> bool {
        !self.visible.fetch_xor(true, Ordering::SeqCst)
    }

    /// Whether the form is currently shown
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Current log bytes wrapped as an attachment
    ///
    /// Invokes the provider captured at construction; `None` when it yields
    /// nothing.
    pub fn logs_attachment(&self) -> Option<Attachment> {
        (self.logs)().map(Attachment::logs)
    }

    /// Destination label of the active backend
    pub fn destination(&self) -> String {
        self.active_backend().destination()
    }

    /// Swap a manual-completion backend in, returning its handle
    ///
    /// Idempotent: while test mode is already active, returns the handle of
    /// the installed manual backend instead of stacking another.
    pub fn begin_test_mode(&self) -> ManualHandle {
        let mut mode = self.test_mode.lock().expect("test mode lock poisoned");
        if let Some(active) = mode.as_ref() {
            return active.handle.clone();
        }

        tracing::debug!("entering manual test mode");
        let (tracker, handle) = ManualTracker::new();
        let manual: Arc<dyn TrackerBackend> = Arc::new(tracker);
        let saved = {
            let mut backend = self.backend.write().expect("backend lock poisoned");
            std::mem::replace(&mut *backend, manual)
        };
        *mode = Some(TestMode {
            handle: handle.clone(),
            saved,
        });
        handle
    }

    /// Restore the real backend
    ///
    /// Idempotent: a no-op when test mode is not active.
    pub fn end_test_mode(&self) {
        let mut mode = self.test_mode.lock().expect("test mode lock poisoned");
        if let Some(active) = mode.take() {
            tracing::debug!("leaving manual test mode");
            *self.backend.write().expect("backend lock poisoned") = active.saved;
        }
    }
}
