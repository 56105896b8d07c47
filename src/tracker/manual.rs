//! Manual-completion tracker backend
//!
//! Stands in for a vendor backend when the network path must stay out of the
//! picture: submissions park until the paired [`ManualHandle`] resolves them.
//! Used by the shell's test mode and by tests driving completion by hand.

use crate::error::{Error, Result};
use crate::tracker::TrackerBackend;
use crate::types::{StoryDraft, StoryReceipt};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;

type PendingQueue = VecDeque<oneshot::Sender<Result<StoryReceipt>>>;

/// Tracker backend whose submissions complete only on command
pub struct ManualTracker {
    pending: Arc<Mutex<PendingQueue>>,
}

/// Remote control for a [`ManualTracker`]
///
/// Cloneable; all clones drive the same pending queue.
#[derive(Clone)]
pub struct ManualHandle {
    pending: Arc<Mutex<PendingQueue>>,
}

impl ManualTracker {
    /// Create a tracker and the handle that completes its submissions
    pub fn new() -> (Self, ManualHandle) {
        let pending = Arc::new(Mutex::new(PendingQueue::new()));
        let handle = ManualHandle {
            pending: Arc::clone(&pending),
        };
        (Self { pending }, handle)
    }

    fn queue(&self) -> MutexGuard<'_, PendingQueue> {
        self.pending.lock().expect("pending queue poisoned")
    }
}

impl ManualHandle {
    fn queue(&self) -> MutexGuard<'_, PendingQueue> {
        self.pending.lock().expect("pending queue poisoned")
    }

    /// Number of submissions currently parked
    pub fn pending(&self) -> usize {
        self.queue().len()
    }

    /// Resolve the oldest pending submission with success
    ///
    /// Returns whether a submission was actually resolved; a no-op (returning
    /// `false`) when nothing is pending.
    pub fn complete_with_success(&self) -> bool {
        self.queue().pop_front().is_some_and(|tx| {
            tx.send(Ok(StoryReceipt {
                id: "manual".to_string(),
                url: String::new(),
                created_at: None,
            }))
            .is_ok()
        })
    }

    /// Resolve the oldest pending submission with the given error
    ///
    /// Returns whether a submission was actually resolved; a no-op (returning
    /// `false`) when nothing is pending.
    pub fn complete_with_error(&self, error: Error) -> bool {
        self.queue()
            .pop_front()
            .is_some_and(|tx| tx.send(Err(error)).is_ok())
    }
}

#[async_trait]
impl TrackerBackend for ManualTracker {
    async fn create_story(&self, _draft: &StoryDraft) -> Result<StoryReceipt> {
        let (tx, rx) = oneshot::channel();
        self.queue().push_back(tx);
        // A dropped sender (cancel) resolves the waiter as canceled.
        rx.await.unwrap_or(Err(Error::Canceled))
    }

    fn cancel(&self) {
        self.queue().clear();
    }

    fn destination(&self) -> String {
        "manual tracker".to_string()
    }
}
