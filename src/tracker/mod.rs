//! Tracker backends for Pivotal Tracker and Trello
//!
//! Provides a unified interface for filing bug stories across trackers.

mod factory;
mod manual;
mod pivotal;
mod trello;

pub use factory::create_tracker_backend;
pub use manual::{ManualHandle, ManualTracker};
pub use pivotal::PivotalTracker;
pub use trello::TrelloTracker;

use crate::error::Result;
use crate::types::{StoryDraft, StoryReceipt};
use async_trait::async_trait;

/// Tracker backend trait for story submission
///
/// This trait abstracts Pivotal Tracker and Trello, allowing the same report
/// shell to file stories against either service.
#[async_trait]
pub trait TrackerBackend: Send + Sync {
    /// Submit a story to the tracker
    ///
    /// Resolves exactly once per attempt: `Ok` with the tracker's receipt, or
    /// `Err` carrying the failure. Performs network I/O except on the manual
    /// backend.
    async fn create_story(&self, draft: &StoryDraft) -> Result<StoryReceipt>;

    /// Best-effort abort of the in-flight submission
    ///
    /// When it lands, the pending [`create_story`](Self::create_story) future
    /// resolves with [`Error::Canceled`](crate::error::Error::Canceled);
    /// completion is never suppressed. A no-op when nothing is in flight.
    fn cancel(&self);

    /// Human-readable destination label for the compose form
    fn destination(&self) -> String;
}
