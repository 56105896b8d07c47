//! Mock tracker backend for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use gripe::error::{Error, Result};
use gripe::tracker::TrackerBackend;
use gripe::types::{StoryDraft, StoryReceipt};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Call record for `create_story`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoryCall {
    pub title: String,
    pub description: String,
    pub requestor: Option<String>,
    pub has_screenshot: bool,
    pub has_logs: bool,
}

/// Simple mock tracker backend for testing
///
/// Completes immediately (unlike the library's `ManualTracker`, which parks
/// submissions), so it suits tests that only verify what flowed into the
/// backend.
///
/// Features:
/// - Auto-incrementing story IDs
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockTracker {
    next_story_id: AtomicU64,
    create_calls: Mutex<Vec<CreateStoryCall>>,
    cancel_calls: AtomicUsize,
    error_on_create: Mutex<Option<String>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self {
            next_story_id: AtomicU64::new(1),
            create_calls: Mutex::new(Vec::new()),
            cancel_calls: AtomicUsize::new(0),
            error_on_create: Mutex::new(None),
        }
    }

    /// Make `create_story` return an error
    pub fn fail_create_story(&self, msg: &str) {
        *self.error_on_create.lock().unwrap() = Some(msg.to_string());
    }

    /// Get all `create_story` calls
    pub fn get_create_calls(&self) -> Vec<CreateStoryCall> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Number of `cancel` calls
    pub fn get_cancel_calls(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }

    /// Assert that `create_story` was called with a specific title
    pub fn assert_create_called(&self, title: &str) {
        let calls = self.get_create_calls();
        assert!(
            calls.iter().any(|c| c.title == title),
            "Expected create_story({title}) but got: {calls:?}"
        );
    }
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrackerBackend for MockTracker {
    async fn create_story(&self, draft: &StoryDraft) -> Result<StoryReceipt> {
        self.create_calls.lock().unwrap().push(CreateStoryCall {
            title: draft.title.clone(),
            description: draft.full_description(),
            requestor: draft.requestor.clone(),
            has_screenshot: draft.screenshot.is_some(),
            has_logs: draft.logs.is_some(),
        });

        // Check for injected error
        if let Some(msg) = self.error_on_create.lock().unwrap().as_ref() {
            return Err(Error::TrelloApi(msg.clone()));
        }

        let id = self.next_story_id.fetch_add(1, Ordering::SeqCst);
        Ok(StoryReceipt {
            id: id.to_string(),
            url: format!("https://tracker.example/story/{id}"),
            created_at: None,
        })
    }

    fn cancel(&self) {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn destination(&self) -> String {
        "mock tracker".to_string()
    }
}
