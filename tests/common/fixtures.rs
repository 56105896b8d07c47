//! Test data factories for gripe types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use gripe::types::{Attachment, StoryDraft, StoryReceipt};

/// Create a draft with default values
pub fn make_draft(title: &str) -> StoryDraft {
    StoryDraft::new(title, format!("description for {title}"))
}

/// Create a draft with both attachments populated
pub fn make_draft_with_attachments(title: &str) -> StoryDraft {
    let mut draft = make_draft(title);
    draft.screenshot = Some(Attachment::screenshot(vec![0xff, 0xd8, 0xff]));
    draft.logs = Some(Attachment::logs(b"line 1\nline 2\n".to_vec()));
    draft
}

/// Create a draft with a requestor name
pub fn make_draft_from(title: &str, requestor: &str) -> StoryDraft {
    let mut draft = make_draft(title);
    draft.requestor = Some(requestor.to_string());
    draft
}

/// Create a receipt with default values
pub fn make_receipt(id: &str) -> StoryReceipt {
    StoryReceipt {
        id: id.to_string(),
        url: format!("https://tracker.example/story/{id}"),
        created_at: None,
    }
}
