//! Core types for gripe

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bug report waiting to be submitted
///
/// Transient: built from user input, consumed by one submission attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryDraft {
    /// Story title (card name on Trello)
    pub title: String,
    /// Longer description of the bug
    pub description: String,
    /// Name of the person filing the report, when known
    pub requestor: Option<String>,
    /// Screenshot attachment
    pub screenshot: Option<Attachment>,
    /// Log attachment
    pub logs: Option<Attachment>,
}

impl StoryDraft {
    /// Create a draft with no requestor and no attachments
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            requestor: None,
            screenshot: None,
            logs: None,
        }
    }

    /// Check the draft is submittable
    ///
    /// Rejects an empty or whitespace-only title before any network I/O.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidDraft("title must not be empty".to_string()));
        }
        Ok(())
    }

    /// Description as sent to the tracker, with the requestor name folded in
    ///
    /// API tokens fix the authenticated user, so the requestor travels in the
    /// story body instead.
    pub fn full_description(&self) -> String {
        match self.requestor.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                format!("Requested by: {name}\n\n{}", self.description)
            }
            _ => self.description.clone(),
        }
    }

    /// Attachments in upload order (screenshot first, then logs)
    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.screenshot.iter().chain(self.logs.iter())
    }
}

/// A binary payload attached to a story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    /// File name shown in the tracker
    pub file_name: String,
    /// MIME type of the payload
    pub media_type: String,
    /// Raw bytes
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// A log attachment with the conventional name and MIME type
    pub fn logs(bytes: Vec<u8>) -> Self {
        Self {
            file_name: "device.log".to_string(),
            media_type: "text/plain".to_string(),
            bytes,
        }
    }

    /// A screenshot attachment with the conventional name and MIME type
    pub fn screenshot(bytes: Vec<u8>) -> Self {
        Self {
            file_name: "screenshot.jpg".to_string(),
            media_type: "image/jpeg".to_string(),
            bytes,
        }
    }
}

/// What the tracker handed back for a submitted story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryReceipt {
    /// Tracker-assigned story/card ID
    pub id: String,
    /// Web URL of the created story/card
    pub url: String,
    /// Creation timestamp, when the tracker reports one
    pub created_at: Option<DateTime<Utc>>,
}

/// Supported tracker backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tracker {
    /// Pivotal Tracker
    Pivotal,
    /// Trello
    Trello,
}

/// Tracker selection plus its credentials
#[derive(Debug, Clone)]
pub enum TrackerConfig {
    /// Pivotal Tracker: API token + project
    Pivotal {
        /// API token (`X-TrackerToken`)
        token: String,
        /// Numeric project ID as a string
        project_id: String,
    },
    /// Trello: app key + auth token + target list
    Trello {
        /// Application key
        app_key: String,
        /// Member auth token
        auth_token: String,
        /// ID of the list cards are filed into
        list_id: String,
    },
}

impl TrackerConfig {
    /// Which tracker this configuration selects
    pub const fn tracker(&self) -> Tracker {
        match self {
            Self::Pivotal { .. } => Tracker::Pivotal,
            Self::Trello { .. } => Tracker::Trello,
        }
    }
}
