//! Pivotal Tracker backend implementation

use crate::error::{Error, Result};
use crate::tracker::TrackerBackend;
use crate::types::{Attachment, StoryDraft, StoryReceipt};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

/// Pivotal Tracker service using reqwest (Tracker API v5)
pub struct PivotalTracker {
    client: Client,
    token: String,
    project_id: String,
    base_url: String,
    abort: Notify,
}

#[derive(Serialize)]
struct CreateStoryPayload<'a> {
    name: &'a str,
    description: String,
    story_type: &'static str,
}

#[derive(Deserialize)]
struct Story {
    id: u64,
    url: String,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct Upload {
    id: u64,
}

const DEFAULT_BASE_URL: &str = "https://www.pivotaltracker.com/services/v5";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl PivotalTracker {
    /// Create a new Pivotal Tracker service
    pub fn new(token: String, project_id: String) -> Self {
        Self::with_base_url(token, project_id, DEFAULT_BASE_URL.to_string())
    }

    /// Create a service against a non-default API base (used by tests)
    pub fn with_base_url(token: String, project_id: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            project_id,
            base_url,
            abort: Notify::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Surface a non-2xx response verbatim as [`Error::PivotalApi`]
    async fn check_status(res: Response) -> Result<Response> {
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status();
        let body = res.text().await.unwrap_or_else(|_| "unknown".to_string());
        Err(Error::PivotalApi(format!("{status}: {body}")))
    }

    async fn upload(&self, attachment: &Attachment) -> Result<u64> {
        let url = self.api_url(&format!("/projects/{}/uploads", self.project_id));

        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.media_type)?;
        let form = Form::new().part("file", part);

        let res = self
            .client
            .post(&url)
            .header("X-TrackerToken", &self.token)
            .multipart(form)
            .send()
            .await?;

        let upload: Upload = Self::check_status(res).await?.json().await?;
        Ok(upload.id)
    }

    async fn create_story_inner(&self, draft: &StoryDraft) -> Result<StoryReceipt> {
        let url = self.api_url(&format!("/projects/{}/stories", self.project_id));

        let payload = CreateStoryPayload {
            name: &draft.title,
            description: draft.full_description(),
            story_type: "bug",
        };

        let res = self
            .client
            .post(&url)
            .header("X-TrackerToken", &self.token)
            .json(&payload)
            .send()
            .await?;

        let story: Story = Self::check_status(res).await?.json().await?;

        let mut upload_ids = Vec::new();
        for attachment in draft.attachments() {
            upload_ids.push(self.upload(attachment).await?);
        }

        // Uploads attach to the story through a comment.
        if !upload_ids.is_empty() {
            let url = self.api_url(&format!(
                "/projects/{}/stories/{}/comments",
                self.project_id, story.id
            ));

            let res = self
                .client
                .post(&url)
                .header("X-TrackerToken", &self.token)
                .json(&serde_json::json!({ "file_attachment_ids": upload_ids }))
                .send()
                .await?;

            Self::check_status(res).await?;
        }

        Ok(StoryReceipt {
            id: story.id.to_string(),
            url: story.url,
            created_at: story.created_at,
        })
    }
}

#[async_trait]
impl TrackerBackend for PivotalTracker {
    async fn create_story(&self, draft: &StoryDraft) -> Result<StoryReceipt> {
        tokio::select! {
            res = self.create_story_inner(draft) => res,
            () = self.abort.notified() => {
                tracing::debug!(project_id = %self.project_id, "pivotal submission canceled");
                Err(Error::Canceled)
            }
        }
    }

    fn cancel(&self) {
        // notify_waiters only wakes a live waiter, so a stray cancel while
        // idle cannot poison the next submission.
        self.abort.notify_waiters();
    }

    fn destination(&self) -> String {
        format!("Pivotal Tracker project {}", self.project_id)
    }
}
