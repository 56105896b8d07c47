//! Trello backend implementation

use crate::error::{Error, Result};
use crate::tracker::TrackerBackend;
use crate::types::{Attachment, StoryDraft, StoryReceipt};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

/// Trello service using reqwest
///
/// Requires an app key and member token from <https://trello.com/app-key>.
/// Cards are created in the list identified by `list_id`.
pub struct TrelloTracker {
    client: Client,
    app_key: String,
    auth_token: String,
    list_id: String,
    base_url: String,
    abort: Notify,
}

#[derive(Serialize)]
struct CreateCardPayload<'a> {
    #[serde(rename = "idList")]
    id_list: &'a str,
    name: &'a str,
    desc: String,
}

#[derive(Deserialize)]
struct Card {
    id: String,
    #[serde(rename = "shortUrl")]
    short_url: String,
}

const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl TrelloTracker {
    /// Create a new Trello service
    pub fn new(app_key: String, auth_token: String, list_id: String) -> Self {
        Self::with_base_url(app_key, auth_token, list_id, DEFAULT_BASE_URL.to_string())
    }

    /// Create a service against a non-default API base (used by tests)
    pub fn with_base_url(
        app_key: String,
        auth_token: String,
        list_id: String,
        base_url: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            app_key,
            auth_token,
            list_id,
            base_url,
            abort: Notify::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    const fn credentials(&self) -> [(&'static str, &String); 2] {
        [("key", &self.app_key), ("token", &self.auth_token)]
    }

    /// Surface a non-2xx response verbatim as [`Error::TrelloApi`]
    async fn check_status(res: Response) -> Result<Response> {
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status();
        let body = res.text().await.unwrap_or_else(|_| "unknown".to_string());
        Err(Error::TrelloApi(format!("{status}: {body}")))
    }

    async fn attach(&self, card_id: &str, attachment: &Attachment) -> Result<()> {
        let url = self.api_url(&format!("/cards/{card_id}/attachments"));

        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.media_type)?;
        let form = Form::new().part("file", part);

        let res = self
            .client
            .post(&url)
            .query(&self.credentials())
            .multipart(form)
            .send()
            .await?;

        Self::check_status(res).await?;
        Ok(())
    }

    async fn create_story_inner(&self, draft: &StoryDraft) -> Result<StoryReceipt> {
        let url = self.api_url("/cards");

        let payload = CreateCardPayload {
            id_list: &self.list_id,
            name: &draft.title,
            desc: draft.full_description(),
        };

        let res = self
            .client
            .post(&url)
            .query(&self.credentials())
            .json(&payload)
            .send()
            .await?;

        let card: Card = Self::check_status(res).await?.json().await?;

        for attachment in draft.attachments() {
            self.attach(&card.id, attachment).await?;
        }

        Ok(StoryReceipt {
            id: card.id,
            url: card.short_url,
            created_at: None,
        })
    }
}

#[async_trait]
impl TrackerBackend for TrelloTracker {
    async fn create_story(&self, draft: &StoryDraft) -> Result<StoryReceipt> {
        tokio::select! {
            res = self.create_story_inner(draft) => res,
            () = self.abort.notified() => {
                tracing::debug!(list_id = %self.list_id, "trello submission canceled");
                Err(Error::Canceled)
            }
        }
    }

    fn cancel(&self) {
        self.abort.notify_waiters();
    }

    fn destination(&self) -> String {
        format!("Trello list {}", self.list_id)
    }
}
