//! Error types for gripe

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// All errors a submission can surface
///
/// Vendor API failures carry the response status and body verbatim so the
/// caller sees exactly what the tracker said.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level HTTP failure (DNS, TLS, timeout, malformed response)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the Pivotal Tracker API
    #[error("Pivotal Tracker API error: {0}")]
    PivotalApi(String),

    /// Non-2xx response from the Trello API
    #[error("Trello API error: {0}")]
    TrelloApi(String),

    /// Missing or invalid credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// A second submit while one is still in flight
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    /// The in-flight submission was aborted via cancel
    #[error("submission canceled")]
    Canceled,

    /// The draft cannot be submitted as-is
    #[error("invalid draft: {0}")]
    InvalidDraft(String),

    /// Filesystem failure reading a log or screenshot file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
