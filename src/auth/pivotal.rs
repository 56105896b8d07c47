//! Pivotal Tracker authentication

use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::env;

/// Pivotal Tracker credentials
#[derive(Debug, Clone)]
pub struct PivotalAuthConfig {
    /// API token (`X-TrackerToken`)
    pub token: String,
    /// Project the stories are filed into
    pub project_id: String,
}

/// Get Pivotal Tracker credentials from the environment
///
/// Token: `TRACKER_API_TOKEN`, falling back to `PIVOTAL_TRACKER_TOKEN`.
/// Project: `TRACKER_PROJECT_ID`.
pub fn get_pivotal_auth() -> Result<PivotalAuthConfig> {
    pivotal_auth_from(|key| env::var(key).ok())
}

/// Resolution core, parameterized over the variable lookup for testability
pub(crate) fn pivotal_auth_from(
    get: impl Fn(&str) -> Option<String>,
) -> Result<PivotalAuthConfig> {
    let token = get("TRACKER_API_TOKEN")
        .or_else(|| get("PIVOTAL_TRACKER_TOKEN"))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            Error::Auth(
                "No Pivotal Tracker token found. Set TRACKER_API_TOKEN".to_string(),
            )
        })?;

    let project_id = get("TRACKER_PROJECT_ID")
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            Error::Auth("No Pivotal Tracker project found. Set TRACKER_PROJECT_ID".to_string())
        })?;

    Ok(PivotalAuthConfig { token, project_id })
}

#[derive(Deserialize)]
struct Me {
    username: String,
}

/// Test Pivotal Tracker authentication
pub async fn test_pivotal_auth(config: &PivotalAuthConfig) -> Result<String> {
    let me: Me = Client::new()
        .get("https://www.pivotaltracker.com/services/v5/me")
        .header("X-TrackerToken", &config.token)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?
        .json()
        .await?;

    Ok(me.username)
}
