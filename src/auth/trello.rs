//! Trello authentication

use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::env;

/// Trello credentials
#[derive(Debug, Clone)]
pub struct TrelloAuthConfig {
    /// Application key
    pub app_key: String,
    /// Member auth token
    pub auth_token: String,
    /// List that cards are filed into
    pub list_id: String,
}

/// Get Trello credentials from the environment
///
/// Reads `TRELLO_APP_KEY`, `TRELLO_AUTH_TOKEN`, and `TRELLO_LIST_ID`.
pub fn get_trello_auth() -> Result<TrelloAuthConfig> {
    trello_auth_from(|key| env::var(key).ok())
}

/// Resolution core, parameterized over the variable lookup for testability
pub(crate) fn trello_auth_from(
    get: impl Fn(&str) -> Option<String>,
) -> Result<TrelloAuthConfig> {
    let require = |key: &str| {
        get(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Auth(format!("No Trello credentials found. Set {key}")))
    };

    Ok(TrelloAuthConfig {
        app_key: require("TRELLO_APP_KEY")?,
        auth_token: require("TRELLO_AUTH_TOKEN")?,
        list_id: require("TRELLO_LIST_ID")?,
    })
}

#[derive(Deserialize)]
struct Member {
    username: String,
}

/// Test Trello authentication
pub async fn test_trello_auth(config: &TrelloAuthConfig) -> Result<String> {
    let member: Member = Client::new()
        .get("https://api.trello.com/1/members/me")
        .query(&[("key", &config.app_key), ("token", &config.auth_token)])
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("Invalid key/token: {e}")))?
        .json()
        .await?;

    Ok(member.username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolves_all_three_variables() {
        let config = trello_auth_from(lookup(&[
            ("TRELLO_APP_KEY", "k"),
            ("TRELLO_AUTH_TOKEN", "t"),
            ("TRELLO_LIST_ID", "l"),
        ]))
        .unwrap();
        assert_eq!(config.app_key, "k");
        assert_eq!(config.auth_token, "t");
        assert_eq!(config.list_id, "l");
    }

    #[test]
    fn test_any_missing_variable_is_an_auth_error() {
        let err = trello_auth_from(lookup(&[
            ("TRELLO_APP_KEY", "k"),
            ("TRELLO_AUTH_TOKEN", "t"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Auth(msg) if msg.contains("TRELLO_LIST_ID")));
    }
}
