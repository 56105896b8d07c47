//! Credential resolution for Pivotal Tracker and Trello
//!
//! Credentials come from environment variables; the `auth` CLI commands test
//! them against the vendor APIs.

mod pivotal;
mod trello;

pub use pivotal::{PivotalAuthConfig, get_pivotal_auth, test_pivotal_auth};
pub use trello::{TrelloAuthConfig, get_trello_auth, test_trello_auth};

use crate::types::Tracker;
use std::env;

/// Pick the tracker whose environment is configured
///
/// Pivotal Tracker wins when both are fully configured; `None` when neither
/// is.
pub fn detect_tracker() -> Option<Tracker> {
    detect_tracker_from(|key| env::var(key).ok())
}

fn detect_tracker_from(get: impl Fn(&str) -> Option<String>) -> Option<Tracker> {
    if pivotal::pivotal_auth_from(&get).is_ok() {
        return Some(Tracker::Pivotal);
    }
    if trello::trello_auth_from(&get).is_ok() {
        return Some(Tracker::Trello);
    }
    None
}
