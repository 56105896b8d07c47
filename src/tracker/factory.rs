//! Tracker backend factory
//!
//! Creates tracker backends based on configuration.

use crate::tracker::{PivotalTracker, TrackerBackend, TrelloTracker};
use crate::types::TrackerConfig;
use std::sync::Arc;

/// Create a tracker backend from configuration
pub fn create_tracker_backend(config: &TrackerConfig) -> Arc<dyn TrackerBackend> {
    match config {
        TrackerConfig::Pivotal { token, project_id } => Arc::new(PivotalTracker::new(
            token.clone(),
            project_id.clone(),
        )),
        TrackerConfig::Trello {
            app_key,
            auth_token,
            list_id,
        } => Arc::new(TrelloTracker::new(
            app_key.clone(),
            auth_token.clone(),
            list_id.clone(),
        )),
    }
}
