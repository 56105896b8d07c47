//! Auth command - test and manage tracker credentials

use gripe::auth::{get_pivotal_auth, get_trello_auth, test_pivotal_auth, test_trello_auth};
use gripe::error::Result;
use gripe::types::Tracker;

/// Run the auth test command
pub async fn run_auth_test(tracker: Tracker) -> Result<()> {
    match tracker {
        Tracker::Pivotal => {
            println!("Testing Pivotal Tracker authentication...");
            let config = get_pivotal_auth()?;
            let username = test_pivotal_auth(&config).await?;
            println!("Authenticated as: {username}");
            println!("Project: {}", config.project_id);
        }
        Tracker::Trello => {
            println!("Testing Trello authentication...");
            let config = get_trello_auth()?;
            let username = test_trello_auth(&config).await?;
            println!("Authenticated as: {username}");
            println!("List: {}", config.list_id);
        }
    }
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup(tracker: Tracker) {
    match tracker {
        Tracker::Pivotal => {
            println!("Pivotal Tracker Authentication Setup");
            println!("====================================");
            println!();
            println!("1. Get an API token from your Tracker profile page:");
            println!("   https://www.pivotaltracker.com/profile");
            println!("2. Find your project ID in the project URL");
            println!("   (https://www.pivotaltracker.com/n/projects/<ID>)");
            println!();
            println!("Then set:");
            println!("  TRACKER_API_TOKEN   (or PIVOTAL_TRACKER_TOKEN)");
            println!("  TRACKER_PROJECT_ID");
        }
        Tracker::Trello => {
            println!("Trello Authentication Setup");
            println!("===========================");
            println!();
            println!("1. Get an app key and token from:");
            println!("   https://trello.com/app-key");
            println!("2. Find the target list ID by appending .json to a board URL");
            println!();
            println!("Then set:");
            println!("  TRELLO_APP_KEY");
            println!("  TRELLO_AUTH_TOKEN");
            println!("  TRELLO_LIST_ID");
        }
    }
}

/// Wrapper for auth commands
pub async fn run_auth(tracker: Tracker, action: &str) -> Result<()> {
    match action {
        "test" => run_auth_test(tracker).await,
        "setup" => {
            run_auth_setup(tracker);
            Ok(())
        }
        _ => {
            println!("Unknown action: {action}. Use 'test' or 'setup'.");
            Ok(())
        }
    }
}
