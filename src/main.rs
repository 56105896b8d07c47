//! gripe - file bug stories to Pivotal Tracker or Trello
//!
//! CLI binary hosting the compose form.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gripe::types::Tracker;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[derive(Parser)]
#[command(name = "gripe")]
#[command(about = "File bug stories to Pivotal Tracker or Trello from the terminal")]
#[command(version)]
struct Cli {
    /// Tracker to file against (defaults to whichever is configured)
    #[arg(short, long, global = true, value_parser = parse_tracker)]
    tracker: Option<Tracker>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose and submit a bug report
    Report {
        /// Story title (prompted when omitted)
        #[arg(long)]
        title: Option<String>,

        /// Story description (prompted when omitted)
        #[arg(long)]
        description: Option<String>,

        /// Name of the person filing the report
        #[arg(long)]
        requestor: Option<String>,

        /// Screenshot file to attach
        #[arg(long)]
        screenshot: Option<PathBuf>,

        /// Log file to attach when logs are enabled
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Send without logs and skip the attach-logs prompt
        #[arg(long)]
        no_logs: bool,

        /// Accept defaults for every prompt not covered by a flag
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        tracker: AuthTracker,
    },
}

#[derive(Subcommand)]
enum AuthTracker {
    /// Pivotal Tracker authentication
    Pivotal {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Trello authentication
    Trello {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

fn parse_tracker(s: &str) -> Result<Tracker, String> {
    match s.to_ascii_lowercase().as_str() {
        "pivotal" | "tracker" => Ok(Tracker::Pivotal),
        "trello" => Ok(Tracker::Trello),
        other => Err(format!("unknown tracker '{other}' (expected pivotal or trello)")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("GRIPE_LOG").unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();

    match args.command {
        None => {
            // Default: compose interactively
            cli::run_report(args.tracker, cli::ReportOptions::default()).await?;
        }
        Some(Commands::Report {
            title,
            description,
            requestor,
            screenshot,
            log_file,
            no_logs,
            yes,
        }) => {
            let opts = cli::ReportOptions {
                title,
                description,
                requestor,
                screenshot,
                log_file,
                no_logs,
                yes,
            };
            cli::run_report(args.tracker, opts).await?;
        }
        Some(Commands::Auth { tracker }) => match tracker {
            AuthTracker::Pivotal { action } => {
                let action_str = match action {
                    AuthAction::Test => "test",
                    AuthAction::Setup => "setup",
                };
                cli::run_auth(Tracker::Pivotal, action_str).await?;
            }
            AuthTracker::Trello { action } => {
                let action_str = match action {
                    AuthAction::Test => "test",
                    AuthAction::Setup => "setup",
                };
                cli::run_auth(Tracker::Trello, action_str).await?;
            }
        },
    }

    Ok(())
}
