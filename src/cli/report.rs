//! Report command - compose and submit a bug story

use crate::cli::style::{Stream, Stylize, check, hyperlink_url, spinner_style};
use anstream::{eprintln, println};
use dialoguer::{Confirm, Input};
use gripe::auth::{detect_tracker, get_pivotal_auth, get_trello_auth};
use gripe::error::{Error, Result};
use gripe::logs::{LogDataProvider, log_provider_from_file, no_logs};
use gripe::shell::ReportShell;
use gripe::types::{Attachment, StoryDraft, StoryReceipt, Tracker};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::time::Duration;

/// Pre-filled answers from the command line
#[derive(Debug, Default)]
pub struct ReportOptions {
    /// Story title; prompted when absent
    pub title: Option<String>,
    /// Story description; prompted when absent
    pub description: Option<String>,
    /// Requestor name; prompted when absent
    pub requestor: Option<String>,
    /// Screenshot file to attach
    pub screenshot: Option<PathBuf>,
    /// Log file backing the log attachment
    pub log_file: Option<PathBuf>,
    /// Never attach logs and skip the prompt
    pub no_logs: bool,
    /// Non-interactive: accept defaults for everything not covered by a flag
    pub yes: bool,
}

/// Run the report command
pub async fn run_report(tracker: Option<Tracker>, opts: ReportOptions) -> Result<()> {
    let tracker = tracker.or_else(detect_tracker).ok_or_else(|| {
        Error::Auth(
            "No tracker configured. Run `gripe auth pivotal setup` or `gripe auth trello setup`"
                .to_string(),
        )
    })?;

    let logs: LogDataProvider = opts
        .log_file
        .as_ref()
        .map_or_else(no_logs, log_provider_from_file);

    let shell = match tracker {
        Tracker::Pivotal => {
            let auth = get_pivotal_auth()?;
            ReportShell::install_pivotal(logs, auth.token, auth.project_id)
        }
        Tracker::Trello => {
            let auth = get_trello_auth()?;
            ReportShell::install_trello(logs, auth.app_key, auth.auth_token, auth.list_id)
        }
    };

    shell.toggle_visibility();
    let outcome = compose_and_submit(&shell, &opts).await;
    shell.toggle_visibility();
    outcome
}

async fn compose_and_submit(shell: &ReportShell, opts: &ReportOptions) -> Result<()> {
    let destination = shell.destination();
    println!("{} {}", "Report a bug to".emphasis(), destination.accent());

    let draft = compose(shell, opts)?;
    let receipt = file_story(shell, draft, &destination).await?;

    println!(
        "{} {} {}",
        check(),
        "Story filed to".success(),
        destination.accent()
    );
    if !receipt.url.is_empty() {
        println!("  {}", hyperlink_url(Stream::Stdout, &receipt.url));
    }
    Ok(())
}

fn compose(shell: &ReportShell, opts: &ReportOptions) -> Result<StoryDraft> {
    let interactive = !opts.yes;

    let title = match (&opts.title, interactive) {
        (Some(title), _) => title.clone(),
        (None, true) => Input::<String>::new()
            .with_prompt("Title")
            .interact_text()
            .map_err(prompt_failed)?,
        (None, false) => String::new(),
    };

    let description = match (&opts.description, interactive) {
        (Some(description), _) => description.clone(),
        (None, true) => Input::<String>::new()
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_failed)?,
        (None, false) => String::new(),
    };

    let requestor = match (&opts.requestor, interactive) {
        (Some(requestor), _) => Some(requestor.clone()),
        (None, true) => Some(
            Input::<String>::new()
                .with_prompt("Your name")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_failed)?,
        )
        .filter(|name| !name.trim().is_empty()),
        (None, false) => None,
    };

    let mut draft = StoryDraft::new(title, description);
    draft.requestor = requestor;
    draft.screenshot = screenshot(opts)?;
    draft.logs = logs(shell, opts)?;

    let mut attached: Vec<&str> = Vec::new();
    if draft.screenshot.is_some() {
        attached.push("screenshot");
    }
    if draft.logs.is_some() {
        attached.push("logs");
    }
    if attached.is_empty() {
        println!("{}", "Attachments: none".muted());
    } else {
        println!("{}", format!("Attachments: {}", attached.join(", ")).muted());
    }

    Ok(draft)
}

fn screenshot(opts: &ReportOptions) -> Result<Option<Attachment>> {
    if let Some(path) = &opts.screenshot {
        return Ok(Some(screenshot_attachment(path)?));
    }
    if opts.yes {
        return Ok(None);
    }

    let attach = Confirm::new()
        .with_prompt("Attach a screenshot?")
        .default(false)
        .interact()
        .map_err(prompt_failed)?;
    if !attach {
        return Ok(None);
    }

    let path: String = Input::new()
        .with_prompt("Screenshot path")
        .interact_text()
        .map_err(prompt_failed)?;
    Ok(Some(screenshot_attachment(Path::new(&path))?))
}

fn logs(shell: &ReportShell, opts: &ReportOptions) -> Result<Option<Attachment>> {
    if opts.no_logs {
        return Ok(None);
    }

    let attach = opts.yes
        || Confirm::new()
            .with_prompt("Attach logs?")
            .default(true)
            .interact()
            .map_err(prompt_failed)?;
    if !attach {
        return Ok(None);
    }

    let attachment = shell.logs_attachment();
    if attachment.is_none() && opts.log_file.is_some() {
        eprintln!("{}", "Log file could not be read; sending without logs".warn());
    }
    Ok(attachment)
}

async fn file_story(
    shell: &ReportShell,
    draft: StoryDraft,
    destination: &str,
) -> Result<StoryReceipt> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Filing story to {destination}..."));
    spinner.enable_steady_tick(Duration::from_millis(80));

    // Ctrl-C cancels the in-flight submission; the pending future still
    // resolves (with Canceled), so completion is observed exactly once.
    let mut submission = pin!(shell.submit(draft));
    let raced = tokio::select! {
        res = &mut submission => Some(res),
        _ = tokio::signal::ctrl_c() => None,
    };
    let result = match raced {
        Some(res) => res,
        None => {
            spinner.set_message("Canceling...");
            shell.cancel();
            submission.await
        }
    };

    spinner.finish_and_clear();
    result
}

fn screenshot_attachment(path: &Path) -> Result<Attachment> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| "screenshot".to_string(), |n| n.to_string_lossy().into_owned());
    let media_type = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    };
    Ok(Attachment {
        file_name,
        media_type: media_type.to_string(),
        bytes,
    })
}

fn prompt_failed(err: dialoguer::Error) -> Error {
    Error::Io(std::io::Error::other(err))
}
