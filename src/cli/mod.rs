//! CLI commands
//!
//! Command implementations for the `gripe` binary.

mod auth;
mod report;
mod style;

pub use auth::run_auth;
pub use report::{ReportOptions, run_report};
