//! gripe - file bug stories to your tracker
//!
//! Library crate behind the `gripe` binary: a report shell that collects a
//! bug story (title, description, optional log and screenshot attachments)
//! and files it to Pivotal Tracker or Trello through a pluggable tracker
//! backend. A manual-completion backend lets tests drive submission outcomes
//! without the network.

pub mod auth;
pub mod error;
pub mod logs;
pub mod shell;
pub mod tracker;
pub mod types;
