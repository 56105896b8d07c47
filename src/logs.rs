//! Log data providers
//!
//! The host application decides what "the logs" are: a file on disk, an
//! in-memory ring buffer, anything. The shell captures a provider at
//! construction and invokes it at send time, so the attachment reflects the
//! logs as they are when the user hits send.

use std::path::PathBuf;
use std::sync::Arc;

/// Closure yielding the current log bytes, or `None` when there are none
pub type LogDataProvider = Arc<dyn Fn() -> Option<Vec<u8>> + Send + Sync>;

/// Wrap a closure as a [`LogDataProvider`]
pub fn log_provider_from_fn(
    f: impl Fn() -> Option<Vec<u8>> + Send + Sync + 'static,
) -> LogDataProvider {
    Arc::new(f)
}

/// Provider that reads a log file at send time
///
/// Read failures yield `None` so a missing log file never blocks a report.
pub fn log_provider_from_file(path: impl Into<PathBuf>) -> LogDataProvider {
    let path = path.into();
    Arc::new(move || std::fs::read(&path).ok())
}

/// Provider that never yields logs
pub fn no_logs() -> LogDataProvider {
    Arc::new(|| None)
}
