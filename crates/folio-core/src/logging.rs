//! File logging.
//!
//! Logs go to `$FOLIO_HOME/logs/folio.log`, never to the terminal, so they
//! cannot tear the TUI or mix with typewriter frames on stdout.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

/// Environment variable holding the log filter, e.g. `folio_core=debug`.
pub const LOG_ENV: &str = "FOLIO_LOG";
pub const LOG_FILE: &str = "folio.log";

/// Installs the global subscriber writing to the default logs directory.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
///
/// # Errors
/// Returns an error if the logs directory cannot be created or a global
/// subscriber is already installed.
pub fn init() -> Result<WorkerGuard> {
    init_in(&paths::logs_dir())
}

/// Like [`init`], logging into `dir`.
///
/// # Errors
/// See [`init`].
pub fn init_in(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create logs directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;

    Ok(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        let guard = init_in(&logs).unwrap();
        tracing::info!("hello from test");
        drop(guard);

        assert!(logs.join(LOG_FILE).exists());
        // A second global subscriber is refused.
        assert!(init_in(&logs).is_err());
    }
}
