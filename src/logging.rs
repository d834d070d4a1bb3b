//! Logging setup using the tracing ecosystem.
//!
//! The client emits `tracing` spans and events on its own; these helpers are
//! for applications that want a subscriber without wiring one themselves.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log filter if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "jira_sdk=info,warn";

/// File name prefix for rotated log files.
const LOG_FILE_NAME: &str = "jira-sdk.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install a global subscriber writing to stderr.
///
/// The level is taken from `RUST_LOG` (e.g. `RUST_LOG=jira_sdk=debug`),
/// defaulting to `jira_sdk=info,warn`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(env_filter());

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "jira-sdk logging initialized");
    Ok(())
}

/// Install a global subscriber writing daily-rotated files into `log_dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a global
/// subscriber is already set.
pub fn init_file(log_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(env_filter());

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jira-sdk logging initialized");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");
    Ok(())
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("jira-sdk").join("logs"))
}

/// The platform default log directory, for use with [`init_file`].
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_has_expected_structure() {
        if let Some(dir) = log_directory() {
            assert!(dir.ends_with("jira-sdk/logs"));
        }
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
