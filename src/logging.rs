//! Tracing subscriber setup
//!
//! The TUI owns the terminal, so in TUI mode events go to a log file through a
//! non-blocking writer. Report commands log to stderr to keep stdout clean for
//! tables and JSON.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{default_log_path, LoggingConfig};
use crate::types::{DashboardError, Result};

/// Overrides the configured level, same syntax as `RUST_LOG`
pub const LOG_ENV_VAR: &str = "EXECDASH_LOG";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// File for the TUI (configured path or the data dir default), stderr otherwise
    pub fn for_mode(config: &LoggingConfig, tui: bool) -> Self {
        match (&config.file, tui) {
            (Some(path), _) => Self::File(path.clone()),
            (None, true) => default_log_path().map_or(Self::Stderr, Self::File),
            (None, false) => Self::Stderr,
        }
    }
}

/// `EXECDASH_LOG` if set and valid, else the configured level
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the guard alive until exit or buffered
/// file output is lost.
pub fn init(config: &LoggingConfig, target: &LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| DashboardError::Config(format!("logging: {}", e)))?;
            Ok(None)
        }
        LogTarget::File(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .try_init()
                .map_err(|e| DashboardError::Config(format!("logging: {}", e)))?;
            Ok(Some(guard))
        }
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str, file: Option<PathBuf>) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            file,
        }
    }

    #[test]
    fn test_log_target_reports_use_stderr() {
        assert_eq!(
            LogTarget::for_mode(&logging("info", None), false),
            LogTarget::Stderr
        );
    }

    #[test]
    fn test_log_target_configured_file_wins() {
        let path = PathBuf::from("/tmp/execdash-test.log");
        let config = logging("info", Some(path.clone()));
        assert_eq!(LogTarget::for_mode(&config, false), LogTarget::File(path.clone()));
        assert_eq!(LogTarget::for_mode(&config, true), LogTarget::File(path));
    }

    #[test]
    fn test_log_target_tui_never_stderr_when_data_dir_known() {
        let target = LogTarget::for_mode(&logging("info", None), true);
        if let Some(default) = default_log_path() {
            assert_eq!(target, LogTarget::File(default));
        }
    }

    #[test]
    fn test_build_filter_uses_configured_level() {
        // EXECDASH_LOG is not set in the test environment
        let filter = build_filter(&logging("debug", None));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_build_filter_invalid_level_falls_back() {
        let filter = build_filter(&logging("execdash=loud", None));
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("execdash.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
