//! Logging and tracing setup.
//!
//! Human-readable events go to stderr. When a log file or directory is
//! configured, every event is also written as JSON lines through a
//! non-blocking `tracing-appender` writer.
//!
//! Filter precedence: `RUST_LOG` > `-q`/`-v` flags > config `log_level`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Explicit log file path.
const LOG_PATH_ENV: &str = "WORDTALLY_LOG_PATH";
/// Directory for daily-rotated log files.
const LOG_DIR_ENV: &str = "WORDTALLY_LOG_DIR";
/// File name prefix inside a log directory.
const LOG_FILE_PREFIX: &str = "wordtally.jsonl";

/// Where (if anywhere) to write JSONL logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Write to exactly this file.
    pub log_path: Option<PathBuf>,
    /// Write daily-rotated files into this directory.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `WORDTALLY_LOG_PATH` and `WORDTALLY_LOG_DIR`, falling back to the
    /// configured `log_dir` when neither is set.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os(LOG_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let log_dir = std::env::var_os(LOG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(config_log_dir);
        Self { log_path, log_dir }
    }

    /// Whether a file layer will be installed.
    pub const fn writes_file(&self) -> bool {
        self.log_path.is_some() || self.log_dir.is_some()
    }
}

/// Keeps the non-blocking log writer alive. Dropping it flushes the file.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `quiet` means errors only, each `-v`
/// raises the level one step above `default_level`.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => default_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match file_writer(config)? {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(ObservabilityGuard { _file: guard })
}

fn file_writer(
    config: &ObservabilityConfig,
) -> anyhow::Result<Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)>> {
    if let Some(ref path) = config.log_path {
        let (dir, name) = split_log_path(path)?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let appender = tracing_appender::rolling::never(dir, name);
        return Ok(Some(tracing_appender::non_blocking(appender)));
    }
    if let Some(ref dir) = config.log_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        return Ok(Some(tracing_appender::non_blocking(appender)));
    }
    Ok(None)
}

fn split_log_path(path: &Path) -> anyhow::Result<(&Path, &std::ffi::OsStr)> {
    let name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_only_when_configured() {
        assert!(!ObservabilityConfig::default().writes_file());
        let config = ObservabilityConfig {
            log_path: None,
            log_dir: Some(PathBuf::from("/tmp/logs")),
        };
        assert!(config.writes_file());
    }

    #[test]
    fn split_log_path_handles_bare_file_names() {
        let (dir, name) = split_log_path(Path::new("out.jsonl")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "out.jsonl");

        let (dir, name) = split_log_path(Path::new("/var/log/wordtally/run.jsonl")).unwrap();
        assert_eq!(dir, Path::new("/var/log/wordtally"));
        assert_eq!(name, "run.jsonl");
    }

    #[test]
    fn split_log_path_rejects_directories() {
        assert!(split_log_path(Path::new("/")).is_err());
    }
}
