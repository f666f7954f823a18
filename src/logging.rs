//! Logging setup for the command-line tools.
//!
//! Console output goes to stderr so stdout carries only the report. Each launch
//! also appends to its own timestamped file under
//! `<config dir>/.iris-classifier/logs`, and older files beyond
//! [`MAX_LOG_FILES`] are removed at startup.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use directories::BaseDirs;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

/// Environment variable replacing the OS config directory as the log root.
pub const CONFIG_HOME_ENV: &str = "IRIS_CONFIG_HOME";
/// Number of launch logs kept on disk.
pub const MAX_LOG_FILES: usize = 10;

const APP_DIR_NAME: &str = ".iris-classifier";
const LOG_FILE_PREFIX: &str = "iris-classifier_";
const LOG_FILE_SUFFIX: &str = "log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("No config directory available for log files")]
    NoBaseDir,
    #[error("Log directory {path} is unusable: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to open log file: {0}")]
    OpenFile(#[from] InitError),
    #[error("Failed to format log file name: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the stderr + file subscriber and return the directory written to.
///
/// Only the first call installs anything. Callers treat an error as "run
/// without logging".
pub fn init() -> Result<PathBuf, LoggingError> {
    let dir = log_dir()?;
    if LOG_GUARD.get().is_some() {
        return Ok(dir);
    }

    let stem = log_file_stem(now_local_or_utc())?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&stem)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(&dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);
    let removed = prune_old_logs(&dir, MAX_LOG_FILES)?;

    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(offset, TIMESTAMP);
    let subscriber = Registry::default()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::debug!(
        "Logging to {}/{stem}.{LOG_FILE_SUFFIX} ({removed} old files removed)",
        dir.display()
    );
    Ok(dir)
}

/// `<base>/.iris-classifier/logs`, created on demand.
///
/// The base is `IRIS_CONFIG_HOME` when set to a non-blank value, otherwise the
/// platform config directory.
pub fn log_dir() -> Result<PathBuf, LoggingError> {
    let base = std::env::var_os(CONFIG_HOME_ENV)
        .filter(|value| !value.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
        .ok_or(LoggingError::NoBaseDir)?;
    let dir = base.join(APP_DIR_NAME).join("logs");
    fs::create_dir_all(&dir).map_err(|source| LoggingError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

const TIMESTAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

fn log_file_stem(now: OffsetDateTime) -> Result<String, LoggingError> {
    const STAMP: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!("{LOG_FILE_PREFIX}{}", now.format(STAMP)?))
}

fn is_launch_log(name: &str) -> bool {
    name.strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(LOG_FILE_SUFFIX))
        .is_some_and(|stamp| stamp.ends_with('.'))
}

/// Remove launch logs beyond `keep`, oldest first. Returns how many went.
///
/// The zero-padded stamp in each name sorts chronologically, so file
/// metadata is never consulted.
fn prune_old_logs(dir: &Path, keep: usize) -> Result<usize, LoggingError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LoggingError::Io { path, source }
    };
    let mut names = fs::read_dir(dir)
        .map_err(io_error(dir))?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_launch_log(name))
        .collect::<Vec<_>>();
    names.sort_unstable();

    let excess = names.len().saturating_sub(keep);
    for name in &names[..excess] {
        let path = dir.join(name);
        fs::remove_file(&path).map_err(io_error(&path))?;
    }
    Ok(excess)
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
