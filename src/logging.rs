use crate::error::{NotiError, Result};
use std::env;
use std::io;
use std::path::Path;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Maps a configured level name onto a filter; `verbose` forces at least DEBUG.
pub fn level_filter(level: &str, verbose: bool) -> LevelFilter {
    let configured = match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => LevelFilter::TRACE,
        "DEBUG" => LevelFilter::DEBUG,
        "WARN" | "WARNING" => LevelFilter::WARN,
        "ERROR" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    };
    if verbose {
        configured.max(LevelFilter::DEBUG)
    } else {
        configured
    }
}

/// Installs the global subscriber: compact stderr output, plus a plain-text
/// copy in `log_file` when one is configured.
pub fn init(level: &str, verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = level_filter(level, verbose);
    let no_color = env::var("NO_COLOR").is_ok();

    let stderr_fmt = fmt::format()
        .compact()
        .without_time()
        .with_target(false)
        .with_ansi(!no_color);
    let human = fmt::layer()
        .event_format(stderr_fmt)
        .with_writer(io::stderr)
        .with_filter(env_filter(level));

    let file = match log_file {
        Some(path) => {
            let (dir, name) = split_log_path(path)?;
            let writer = tracing_appender::rolling::never(dir, name);
            let logfile_fmt = fmt::format().compact().with_target(false).with_ansi(false);
            Some(
                fmt::layer()
                    .event_format(logfile_fmt)
                    .with_writer(writer)
                    .with_filter(env_filter(level)),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry().with(human).with(file);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| NotiError::Logging(e.to_string()))
}

fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let name = path.file_name().ok_or_else(|| {
        NotiError::Logging(format!("Log file '{}' has no file name", path.display()))
    })?;
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, name))
}
