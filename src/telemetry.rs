//! Logging setup: colored stderr plus a JSON rolling log file.

use anyhow::Result;
use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_LOG_FILE: &str = "logs/survey_cohorts.log";

/// Installs the global subscriber.
///
/// `log_file_path` falls back to `LOG_FILE_PATH`, then to
/// `logs/survey_cohorts.log`. Keep the returned guard alive for as long as
/// file logging is wanted; dropping it flushes the writer.
pub fn init_tracing(log_file_path: Option<&str>) -> Result<WorkerGuard> {
    let log_file_path = log_file_path
        .map(str::to_string)
        .or_else(|| std::env::var("LOG_FILE_PATH").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("survey_cohorts.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}
