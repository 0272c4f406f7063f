//! Structured logging setup.
//!
//! # Targets
//!
//! | Target | Description |
//! |--------|-------------|
//! | `risk_simulator::orchestrator` | Simulation runs and per-risk outcomes |
//! | `risk_simulator::catalog` | Risk catalog loading |
//! | `risk_simulator::flows` | Sign-up, sign-in, ticker processing |
//! | `risk_simulator::req` | HTTP requests and retries |
//!
//! ```bash
//! RUST_LOG=warn,risk_simulator::orchestrator=debug risk_simulator simulate --all
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON format (best for log aggregation)
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!(
                "Unknown log format '{other}'. Use: pretty, json, compact"
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LogConfig {
    /// Level or filter directive used when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,

    /// Format for stderr logging
    #[serde(default)]
    pub format: LogFormat,

    /// Also write JSON logs to this file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(level)?
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?))
}

fn file_writer(
    path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), Box<dyn std::error::Error>>
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("log file path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(&dir)?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. The returned
/// guard must stay alive for file logs to be flushed.
pub fn init_logging(
    config: &LogConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let filter = build_filter(&config.level)?;

    let stderr_layer = match config.format {
        LogFormat::Json => fmt::layer().with_writer(std::io::stderr).json().boxed(),
        LogFormat::Compact => fmt::layer().with_writer(std::io::stderr).compact().boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
    };

    match &config.log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .json()
                .boxed();
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}
