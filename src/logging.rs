// src/logging.rs

//! Tracing subscriber setup
//!
//! Console output goes through a `fmt` layer, optional file output through a
//! daily-rolling non-blocking appender. `RUST_LOG` takes precedence over the
//! configured level.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
    Registry,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Error, FileOperation, Result};

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// The more verbose of `self` and the level asked for by the `-v`/`-d`
    /// command line flags. The flags never make logging quieter.
    pub fn raised(self, verbose: bool, debug: bool) -> Self {
        let requested = if debug {
            Self::Debug
        } else if verbose {
            Self::Info
        } else {
            return self;
        };
        self.min(requested)
    }
}

/// Keeps the non-blocking file writers alive; drop it last.
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

impl LoggingGuard {
    pub fn has_file_output(&self) -> bool {
        !self._guards.is_empty()
    }
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_str()))
}

fn format_layer<S, W>(format: LogFormat, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_ansi(ansi)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
    }
}

/// Installs the global subscriber described by `config`.
///
/// Fails if a global subscriber is already set or the log directory cannot
/// be created.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    let mut guard = LoggingGuard::default();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console.enabled {
        layers.push(format_layer(config.format, std::io::stderr, config.console.colored));
    }

    if let Some(file_config) = &config.file {
        let directory = file_config
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = file_config
            .path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("panel-admin.log"));

        std::fs::create_dir_all(directory).map_err(|e| {
            Error::file(
                directory.display().to_string(),
                FileOperation::CreateDirectory,
                format!("Failed to create log directory {}: {}", directory.display(), e),
            )
        })?;

        let file_appender = tracing_appender::rolling::daily(directory, file_name);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard._guards.push(worker_guard);
        layers.push(format_layer(config.format, non_blocking, false));
    }

    Registry::default()
        .with(layers)
        .with(build_filter(config))
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install tracing subscriber: {}", e)))?;

    Ok(guard)
}
