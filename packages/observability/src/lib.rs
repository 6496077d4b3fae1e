//! # Observability
//!
//! Logging setup for short-lived responder processes.
//!
//! Services call [`init_with_config`] once at startup and then use the
//! standard `tracing` macros. Stdout is never written to: responders use it
//! for their reply, so log output goes to stderr or to an append-only JSONL
//! file.
//!
//! ## Usage
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "mm-radio-qth".into(),
//!         default_level: "warn".into(),
//!         log_path: Some("/data/logs/mm-radio-qth.jsonl".into()),
//!         ..Default::default()
//!     });
//!
//!     tracing::info!("ready");
//! }
//! ```

mod file_writer;
mod json_layer;

use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use file_writer::{AppendLogWriter, WriterFactory};
use json_layer::JsonLayer;

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service, included in every JSONL line.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional JSONL log file. Parent directories are created on demand.
    pub log_path: Option<PathBuf>,

    /// Also emit compact logs to stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

impl LogConfig {
    /// Whether the stderr layer is installed for this configuration.
    ///
    /// Stderr is used when asked for, and always when there is no file sink.
    pub fn wants_stderr(&self) -> bool {
        self.also_stderr || self.log_path.is_none()
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_level))
    }
}

/// Initialize logging with custom configuration.
///
/// Never panics: if the log file cannot be opened, logging falls back to
/// stderr, and a second initialization in the same process is ignored.
pub fn init_with_config(config: LogConfig) {
    let mut file_error = None;
    let json_layer = match &config.log_path {
        Some(path) => match AppendLogWriter::new(path) {
            Ok(writer) => Some(
                JsonLayer::new(config.service_name.clone(), WriterFactory::new(writer))
                    .with_filter(config.env_filter()),
            ),
            Err(e) => {
                file_error = Some((path.clone(), e));
                None
            }
        },
        None => None,
    };

    let stderr_layer = if config.wants_stderr() || file_error.is_some() {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_writer(io::stderr)
                .with_ansi(false)
                .with_filter(config.env_filter()),
        )
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(json_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if !installed {
        return;
    }

    match file_error {
        Some((path, e)) => tracing::warn!(
            log_path = %path.display(),
            error = %e,
            "could not open log file, logging to stderr"
        ),
        None => tracing::debug!(service = %config.service_name, "observability initialized"),
    }
}
