//! Logging system configuration and initialization
//!
//! - Console output on stderr, leaving stdout to the extracted records
//! - Optional file output through a non-blocking appender
//! - Optional structured JSON format
//! - Level and per-module filters from configuration, `RUST_LOG` overriding both
//! - Timestamps in local time

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::infrastructure::config::defaults;
pub use crate::infrastructure::config::LoggingConfig;

// Global guard to keep the log file writer alive
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Local time with millisecond precision
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Directory for the log file: the configured one, else the platform data directory
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    config.log_dir.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .map(|dir| dir.join(defaults::CONFIG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("logs")
    })
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(LoggingConfig::default())
}

/// Filter from `RUST_LOG` when set, otherwise from the configured level and module filters
fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = EnvFilter::try_new(&config.level)
            .unwrap_or_else(|_| EnvFilter::new(defaults::LOG_LEVEL));

        let mut modules: Vec<_> = config.module_filters.iter().collect();
        modules.sort();
        for (module, level) in modules {
            if let Ok(directive) = format!("{module}={level}").parse() {
                filter = filter.add_directive(directive);
            }
        }
        filter
    })
}

/// Initialize logging with custom configuration
///
/// # Environment Variable Override
/// ```bash
/// RUST_LOG="debug,html5ever=warn" serp-extract page.html
/// ```
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut log_file = None;

    if config.file_output {
        let log_dir = get_log_directory(&config);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let file_appender = rolling::never(&log_dir, defaults::LOG_FILE_NAME);
        let (file_writer, file_guard) = non_blocking(file_appender);

        // Store the guard globally to prevent it from being dropped
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry is poisoned"))?
            .push(file_guard);

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_timer(LocalTimeFormatter)
            .with_ansi(false);
        layers.push(if config.json_format {
            file_layer
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed()
        } else {
            file_layer.with_target(false).boxed()
        });
        log_file = Some(log_dir.join(defaults::LOG_FILE_NAME));
    }

    if config.console_output {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(LocalTimeFormatter);
        layers.push(if config.json_format {
            console_layer.json().boxed()
        } else {
            console_layer.with_target(false).boxed()
        });
    }

    if layers.is_empty() {
        return Err(anyhow!("No logging output configured"));
    }

    Registry::default()
        .with(layers)
        .with(build_env_filter(&config))
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    info!("JSON format: {}", config.json_format);
    if let Some(path) = log_file {
        info!("Log file: {}", path.display());
    }

    Ok(())
}
