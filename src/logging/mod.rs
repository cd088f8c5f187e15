//! Logging System
//!
//! Structured logs with configurable verbosity, written to the console, a
//! rolling file, or both.

mod config;


pub use config::{LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig};

use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log file name prefix
pub const LOG_FILE_NAME: &str = "window-transparency.log";

/// Logging system errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for logging operations
pub type LoggingResult<T> = Result<T, LoggingError>;

/// Installed logging system; keep it alive so file output is flushed
pub struct LoggingSystem {
    _guards: Vec<WorkerGuard>,
}

impl LoggingSystem {
    /// Initialize the logging system with the given configuration
    pub fn init(config: LoggingConfig) -> LoggingResult<Self> {
        let mut guards = Vec::new();
        let env_filter = Self::build_env_filter(&config);
        let registry = tracing_subscriber::registry();

        match config.output {
            LogOutput::Console => {
                registry
                    .with(env_filter)
                    .with(Self::create_console_layer(&config))
                    .try_init()
                    .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
            }
            LogOutput::File => {
                let (file_layer, guard) = Self::create_file_layer(&config)?;
                guards.push(guard);
                registry
                    .with(env_filter)
                    .with(file_layer)
                    .try_init()
                    .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
            }
            LogOutput::Both => {
                let console_layer = Self::create_console_layer(&config);
                let (file_layer, guard) = Self::create_file_layer(&config)?;
                guards.push(guard);
                registry
                    .with(env_filter)
                    .with(console_layer)
                    .with(file_layer)
                    .try_init()
                    .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
            }
        }

        Ok(Self { _guards: guards })
    }

    /// Build environment filter from configuration
    fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
        let mut filter = EnvFilter::new(config.level.to_string());

        for (module, level) in &config.module_levels {
            filter = filter.add_directive(
                format!("{}={}", module, level)
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            );
        }

        filter
    }

    /// Create console logging layer
    fn create_console_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_thread_ids(config.include_thread_id)
            .with_file(config.include_file_info)
            .with_line_number(config.include_file_info);

        if config.format == LogFormat::Json {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    }

    /// Create file logging layer with rotation
    fn create_file_layer<S>(
        config: &LoggingConfig,
    ) -> LoggingResult<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard)>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        let log_dir = config
            .log_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("logs"));

        std::fs::create_dir_all(&log_dir).map_err(|e| {
            LoggingError::DirectoryCreationError(format!(
                "Failed to create log directory {:?}: {}",
                log_dir, e
            ))
        })?;

        let rotation = match config.rotation {
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Never => Rotation::NEVER,
        };

        let file_appender = RollingFileAppender::new(rotation, &log_dir, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(config.include_target)
            .with_thread_ids(config.include_thread_id)
            .with_file(config.include_file_info)
            .with_line_number(config.include_file_info)
            .with_ansi(false);

        if config.format == LogFormat::Json {
            Ok((layer.json().boxed(), guard))
        } else {
            Ok((layer.boxed(), guard))
        }
    }
}
