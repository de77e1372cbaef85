//! Logging utilities
//!
//! The library itself only emits `log` records. Hosts call
//! [`initialize_logging`] once at startup to route them, and any `tracing`
//! events, into a log file.

use std::path::PathBuf;

use config::{ConfigError, FileFormat};
use serde::Deserialize;
use tracing_error::ErrorLayer;
use tracing_subscriber::{filter::EnvFilter, prelude::*, Layer};

use super::paths::{get_config_dir, get_data_dir, LOG_ENV, PROJECT_NAME};
use crate::Result;

const DEFAULTS: &str = include_str!("../../.config/logging.json5");

/// Where and how much to log
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives used when no environment override is set
    pub filter: String,
    /// Directory of the log file, the data dir when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
    pub file_name: String,
}

impl LogConfig {
    /// Embedded defaults, then `logging.*` in the config dir, then
    /// `TEA_GLUE_*` environment variables
    pub fn new() -> std::result::Result<Self, ConfigError> {
        let defaults: LogConfig = json5::from_str(DEFAULTS).map_err(|e| {
            ConfigError::Message(format!("Failed to load default logging config: {e}"))
        })?;
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("filter", defaults.filter)?
            .set_default("file_name", defaults.file_name)?;

        let config_files = [
            ("logging.json5", FileFormat::Json5),
            ("logging.json", FileFormat::Json),
            ("logging.yaml", FileFormat::Yaml),
            ("logging.toml", FileFormat::Toml),
        ];
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
        }
        builder = builder.add_source(config::Environment::with_prefix(PROJECT_NAME.as_str()));

        builder.build()?.try_deserialize()
    }

    pub fn directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(get_data_dir)
    }

    /// `RUST_LOG` wins, then `TEA_GLUE_LOGLEVEL`, then the configured filter
    pub fn resolved_filter(&self) -> String {
        std::env::var("RUST_LOG")
            .or_else(|_| std::env::var(LOG_ENV.as_str()))
            .unwrap_or_else(|_| self.filter.clone())
    }
}

pub fn initialize_logging() -> Result<()> {
    initialize_logging_with(&LogConfig::new()?)
}

pub fn initialize_logging_with(config: &LogConfig) -> Result<()> {
    let directory = config.directory();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(&config.file_name);
    let log_file = std::fs::File::create(&log_path)?;
    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::try_new(config.resolved_filter())?);
    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;
    log::debug!("logging to {}", log_path.display());
    Ok(())
}

/// Similar to the `std::dbg!` macro, but generates `tracing` events rather
/// than printing to stdout.
///
/// By default, the verbosity level for the generated events is `DEBUG`, but
/// this can be customized.
#[macro_export]
macro_rules! trace_dbg {
    (target: $target:expr, level: $level:expr, $ex:expr) => {{
        match $ex {
            value => {
                $crate::tracing::event!(target: $target, $level, ?value, stringify!($ex));
                value
            }
        }
    }};
    (level: $level:expr, $ex:expr) => {
        $crate::trace_dbg!(target: module_path!(), level: $level, $ex)
    };
    (target: $target:expr, $ex:expr) => {
        $crate::trace_dbg!(target: $target, level: $crate::tracing::Level::DEBUG, $ex)
    };
    ($ex:expr) => {
        $crate::trace_dbg!(level: $crate::tracing::Level::DEBUG, $ex)
    };
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_embedded_defaults() {
        let defaults: LogConfig = json5::from_str(DEFAULTS).expect("defaults must parse");
        assert_eq!(
            defaults,
            LogConfig {
                filter: "tea_glue=info".to_string(),
                directory: None,
                file_name: "tea_glue.log".to_string(),
            }
        );
    }

    #[test]
    fn test_new_layers_over_defaults() -> Result<()> {
        let config = LogConfig::new()?;
        assert!(!config.filter.is_empty());
        assert!(!config.file_name.is_empty());
        Ok(())
    }

    #[test]
    fn test_directory_falls_back_to_data_dir() {
        let config = LogConfig {
            filter: "info".to_string(),
            directory: None,
            file_name: "x.log".to_string(),
        };
        assert_eq!(config.directory(), get_data_dir());
    }

    #[test]
    fn test_initialize_logging_writes_file() -> Result<()> {
        let directory = std::env::temp_dir().join(format!("tea-glue-log-{}", std::process::id()));
        let config = LogConfig {
            filter: "debug".to_string(),
            directory: Some(directory.clone()),
            file_name: "test.log".to_string(),
        };
        initialize_logging_with(&config)?;
        assert_eq!(crate::trace_dbg!(1 + 1), 2);
        assert!(directory.join("test.log").exists());
        Ok(())
    }
}
