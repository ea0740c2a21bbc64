//! Logging setup on top of `tracing`.
//!
//! With file logging enabled, logs go to `~/.config/winlabel/logs/`
//! and roll over daily, keeping `max_files` files. Otherwise they go
//! to stderr. `RUST_LOG` overrides the configured level.

use serde::{Deserialize, Serialize};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "winlabel";
const LOG_FILE_SUFFIX: &str = "log";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level or a full `EnvFilter` directive.
    pub level: String,
    /// Number of daily log files kept before the oldest is deleted.
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_files: 5,
        }
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// Later calls are ignored. If the log directory cannot be used the
/// subscriber falls back to stderr.
pub fn init(config: &LogConfig) {
    if config.enabled {
        match file_appender(config) {
            Ok(appender) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter(config))
                    .with_ansi(false)
                    .with_writer(appender)
                    .try_init();
                return;
            }
            Err(e) => eprintln!("Warning: file logging disabled: {e}"),
        }
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(std::io::stderr)
        .try_init();
}

fn filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn file_appender(config: &LogConfig) -> Result<RollingFileAppender, String> {
    let dir = crate::config::config_dir()
        .ok_or("could not determine home directory")?
        .join("logs");
    std::fs::create_dir_all(&dir).map_err(|e| format!("{}: {e}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(config.max_files)
        .build(&dir)
        .map_err(|e| format!("{}: {e}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_is_off_by_default() {
        let config = LogConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn partial_section_keeps_defaults() {
        // Arrange
        let toml_str = "enabled = true\n";

        // Act
        let config: LogConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert!(config.enabled);
        assert_eq!(config.max_files, 5);
    }
}
