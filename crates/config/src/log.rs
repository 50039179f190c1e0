// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log level '{0}'. Must be one of: trace, debug, info, warn, error")]
    InvalidLevel(String),

    #[error("Log write path cannot be empty when file output is enabled")]
    EmptyWritePath,

    #[error("Log max file size must be greater than 0")]
    ZeroMaxFileSize,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log Level
    ///
    /// Env: KTON_LOG_LEVEL
    /// Valid values: trace, debug, info, warn, error
    /// Default: info
    pub level: String,

    /// Output logs in JSON format
    ///
    /// Env: KTON_LOG_JSON
    /// Default: false
    pub json: bool,

    /// Strip ANSI color codes from logs
    ///
    /// Env: KTON_LOG_STRIP_ANSI
    /// Default: false
    pub strip_ansi: bool,

    /// Also write logs to a size-rotated file
    ///
    /// Env: KTON_LOG_WRITE
    /// Default: false
    pub write: bool,

    /// Directory for log files
    ///
    /// Env: KTON_LOG_WRITE_PATH
    /// Default: ./logs
    pub write_path: String,

    /// Rotate the log file once it reaches this many bytes
    ///
    /// Env: KTON_LOG_WRITE_MAX_FILE_SIZE
    /// Default: 5242880 (5 MiB)
    pub write_max_file_size: u64,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_write_path() -> String {
    "./logs".to_string()
}

fn default_write_max_file_size() -> u64 {
    5_242_880
}

impl LogConfig {
    pub(crate) fn validate(&self) -> Result<(), LogError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];

        if !valid_levels.contains(&self.level.as_str()) {
            return Err(LogError::InvalidLevel(self.level.clone()));
        }

        if self.write && self.write_path.is_empty() {
            return Err(LogError::EmptyWritePath);
        }

        if self.write_max_file_size == 0 {
            return Err(LogError::ZeroMaxFileSize);
        }

        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            strip_ansi: false,
            write: false,
            write_path: default_write_path(),
            write_max_file_size: default_write_max_file_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
        assert!(!config.strip_ansi);
        assert!(!config.write);
        assert_eq!(config.write_max_file_size, 5_242_880);
    }

    #[test]
    fn test_validate_valid_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let config = LogConfig {
                level: level.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "Level {} should be valid", level);
        }
    }

    #[test]
    fn test_validate_invalid_levels() {
        let config = LogConfig {
            level: "invalid".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LogError::InvalidLevel(_))));
    }

    #[test]
    fn test_validate_file_output() {
        let config = LogConfig {
            write: true,
            write_path: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LogError::EmptyWritePath)));

        let config = LogConfig {
            write_max_file_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LogError::ZeroMaxFileSize)));
    }
}
