// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use kton_sdk_config::LogConfig;
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Rotated files kept next to the active one (`kton.log.1` .. `kton.log.9`).
const MAX_ROTATED_FILES: usize = 9;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {reason}")]
    InvalidLogLevel { level: String, reason: String },

    #[error("Failed to prepare log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global subscriber described by `config`.
///
/// With file output enabled the returned guard flushes the background writer
/// on drop; keep it alive for as long as logs should be written.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = EnvFilter::try_new(&config.level).map_err(|e| LoggingError::InvalidLogLevel {
        level: config.level.clone(),
        reason: e.to_string(),
    })?;
    let registry = tracing_subscriber::registry().with(filter);

    if !config.write {
        let result = if config.json {
            registry.with(fmt::layer().json()).try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(!config.strip_ansi),
                )
                .try_init()
        };
        result.map_err(|e| LoggingError::Init(e.to_string()))?;
        return Ok(None);
    }

    std::fs::create_dir_all(&config.write_path)?;
    let file_appender = BasicRollingFileAppender::new(
        PathBuf::from(&config.write_path).join("kton.log"),
        RollingConditionBasic::new().max_size(config.write_max_file_size),
        MAX_ROTATED_FILES,
    )?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let result = if config.json {
        registry
            .with(fmt::layer().json())
            .with(fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(!config.strip_ansi),
            )
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init()
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))?;
    Ok(Some(guard))
}
