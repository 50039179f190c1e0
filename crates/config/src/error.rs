// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Failed to read env file '{path}': {reason}")]
    EnvFile { path: String, reason: String },

    #[error("Network configuration error: {0}")]
    NetworkError(#[from] crate::network::NetworkError),

    #[error("Contract configuration error: {0}")]
    ContractError(#[from] crate::contract::ContractError),

    #[error("Cache configuration error: {0}")]
    CacheError(#[from] crate::cache::CacheError),

    #[error("Log configuration error: {0}")]
    LogError(#[from] crate::log::LogError),
}
