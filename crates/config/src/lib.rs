// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod cache;
mod contract;
mod error;
mod log;
mod network;

pub use args::Args;
pub use cache::{CacheConfig, CacheError};
pub use contract::{ContractConfig, ContractError};
pub use error::ConfigError;
pub use log::{LogConfig, LogError};
pub use network::{
    MAINNET_API_URL, MAINNET_STAKING_CONTRACT, NetworkConfig, NetworkError, TESTNET_API_URL,
    TESTNET_STAKING_CONTRACT,
};

use serde::Deserialize;
use std::path::Path;

/// Prefix shared by every environment variable this crate reads.
pub const ENV_PREFIX: &str = "KTON_";

/// Flat view of the environment, as envy sees it.
///
/// Every variable is optional; missing values fall back to the section
/// defaults.
#[derive(Debug, Default, Deserialize)]
struct EnvConfig {
    network_testnet: Option<bool>,
    network_api_url: Option<String>,
    network_contract_address: Option<String>,

    contract_partner_code: Option<u64>,

    cache_ttl_ms: Option<u64>,
    cache_prefix: Option<String>,
    cache_path: Option<String>,

    log_level: Option<String>,
    log_json: Option<bool>,
    log_strip_ansi: Option<bool>,
    log_write: Option<bool>,
    log_write_path: Option<String>,
    log_write_max_file_size: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct SdkConfig {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub cache: CacheConfig,
    pub log: LogConfig,
}

impl SdkConfig {
    /// Load configuration from `KTON_*` process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = envy::prefixed(ENV_PREFIX).from_env::<EnvConfig>()?;
        Self::from_parts(env)
    }

    /// Load a `.env` file (if it exists) into the process environment, then
    /// read the configuration from it.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            dotenv::from_path(path).map_err(|e| ConfigError::EnvFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        Self::from_env()
    }

    /// Build a configuration from explicit `(KEY, value)` pairs, using the
    /// same names as the environment.
    pub fn from_iter<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvConfig>(vars)?;
        Self::from_parts(env)
    }

    fn from_parts(env: EnvConfig) -> Result<Self, ConfigError> {
        let testnet = env.network_testnet.unwrap_or(false);
        let network_defaults = NetworkConfig::for_network(testnet);
        let network = NetworkConfig {
            testnet,
            api_url: env.network_api_url.unwrap_or(network_defaults.api_url),
            contract_address: env
                .network_contract_address
                .unwrap_or(network_defaults.contract_address),
        };

        let contract_defaults = ContractConfig::default();
        let contract = ContractConfig {
            partner_code: env
                .contract_partner_code
                .unwrap_or(contract_defaults.partner_code),
        };

        let cache_defaults = CacheConfig::default();
        let cache = CacheConfig {
            ttl_ms: env.cache_ttl_ms.unwrap_or(cache_defaults.ttl_ms),
            prefix: env.cache_prefix.unwrap_or(cache_defaults.prefix),
            path: env.cache_path.or(cache_defaults.path),
        };

        let log_defaults = LogConfig::default();
        let log = LogConfig {
            level: env.log_level.unwrap_or(log_defaults.level),
            json: env.log_json.unwrap_or(log_defaults.json),
            strip_ansi: env.log_strip_ansi.unwrap_or(log_defaults.strip_ansi),
            write: env.log_write.unwrap_or(log_defaults.write),
            write_path: env.log_write_path.unwrap_or(log_defaults.write_path),
            write_max_file_size: env
                .log_write_max_file_size
                .unwrap_or(log_defaults.write_max_file_size),
        };

        let config = Self {
            network,
            contract,
            cache,
            log,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.network.validate()?;
        self.contract.validate()?;
        self.cache.validate()?;
        self.log.validate()?;
        Ok(())
    }
}
