// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub const MAINNET_API_URL: &str = "https://tonapi.io";
pub const TESTNET_API_URL: &str = "https://testnet.tonapi.io";

pub const MAINNET_STAKING_CONTRACT: &str = "EQA9HwEZD_tONfVz6lJS0PVKR5viEiEGyj9AuQewGQVnXPg0";
pub const TESTNET_STAKING_CONTRACT: &str = "kQD2y9eUotYw7VprrD0UJvAigDVXwgCCLWAl-DjaamCHniVr";

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("Staking contract address cannot be empty")]
    EmptyContractAddress,
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Use the testnet deployment
    ///
    /// Env: KTON_NETWORK_TESTNET
    /// Default: false
    pub testnet: bool,

    /// Base URL of the indexer API used by the host application
    ///
    /// Env: KTON_NETWORK_API_URL
    /// Valid schemes: http://, https://
    /// Default: https://tonapi.io (testnet: https://testnet.tonapi.io)
    pub api_url: String,

    /// Staking pool contract address
    ///
    /// Env: KTON_NETWORK_CONTRACT_ADDRESS
    /// Default: the mainnet (or testnet) KTON pool
    pub contract_address: String,
}

impl NetworkConfig {
    /// Defaults for mainnet or testnet.
    pub fn for_network(testnet: bool) -> Self {
        if testnet {
            Self {
                testnet,
                api_url: TESTNET_API_URL.to_string(),
                contract_address: TESTNET_STAKING_CONTRACT.to_string(),
            }
        } else {
            Self {
                testnet,
                api_url: MAINNET_API_URL.to_string(),
                contract_address: MAINNET_STAKING_CONTRACT.to_string(),
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), NetworkError> {
        let parsed = url::Url::parse(&self.api_url).map_err(|e| NetworkError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(NetworkError::InvalidApiUrl {
                    url: self.api_url.clone(),
                    reason: format!("unsupported scheme '{scheme}'"),
                });
            }
        }

        if self.contract_address.trim().is_empty() {
            return Err(NetworkError::EmptyContractAddress);
        }

        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::for_network(false)
    }
}
