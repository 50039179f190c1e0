// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// Partner code attached to stake messages when none is configured ("tton").
pub const DEFAULT_PARTNER_CODE: u64 = 0x0000_0000_7474_6f6e;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Partner code cannot be 0")]
    ZeroPartnerCode,
}

#[derive(Debug, Clone)]
pub struct ContractConfig {
    /// Partner code written into stake payloads
    ///
    /// Env: KTON_CONTRACT_PARTNER_CODE
    /// Default: 0x74746f6e
    pub partner_code: u64,
}

impl ContractConfig {
    pub(crate) fn validate(&self) -> Result<(), ContractError> {
        if self.partner_code == 0 {
            return Err(ContractError::ZeroPartnerCode);
        }
        Ok(())
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            partner_code: DEFAULT_PARTNER_CODE,
        }
    }
}
