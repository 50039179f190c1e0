// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use super::{Address, CellBlob};
use crate::cache::precision::big_int;

/// Field layout of `get_pool_full_data`, distinguished by stack length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// 34 slots: adds `instant_withdrawal_fee` and the governance trailer.
    Current,
    /// Anything else, historically 31 slots.
    Legacy,
}

impl SchemaVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::Current => "current",
            SchemaVersion::Legacy => "legacy",
        }
    }
}

/// Lending statistics of one validation round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundInfo {
    /// Dictionary of borrowers; `None` when the round has none.
    pub borrowers: Option<CellBlob>,
    pub round_id: u32,
    #[serde(with = "big_int")]
    pub active_borrowers: BigInt,
    #[serde(with = "big_int")]
    pub borrowed: BigInt,
    #[serde(with = "big_int")]
    pub expected: BigInt,
    #[serde(with = "big_int")]
    pub returned: BigInt,
    #[serde(with = "big_int")]
    pub profit: BigInt,
}

/// Decoded snapshot of the staking pool contract.
///
/// Rates and fees are fixed-point fractions with a 2^24 denominator. Fields
/// the legacy layout does not carry hold their documented defaults
/// (`instant_withdrawal_fee = 0`, `accrued_governance_fee = 0`,
/// `disbalance_tolerance = 30`, `credit_start_prior_elections_end = 0`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolState {
    pub schema_version: SchemaVersion,

    pub state: u8,
    pub halted: bool,
    #[serde(with = "big_int")]
    pub total_balance: BigInt,
    pub interest_rate: u32,
    pub optimistic_deposit_withdrawals: bool,
    pub deposits_open: bool,
    pub instant_withdrawal_fee: u32,
    #[serde(with = "big_int")]
    pub saved_validator_set_hash: BigInt,

    pub previous_round: RoundInfo,
    pub current_round: RoundInfo,

    #[serde(with = "big_int")]
    pub min_loan: BigInt,
    #[serde(with = "big_int")]
    pub max_loan: BigInt,
    pub governance_fee: u32,
    #[serde(with = "big_int")]
    pub accrued_governance_fee: BigInt,
    pub disbalance_tolerance: u32,
    pub credit_start_prior_elections_end: u64,

    pub pool_jetton_minter: Address,
    #[serde(with = "big_int")]
    pub pool_jetton_supply: BigInt,
    pub deposit_payout: Option<Address>,
    #[serde(with = "big_int")]
    pub requested_for_deposit: BigInt,
    pub withdrawal_payout: Option<Address>,
    #[serde(with = "big_int")]
    pub requested_for_withdrawal: BigInt,

    pub sudoer: Option<Address>,
    pub sudoer_set_at: u64,
    pub governor: Address,
    pub governor_update_after: u64,
    pub interest_manager: Address,
    pub halter: Address,
    pub approver: Address,

    pub controller_code: CellBlob,
    pub jetton_wallet_code: CellBlob,
    pub payout_minter_code: CellBlob,

    #[serde(with = "big_int")]
    pub projected_total_balance: BigInt,
    #[serde(with = "big_int")]
    pub projected_pool_supply: BigInt,
}

impl PoolState {
    pub const DEFAULT_DISBALANCE_TOLERANCE: u32 = 30;
}
