// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

/// Nano-units per coin.
pub const NANO_PER_TON: u128 = 1_000_000_000;

/// Denominator of the fixed-point rate and fee fields.
pub const RATE_DENOMINATOR: f64 = 16_777_216.0;

/// Length of one validation round in seconds.
pub const ROUND_DURATION_SECS: f64 = 65_536.0;

pub const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 3600.0;

pub const OP_STAKE: u64 = 0x47d5_4391;
pub const OP_UNSTAKE: u64 = 0x595f_07bc;

/// Attached on top of the staked amount to pay for processing.
pub const STAKE_FEE_RESERVE: u128 = NANO_PER_TON;
/// Attached to every unstake message (1.05).
pub const UNSTAKE_FEE_RESERVE: u128 = 1_050_000_000;
/// Kept aside from a wallet balance when staking the maximum (1.1).
pub const RECOMMENDED_FEE_RESERVE: u128 = 1_100_000_000;

/// Validity window of a transaction request, in milliseconds.
pub const TRANSACTION_TIMEOUT_MS: u64 = 600_000;

pub const GET_POOL_FULL_DATA: &str = "get_pool_full_data";
pub const GET_WALLET_ADDRESS: &str = "get_wallet_address";
pub const GET_WALLET_DATA: &str = "get_wallet_data";

pub const POOL_INFO_KEY: &str = "poolInfo";
pub const JETTON_WALLET_KEY: &str = "jettonWallet";
pub const STAKED_BALANCE_KEY: &str = "stakedBalance";

/// Key suffixes holding per-wallet data.
pub const USER_DATA_KEYS: [&str; 4] = ["payouts", "stakedBalance", "account", "jettonWallet"];
