// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Message bodies and wallet transaction requests for staking and unstaking.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boc::{BocError, Cell, CellBuilder, serialize_boc};
use crate::consts::{
    NANO_PER_TON, OP_STAKE, OP_UNSTAKE, RECOMMENDED_FEE_RESERVE, STAKE_FEE_RESERVE,
    TRANSACTION_TIMEOUT_MS, UNSTAKE_FEE_RESERVE,
};
use crate::types::Address;

const NANO_DECIMALS: usize = 9;
const STAKE_QUERY_ID: u64 = 1;
const UNSTAKE_QUERY_ID: u64 = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Invalid amount specified: {0}")]
    InvalidAmount(String),

    #[error("Failed to build message body: {0}")]
    Cell(#[from] BocError),
}

/// How the pool should settle a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnstakeMode {
    /// Instant if liquidity allows, otherwise a payout at round end.
    #[default]
    Standard,
    /// Instant or nothing.
    Instant,
    /// Wait for the round to end for the best rate.
    BestRate,
}

impl UnstakeMode {
    fn flags(self) -> (bool, bool) {
        match self {
            UnstakeMode::Standard => (false, false),
            UnstakeMode::Instant => (false, true),
            UnstakeMode::BestRate => (true, false),
        }
    }
}

/// Parse a decimal coin amount (`"1.5"`) into nano-units.
pub fn to_nano(amount: &str) -> Result<u128, PayloadError> {
    let invalid = || PayloadError::InvalidAmount(amount.to_string());
    let text = amount.trim();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty()
        || !all_digits(whole)
        || !all_digits(fraction)
        || fraction.len() > NANO_DECIMALS
        || (text.contains('.') && fraction.is_empty())
    {
        return Err(invalid());
    }
    let whole: u128 = whole.parse().map_err(|_| invalid())?;
    let fraction: u128 = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<NANO_DECIMALS$}");
        padded.parse().map_err(|_| invalid())?
    };
    whole
        .checked_mul(NANO_PER_TON)
        .and_then(|n| n.checked_add(fraction))
        .ok_or_else(invalid)
}

fn positive(amount: u128) -> Result<u128, PayloadError> {
    if amount == 0 {
        return Err(PayloadError::InvalidAmount(amount.to_string()));
    }
    Ok(amount)
}

/// `op:uint32 query_id:uint64 partner_code:uint64`
pub fn stake_body(partner_code: u64) -> Result<Cell, PayloadError> {
    let mut b = CellBuilder::new();
    b.store_uint(OP_STAKE, 32)?
        .store_uint(STAKE_QUERY_ID, 64)?
        .store_uint(partner_code, 64)?;
    Ok(b.build())
}

/// `op:uint32 query_id:uint64 amount:coins owner:address
/// settings:(Maybe ^[wait_till_round_end:bit fill_or_kill:bit])`
pub fn unstake_body(
    amount: u128,
    owner: &Address,
    mode: UnstakeMode,
) -> Result<Cell, PayloadError> {
    let (wait_till_round_end, fill_or_kill) = mode.flags();
    let mut settings = CellBuilder::new();
    settings
        .store_bit(wait_till_round_end)?
        .store_bit(fill_or_kill)?;

    let mut b = CellBuilder::new();
    b.store_uint(OP_UNSTAKE, 32)?
        .store_uint(UNSTAKE_QUERY_ID, 64)?
        .store_coins(positive(amount)?)?
        .store_address(Some(owner))?
        .store_maybe_ref(Some(settings.build()))?;
    Ok(b.build())
}

/// Standard base64 of the single-root container with checksum.
pub fn encode_body(body: &Cell) -> String {
    STANDARD.encode(serialize_boc(body, true))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMessage {
    /// Destination in canonical user-friendly form.
    pub address: String,
    /// Attached value in nano-units, decimal.
    pub amount: String,
    /// Base64 message body.
    pub payload: String,
}

/// Request handed to a wallet connector for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Expiry in milliseconds since the epoch.
    pub valid_until: u64,
    pub messages: Vec<TransactionMessage>,
}

impl TransactionRequest {
    fn single(destination: &Address, amount: u128, body: &Cell, now_ms: u64) -> Self {
        Self {
            valid_until: now_ms + TRANSACTION_TIMEOUT_MS,
            messages: vec![TransactionMessage {
                address: destination.to_string(),
                amount: amount.to_string(),
                payload: encode_body(body),
            }],
        }
    }
}

/// Deposit `amount` into the pool, attaching the stake fee reserve.
pub fn stake_request(
    pool: &Address,
    amount: u128,
    partner_code: u64,
    now_ms: u64,
) -> Result<TransactionRequest, PayloadError> {
    let attached = positive(amount)?
        .checked_add(STAKE_FEE_RESERVE)
        .ok_or_else(|| PayloadError::InvalidAmount(amount.to_string()))?;
    let body = stake_body(partner_code)?;
    Ok(TransactionRequest::single(pool, attached, &body, now_ms))
}

/// Burn `amount` of pool jettons held by `owner`'s jetton wallet.
pub fn unstake_request(
    jetton_wallet: &Address,
    owner: &Address,
    amount: u128,
    mode: UnstakeMode,
    now_ms: u64,
) -> Result<TransactionRequest, PayloadError> {
    let body = unstake_body(amount, owner, mode)?;
    Ok(TransactionRequest::single(
        jetton_wallet,
        UNSTAKE_FEE_RESERVE,
        &body,
        now_ms,
    ))
}

/// Largest amount that can be staked from `balance` while keeping the
/// recommended fee reserve.
pub fn max_stake_amount(balance: u128) -> u128 {
    balance.saturating_sub(RECOMMENDED_FEE_RESERVE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::MINTER;

    const PARTNER_CODE: u64 = 0x7474_6f6e;

    #[test]
    fn test_to_nano() {
        assert_eq!(to_nano("1").unwrap(), 1_000_000_000);
        assert_eq!(to_nano("1.5").unwrap(), 1_500_000_000);
        assert_eq!(to_nano("0.000000001").unwrap(), 1);
        assert_eq!(to_nano(" 12.05 ").unwrap(), 12_050_000_000);
        assert_eq!(to_nano("0").unwrap(), 0);
        for bad in ["", "-1", "1.", ".5", "1.0000000001", "abc", "1,5", "1.2.3", "+1"] {
            assert!(
                matches!(to_nano(bad), Err(PayloadError::InvalidAmount(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_stake_body_bytes() {
        let body = stake_body(PARTNER_CODE).unwrap();
        assert_eq!(body.bit_len(), 160);
        assert_eq!(
            encode_body(&body),
            "te6cckEBAQEAFgAAKEfVQ5EAAAAAAAAAAQAAAAB0dG9u51fCJw=="
        );
    }

    #[test]
    fn test_unstake_body_bytes() {
        let body = unstake_body(1_500_000_000, &MINTER, UnstakeMode::Instant).unwrap();
        assert_eq!(
            encode_body(&body),
            "te6cckEBAgEAOAABZFlfB7wAAAAAAAAAAEWWgvAIACIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIjAQABYOKxIq8="
        );
        let body = unstake_body(1_500_000_000, &MINTER, UnstakeMode::BestRate).unwrap();
        assert_eq!(
            encode_body(&body),
            "te6cckEBAgEAOAABZFlfB7wAAAAAAAAAAEWWgvAIACIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIjAQABoCaXr2w="
        );
    }

    #[test]
    fn test_unstake_settings_flags() {
        for (mode, expected) in [
            (UnstakeMode::Standard, (false, false)),
            (UnstakeMode::Instant, (false, true)),
            (UnstakeMode::BestRate, (true, false)),
        ] {
            let body = unstake_body(1, &MINTER, mode).unwrap();
            let mut slice = body.parse();
            assert_eq!(slice.load_uint(32).unwrap(), OP_UNSTAKE);
            assert_eq!(slice.load_uint(64).unwrap(), 0);
            assert_eq!(slice.load_coins().unwrap(), 1);
            assert_eq!(slice.load_address().unwrap(), *MINTER);
            let settings = slice.load_maybe_ref().unwrap().unwrap();
            let mut settings = settings.parse();
            let flags = (settings.load_bit().unwrap(), settings.load_bit().unwrap());
            assert_eq!(flags, expected);
        }
    }

    #[test]
    fn test_stake_request() {
        let pool: Address = "EQA9HwEZD_tONfVz6lJS0PVKR5viEiEGyj9AuQewGQVnXPg0"
            .parse()
            .unwrap();
        let request = stake_request(&pool, 2_000_000_000, PARTNER_CODE, 1_000).unwrap();
        assert_eq!(request.valid_until, 601_000);
        assert_eq!(request.messages.len(), 1);
        let message = &request.messages[0];
        assert_eq!(message.address, "EQA9HwEZD_tONfVz6lJS0PVKR5viEiEGyj9AuQewGQVnXPg0");
        assert_eq!(message.amount, "3000000000");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["validUntil"], 601_000);
        assert!(json["messages"][0]["payload"].is_string());
    }

    #[test]
    fn test_zero_amounts_are_rejected() {
        assert!(matches!(
            stake_request(&MINTER, 0, PARTNER_CODE, 0),
            Err(PayloadError::InvalidAmount(_))
        ));
        assert!(matches!(
            unstake_request(&MINTER, &MINTER, 0, UnstakeMode::Standard, 0),
            Err(PayloadError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_unstake_request_attaches_fee_reserve() {
        let request =
            unstake_request(&MINTER, &MINTER, 5, UnstakeMode::Standard, 0).unwrap();
        assert_eq!(request.messages[0].amount, "1050000000");
        assert_eq!(request.messages[0].address, MINTER.to_string());
    }

    #[test]
    fn test_max_stake_amount() {
        assert_eq!(max_stake_amount(5_000_000_000), 3_900_000_000);
        assert_eq!(max_stake_amount(1_000_000_000), 0);
    }
}
