// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use num_bigint::BigInt;

use super::cursor::StackCursor;
use super::schema::{ROUND_LAYOUT, layout_for, resolve_schema};
use super::DecodeError;
use crate::types::{PoolState, RoundInfo, SchemaVersion, TaggedValue};

fn decode_round(mut tuple: StackCursor<'_>) -> Result<RoundInfo, DecodeError> {
    Ok(RoundInfo {
        borrowers: tuple.maybe_cell()?,
        round_id: tuple.small()?,
        active_borrowers: tuple.int()?,
        borrowed: tuple.int()?,
        expected: tuple.int()?,
        returned: tuple.int()?,
        profit: tuple.int()?,
    })
}

/// Decode the result stack of `get_pool_full_data`.
///
/// The layout is chosen from the stack length. Fields missing from the
/// legacy layout take their documented defaults; any failure aborts the
/// whole decode.
pub fn decode_pool_state(stack: &[TaggedValue]) -> Result<PoolState, DecodeError> {
    let schema_version = resolve_schema(stack.len());
    let current = schema_version == SchemaVersion::Current;
    tracing::debug!(
        slots = stack.len(),
        schema = schema_version.as_str(),
        "Decoding pool state"
    );

    let mut c = StackCursor::new(stack, layout_for(schema_version));

    let state = c.small()?;
    let halted = c.flag()?;
    let total_balance = c.int()?;
    let interest_rate = c.small()?;
    let optimistic_deposit_withdrawals = c.flag()?;
    let deposits_open = c.flag()?;
    let instant_withdrawal_fee = if current { c.small()? } else { 0 };
    let saved_validator_set_hash = c.int()?;

    let previous_round = decode_round(c.tuple(ROUND_LAYOUT)?)?;
    let current_round = decode_round(c.tuple(ROUND_LAYOUT)?)?;

    let min_loan = c.int()?;
    let max_loan = c.int()?;
    let governance_fee = c.small()?;
    let (accrued_governance_fee, disbalance_tolerance, credit_start_prior_elections_end) =
        if current {
            (c.int()?, c.small()?, c.small()?)
        } else {
            (BigInt::ZERO, PoolState::DEFAULT_DISBALANCE_TOLERANCE, 0)
        };

    let state = PoolState {
        schema_version,
        state,
        halted,
        total_balance,
        interest_rate,
        optimistic_deposit_withdrawals,
        deposits_open,
        instant_withdrawal_fee,
        saved_validator_set_hash,
        previous_round,
        current_round,
        min_loan,
        max_loan,
        governance_fee,
        accrued_governance_fee,
        disbalance_tolerance,
        credit_start_prior_elections_end,
        pool_jetton_minter: c.address()?,
        pool_jetton_supply: c.int()?,
        deposit_payout: c.optional_address()?,
        requested_for_deposit: c.int()?,
        withdrawal_payout: c.optional_address()?,
        requested_for_withdrawal: c.int()?,
        sudoer: c.optional_address()?,
        sudoer_set_at: c.small()?,
        governor: c.address()?,
        governor_update_after: c.small()?,
        interest_manager: c.address()?,
        halter: c.address()?,
        approver: c.address()?,
        controller_code: c.cell()?,
        jetton_wallet_code: c.cell()?,
        payout_minter_code: c.cell()?,
        projected_total_balance: c.int()?,
        projected_pool_supply: c.int()?,
    };

    if c.position() < stack.len() {
        tracing::debug!(
            ignored = stack.len() - c.position(),
            "Ignoring trailing pool stack slots"
        );
    }
    Ok(state)
}
