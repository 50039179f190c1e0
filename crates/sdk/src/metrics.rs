// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Values derived from a decoded [`PoolState`].

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::cache::precision::big_int;
use crate::consts::{RATE_DENOMINATOR, ROUND_DURATION_SECS, SECONDS_PER_YEAR};
use crate::types::PoolState;

/// Annualised yield as a fraction (`0.05` is 5%).
///
/// One round's return net of the governance fee, times rounds per year,
/// halved because only every other round lends a given stake.
pub fn current_apy(pool: &PoolState) -> f64 {
    let round_roi = (f64::from(pool.interest_rate) / RATE_DENOMINATOR)
        * (1.0 - f64::from(pool.governance_fee) / RATE_DENOMINATOR);
    let rounds_per_year = SECONDS_PER_YEAR / ROUND_DURATION_SECS;
    round_roi * rounds_per_year / 2.0
}

/// Funds held by the pool plus funds lent out in both tracked rounds.
pub fn tvl(pool: &PoolState) -> BigInt {
    &pool.total_balance + &pool.current_round.borrowed + &pool.previous_round.borrowed
}

/// Amount withdrawable right away.
pub fn instant_liquidity(pool: &PoolState) -> BigInt {
    &pool.total_balance - &pool.requested_for_withdrawal
}

fn ratio(numerator: &BigInt, denominator: &BigInt) -> Option<f64> {
    if denominator.is_zero() {
        return None;
    }
    Some(numerator.to_f64()? / denominator.to_f64()?)
}

/// Pool jetton price in the native coin; `None` while the supply is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRates {
    pub kton_ton: Option<f64>,
    pub kton_ton_projected: Option<f64>,
}

pub fn exchange_rates(pool: &PoolState) -> ExchangeRates {
    ExchangeRates {
        kton_ton: ratio(&pool.total_balance, &pool.pool_jetton_supply),
        kton_ton_projected: ratio(&pool.projected_total_balance, &pool.projected_pool_supply),
    }
}

/// Pending payout collections and the amounts queued for them. An absent
/// collection is reported as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutSummary {
    pub deposit_payout: String,
    #[serde(with = "big_int")]
    pub deposit_amount: BigInt,
    pub withdrawal_payout: String,
    #[serde(with = "big_int")]
    pub withdrawal_amount: BigInt,
}

pub fn payout_summary(pool: &PoolState) -> PayoutSummary {
    let render = |address: &Option<crate::types::Address>| {
        address.map(|a| a.to_string()).unwrap_or_default()
    };
    PayoutSummary {
        deposit_payout: render(&pool.deposit_payout),
        deposit_amount: pool.requested_for_deposit.clone(),
        withdrawal_payout: render(&pool.withdrawal_payout),
        withdrawal_amount: pool.requested_for_withdrawal.clone(),
    }
}

/// Everything above in one serializable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMetrics {
    pub apy: f64,
    #[serde(with = "big_int")]
    pub tvl: BigInt,
    #[serde(with = "big_int")]
    pub instant_liquidity: BigInt,
    pub rates: ExchangeRates,
    pub payouts: PayoutSummary,
}

impl PoolMetrics {
    pub fn from_pool(pool: &PoolState) -> Self {
        Self {
            apy: current_apy(pool),
            tvl: tvl(pool),
            instant_liquidity: instant_liquidity(pool),
            rates: exchange_rates(pool),
            payouts: payout_summary(pool),
        }
    }
}
