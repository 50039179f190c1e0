// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Staking pool client over a caller-supplied get-method transport.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

use kton_sdk_config::SdkConfig;

use crate::cache::{CacheError, Clock, KeyValueStore, SystemClock, TtlCache, precision};
use crate::consts::{
    GET_POOL_FULL_DATA, GET_WALLET_ADDRESS, GET_WALLET_DATA, JETTON_WALLET_KEY, POOL_INFO_KEY,
    STAKED_BALANCE_KEY, USER_DATA_KEYS,
};
use crate::decode::{DecodeError, decode_address, decode_pool_state};
use crate::metrics::{self, ExchangeRates, PayoutSummary};
use crate::payload::{self, PayloadError, TransactionRequest, UnstakeMode};
use crate::types::{Address, AddressError, PoolState, TaggedValue};

/// Runs read-only contract methods and returns their result stacks.
pub trait StackSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        args: &[String],
    ) -> impl Future<Output = Result<Vec<TaggedValue>, Self::Error>> + Send;
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Get method '{method}' failed: {source}")]
    Source {
        method: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Get method '{method}' returned an unusable stack: {reason}")]
    UnexpectedStack { method: String, reason: String },

    #[error("Invalid contract address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Cached form of a jetton wallet balance.
#[derive(Serialize, Deserialize)]
struct WalletBalance(#[serde(with = "precision::big_int")] BigInt);

pub struct StakingClient<S, K, C = SystemClock> {
    source: S,
    cache: TtlCache<K, C>,
    contract: Address,
    partner_code: u64,
}

impl<S: StackSource, K: KeyValueStore> StakingClient<S, K, SystemClock> {
    /// Client for the contract, partner code and cache settings in `config`.
    pub fn new(source: S, store: K, config: &SdkConfig) -> Result<Self, ClientError> {
        let contract = config.network.contract_address.parse()?;
        Ok(Self::with_cache(
            source,
            TtlCache::new(store, &config.cache),
            contract,
            config.contract.partner_code,
        ))
    }
}

impl<S: StackSource, K: KeyValueStore, C: Clock> StakingClient<S, K, C> {
    pub fn with_cache(
        source: S,
        cache: TtlCache<K, C>,
        contract: Address,
        partner_code: u64,
    ) -> Self {
        Self {
            source,
            cache,
            contract,
            partner_code,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn contract(&self) -> &Address {
        &self.contract
    }

    pub fn cache(&self) -> &TtlCache<K, C> {
        &self.cache
    }

    async fn run(
        &self,
        address: &Address,
        method: &str,
        args: &[String],
    ) -> Result<Vec<TaggedValue>, ClientError> {
        tracing::debug!(address = %address, method, "Running get method");
        self.source
            .run_get_method(address, method, args)
            .await
            .map_err(|e| ClientError::Source {
                method: method.to_string(),
                source: Box::new(e),
            })
    }

    /// Decoded pool snapshot, cached under `poolInfo`.
    pub async fn fetch_pool_info(&self, ttl_ms: Option<u64>) -> Result<PoolState, ClientError> {
        self.cache
            .get_or_compute(POOL_INFO_KEY, ttl_ms, || async move {
                let stack = self.run(&self.contract, GET_POOL_FULL_DATA, &[]).await?;
                let pool = decode_pool_state(&stack)?;
                tracing::info!(
                    schema = pool.schema_version.as_str(),
                    total_balance = %pool.total_balance,
                    "Fetched pool state"
                );
                Ok::<_, ClientError>(pool)
            })
            .await
    }

    pub async fn current_apy(&self, ttl_ms: Option<u64>) -> Result<f64, ClientError> {
        Ok(metrics::current_apy(&self.fetch_pool_info(ttl_ms).await?))
    }

    pub async fn tvl(&self, ttl_ms: Option<u64>) -> Result<BigInt, ClientError> {
        Ok(metrics::tvl(&self.fetch_pool_info(ttl_ms).await?))
    }

    pub async fn instant_liquidity(&self, ttl_ms: Option<u64>) -> Result<BigInt, ClientError> {
        Ok(metrics::instant_liquidity(&self.fetch_pool_info(ttl_ms).await?))
    }

    pub async fn exchange_rates(&self, ttl_ms: Option<u64>) -> Result<ExchangeRates, ClientError> {
        Ok(metrics::exchange_rates(&self.fetch_pool_info(ttl_ms).await?))
    }

    pub async fn payouts(&self, ttl_ms: Option<u64>) -> Result<PayoutSummary, ClientError> {
        Ok(metrics::payout_summary(&self.fetch_pool_info(ttl_ms).await?))
    }

    /// Jetton wallet that holds `owner`'s pool jettons, cached per owner.
    pub async fn jetton_wallet_address(&self, owner: &Address) -> Result<Address, ClientError> {
        let key = format!("{JETTON_WALLET_KEY}-{}", owner.to_raw_string());
        self.cache
            .get_or_compute(&key, None, || async move {
                let pool = self.fetch_pool_info(None).await?;
                let stack = self
                    .run(
                        &pool.pool_jetton_minter,
                        GET_WALLET_ADDRESS,
                        &[owner.to_string()],
                    )
                    .await?;
                let unexpected = |reason: String| ClientError::UnexpectedStack {
                    method: GET_WALLET_ADDRESS.to_string(),
                    reason,
                };
                match stack.first() {
                    Some(TaggedValue::Cell(blob)) => {
                        decode_address(blob).map_err(|e| unexpected(e.to_string()))
                    }
                    Some(other) => Err(unexpected(format!("first slot is a {}", other.kind()))),
                    None => Err(unexpected("empty stack".to_string())),
                }
            })
            .await
    }

    /// Pool jettons held by `owner`, read from their jetton wallet and cached
    /// per wallet.
    pub async fn staked_balance(
        &self,
        owner: &Address,
        ttl_ms: Option<u64>,
    ) -> Result<BigInt, ClientError> {
        let wallet = self.jetton_wallet_address(owner).await?;
        let key = format!("{STAKED_BALANCE_KEY}-{}", wallet.to_raw_string());
        let WalletBalance(balance) = self
            .cache
            .get_or_compute(&key, ttl_ms, || async move {
                let stack = self.run(&wallet, GET_WALLET_DATA, &[]).await?;
                let unexpected = |reason: String| ClientError::UnexpectedStack {
                    method: GET_WALLET_DATA.to_string(),
                    reason,
                };
                match stack.first() {
                    Some(TaggedValue::Number(value)) => {
                        Ok::<_, ClientError>(WalletBalance(value.clone().unwrap_or_default()))
                    }
                    Some(other) => Err(unexpected(format!("first slot is a {}", other.kind()))),
                    None => Err(unexpected("empty stack".to_string())),
                }
            })
            .await?;
        tracing::debug!(wallet = %wallet, balance = %balance, "Read staked balance");
        Ok(balance)
    }

    /// Drop every cached entry of this client's namespace.
    pub fn clear_storage_data(&self) -> Result<usize, ClientError> {
        Ok(self.cache.clear(None)?)
    }

    /// Drop only per-wallet entries, keeping pool-wide data.
    pub fn clear_storage_user_data(&self) -> Result<usize, ClientError> {
        let groups: Vec<String> = USER_DATA_KEYS
            .iter()
            .map(|key| self.cache.full_key(key))
            .collect();
        let groups: Vec<&str> = groups.iter().map(String::as_str).collect();
        Ok(self.cache.clear(Some(&groups))?)
    }

    fn now_ms(&self) -> u64 {
        self.cache.clock().now_ms()
    }

    /// Deposit `amount` nano-units into the pool.
    pub fn stake(&self, amount: u128) -> Result<TransactionRequest, ClientError> {
        let request = payload::stake_request(&self.contract, amount, self.partner_code, self.now_ms())?;
        tracing::info!(amount = %amount, "Prepared stake request");
        Ok(request)
    }

    /// Stake everything in `balance` except the recommended fee reserve.
    pub fn stake_max(&self, balance: u128) -> Result<TransactionRequest, ClientError> {
        self.stake(payload::max_stake_amount(balance))
    }

    async fn unstake_with(
        &self,
        owner: &Address,
        amount: u128,
        mode: UnstakeMode,
    ) -> Result<TransactionRequest, ClientError> {
        if amount == 0 {
            return Err(PayloadError::InvalidAmount(amount.to_string()).into());
        }
        let jetton_wallet = self.jetton_wallet_address(owner).await?;
        let request = payload::unstake_request(&jetton_wallet, owner, amount, mode, self.now_ms())?;
        tracing::info!(amount = %amount, mode = ?mode, "Prepared unstake request");
        Ok(request)
    }

    /// Withdraw `amount` pool jettons; instant when liquidity allows.
    pub async fn unstake(
        &self,
        owner: &Address,
        amount: u128,
    ) -> Result<TransactionRequest, ClientError> {
        self.unstake_with(owner, amount, UnstakeMode::Standard).await
    }

    /// Withdraw right away or not at all.
    pub async fn unstake_instant(
        &self,
        owner: &Address,
        amount: u128,
    ) -> Result<TransactionRequest, ClientError> {
        self.unstake_with(owner, amount, UnstakeMode::Instant).await
    }

    /// Withdraw at the end of the round.
    pub async fn unstake_best_rate(
        &self,
        owner: &Address,
        amount: u128,
    ) -> Result<TransactionRequest, ClientError> {
        self.unstake_with(owner, amount, UnstakeMode::BestRate).await
    }
}
