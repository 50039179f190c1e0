// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Staking client against a recorded node.

mod common;

use anyhow::Result;
use common::{CURRENT_FIXTURE, load_stack};
use kton_sdk::boc::{CellBuilder, serialize_boc};
use kton_sdk::cache::{FileStore, KeyValueStore, ManualClock, MemoryStore, TtlCache};
use kton_sdk::client::{StackSource, StakingClient};
use kton_sdk::consts::{GET_POOL_FULL_DATA, GET_WALLET_ADDRESS};
use kton_sdk::payload::TransactionRequest;
use kton_sdk::types::{Address, CellBlob, TaggedValue};
use kton_sdk_config::SdkConfig;
use num_bigint::BigInt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

#[derive(Debug, thiserror::Error)]
#[error("method {0} is not recorded")]
struct NotRecorded(String);

struct RecordedNode {
    pool_stack: Vec<TaggedValue>,
    jetton_wallet: Address,
    calls: AtomicUsize,
}

impl RecordedNode {
    fn new() -> Result<Self> {
        Ok(Self {
            pool_stack: load_stack(CURRENT_FIXTURE)?,
            jetton_wallet: Address::new(0, [0xee; 32]),
            calls: AtomicUsize::new(0),
        })
    }
}

impl StackSource for RecordedNode {
    type Error = NotRecorded;

    async fn run_get_method(
        &self,
        _address: &Address,
        method: &str,
        _args: &[String],
    ) -> Result<Vec<TaggedValue>, NotRecorded> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match method {
            GET_POOL_FULL_DATA => Ok(self.pool_stack.clone()),
            GET_WALLET_ADDRESS => {
                let mut b = CellBuilder::new();
                b.store_address(Some(&self.jetton_wallet))
                    .map_err(|e| NotRecorded(e.to_string()))?;
                Ok(vec![TaggedValue::Cell(CellBlob::new(serialize_boc(
                    &b.build(),
                    true,
                )))])
            }
            other => Err(NotRecorded(other.to_string())),
        }
    }
}

fn decode_payload(request: &TransactionRequest) -> Result<Vec<u8>> {
    use base64::Engine;
    Ok(base64::engine::general_purpose::STANDARD.decode(&request.messages[0].payload)?)
}

#[tokio::test]
async fn test_default_config_client() -> Result<()> {
    let client = StakingClient::new(RecordedNode::new()?, MemoryStore::new(), &SdkConfig::default())?;

    assert_eq!(
        client.tvl(None).await?,
        BigInt::from(7_400_000_000_000_000u64)
    );
    assert_eq!(
        client.instant_liquidity(None).await?,
        BigInt::from(3_488_000_000_000_000u64)
    );

    let request = client.stake(10_000_000_000)?;
    assert_eq!(
        request.messages[0].address,
        "EQA9HwEZD_tONfVz6lJS0PVKR5viEiEGyj9AuQewGQVnXPg0"
    );
    assert_eq!(request.messages[0].amount, "11000000000");
    let body = kton_sdk::boc::parse_boc(&decode_payload(&request)?)?;
    let mut slice = body.parse();
    assert_eq!(slice.load_uint(32)?, 0x47d5_4391);
    assert_eq!(slice.load_uint(64)?, 1);
    assert_eq!(slice.load_uint(64)?, 0x7474_6f6e);
    Ok(())
}

#[tokio::test]
async fn test_unstake_goes_to_jetton_wallet() -> Result<()> {
    let node = RecordedNode::new()?;
    let jetton_wallet = node.jetton_wallet;
    let store = Arc::new(MemoryStore::new());
    let cache = TtlCache::with_clock(Arc::clone(&store), ManualClock::new(5_000), "network-cache-", 30_000);
    let client = StakingClient::with_cache(node, cache, Address::new(0, [0x3d; 32]), 7);

    let owner: Address = "0:0101010101010101010101010101010101010101010101010101010101010101".parse()?;
    let request = client.unstake_best_rate(&owner, 2_500_000_000).await?;
    assert_eq!(request.valid_until, 605_000);
    assert_eq!(request.messages[0].address, jetton_wallet.to_string());
    assert_eq!(request.messages[0].amount, "1050000000");

    let body = kton_sdk::boc::parse_boc(&decode_payload(&request)?)?;
    let mut slice = body.parse();
    assert_eq!(slice.load_uint(32)?, 0x595f_07bc);
    assert_eq!(slice.load_uint(64)?, 0);
    assert_eq!(slice.load_coins()?, 2_500_000_000);
    assert_eq!(slice.load_address()?, owner);
    let settings = slice.load_maybe_ref()?.expect("settings cell");
    let mut settings = settings.parse();
    assert!(settings.load_bit()?);
    assert!(!settings.load_bit()?);

    // Pool info and the jetton wallet are both cached now.
    client.unstake_instant(&owner, 1).await?;
    assert_eq!(store.keys()?.len(), 2);

    client.clear_storage_user_data()?;
    assert_eq!(store.keys()?, vec!["network-cache-poolInfo".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_file_backed_cache_spans_clients() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = SdkConfig::default();
    config.cache.path = Some(dir.path().join("kton.json").display().to_string());
    let path = config.cache.path.clone().unwrap_or_default();

    let first = StakingClient::new(RecordedNode::new()?, FileStore::new(&path), &config)?;
    let apy = first.current_apy(None).await?;

    let node = RecordedNode::new()?;
    let second = StakingClient::new(node, FileStore::new(&path), &config)?;
    assert_eq!(second.current_apy(None).await?, apy);
    assert_eq!(second.exchange_rates(None).await?, first.exchange_rates(None).await?);
    assert_eq!(second.source().calls.load(Ordering::SeqCst), 0);
    Ok(())
}
