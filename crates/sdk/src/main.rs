// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

use kton_sdk::cache::{FileStore, KeyValueStore, MemoryStore};
use kton_sdk::client::{StackSource, StakingClient};
use kton_sdk::logging;
use kton_sdk::metrics::PoolMetrics;
use kton_sdk::types::{Address, TaggedValue};
use kton_sdk_config::{Args, SdkConfig};

/// Stack file contents: a bare array of records or a tonapi
/// `execGetMethod` response.
#[derive(Deserialize)]
#[serde(untagged)]
enum StackFile {
    Bare(Vec<TaggedValue>),
    Response { stack: Vec<TaggedValue> },
}

/// Answers every get-method call with the stack read from disk.
struct RecordedStack(Vec<TaggedValue>);

impl StackSource for RecordedStack {
    type Error = Infallible;

    async fn run_get_method(
        &self,
        _address: &Address,
        _method: &str,
        _args: &[String],
    ) -> Result<Vec<TaggedValue>, Infallible> {
        Ok(self.0.clone())
    }
}

fn read_stack(path: &str) -> anyhow::Result<Vec<TaggedValue>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let file: StackFile =
        serde_json::from_str(&text).with_context(|| format!("parsing stack file {path}"))?;
    Ok(match file {
        StackFile::Bare(stack) | StackFile::Response { stack } => stack,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = SdkConfig::from_env_file(&args.env_file)?;
    let _guard = logging::init(&config.log)?;

    let stack = read_stack(&args.stack)?;
    tracing::info!(path = %args.stack, slots = stack.len(), "Loaded stack");

    let store: Arc<dyn KeyValueStore> = match &config.cache.path {
        Some(path) => Arc::new(FileStore::new(path)),
        None => Arc::new(MemoryStore::new()),
    };
    let client = StakingClient::new(RecordedStack(stack), store, &config)?;
    let pool = client.fetch_pool_info(args.ttl_ms).await?;
    let metrics = PoolMetrics::from_pool(&pool);

    let report = serde_json::json!({
        "contract": client.contract().to_string(),
        "pool": pool,
        "metrics": metrics,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
