// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod boc;
pub mod cache;
pub mod client;
pub mod consts;
pub mod decode;
pub mod logging;
pub mod metrics;
pub mod payload;
pub mod types;

pub use client::{ClientError, StackSource, StakingClient};
pub use decode::{DecodeError, decode_pool_state};
pub use types::{Address, PoolState, RoundInfo, SchemaVersion, TaggedValue};

#[cfg(test)]
pub mod test_fixtures;
