// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! TTL memoization over a text key-value store.

pub mod clock;
pub mod precision;
pub mod store;
mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use ttl::{CacheEntry, TtlCache};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No cached entry for '{0}'")]
    NotFound(String),
}
