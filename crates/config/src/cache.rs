// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache TTL must be greater than 0")]
    ZeroTtl,

    #[error("Cache prefix cannot be empty")]
    EmptyPrefix,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Default time-to-live of cached values in milliseconds
    ///
    /// Env: KTON_CACHE_TTL_MS
    /// Default: 30000
    pub ttl_ms: u64,

    /// Namespace prepended to every cache key
    ///
    /// Env: KTON_CACHE_PREFIX
    /// Default: network-cache-
    pub prefix: String,

    /// JSON file backing the cache; in-memory when unset
    ///
    /// Env: KTON_CACHE_PATH
    /// Default: unset
    pub path: Option<String>,
}

impl CacheConfig {
    pub(crate) fn validate(&self) -> Result<(), CacheError> {
        if self.ttl_ms == 0 {
            return Err(CacheError::ZeroTtl);
        }
        if self.prefix.is_empty() {
            return Err(CacheError::EmptyPrefix);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 30_000,
            prefix: "network-cache-".to_string(),
            path: None,
        }
    }
}
