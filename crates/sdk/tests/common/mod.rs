// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(dead_code)]

use anyhow::{Context, Result};
use kton_sdk::types::TaggedValue;
use serde_json::Value;
use std::path::PathBuf;

pub const CURRENT_FIXTURE: &str = "pool_full_data.json";
pub const LEGACY_FIXTURE: &str = "pool_full_data_legacy.json";

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Load a JSON fixture file
pub fn load_json(name: &str) -> Result<Value> {
    let path = fixtures_dir().join(name);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read fixture file: {path:?}"))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON fixture: {path:?}"))
}

/// Load a stack fixture, unwrapping a tonapi response if needed
pub fn load_stack(name: &str) -> Result<Vec<TaggedValue>> {
    let json = load_json(name)?;
    let stack = match json.get("stack") {
        Some(stack) => stack.clone(),
        None => json,
    };
    serde_json::from_value(stack).context("Fixture is not a valid stack")
}
