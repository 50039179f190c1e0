// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of `get_pool_full_data` stacks into [`PoolState`].
//!
//! [`PoolState`]: crate::types::PoolState

mod address;
mod cursor;
mod pool;
mod schema;

pub use address::{MalformedAddress, decode_address, decode_optional_address};
pub use pool::decode_pool_state;
pub use schema::{
    CURRENT_LAYOUT, CURRENT_STACK_LEN, FieldSpec, LEGACY_LAYOUT, ROUND_LAYOUT, SlotKind,
    layout_for, resolve_schema,
};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Stack truncated: field '{field}' expects slot {index} but only {len} slots are present")]
    TruncatedStack {
        field: String,
        index: usize,
        len: usize,
    },

    #[error("Type mismatch for field '{field}' at slot {index}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Malformed address in field '{field}': {reason}")]
    MalformedAddress { field: String, reason: String },

    #[error("Value {value} of field '{field}' at slot {index} does not fit the field type")]
    NumberOutOfRange {
        field: String,
        index: usize,
        value: String,
    },
}

impl DecodeError {
    /// Name of the field the decoder was reading when it failed.
    pub fn field(&self) -> &str {
        match self {
            DecodeError::TruncatedStack { field, .. }
            | DecodeError::TypeMismatch { field, .. }
            | DecodeError::MalformedAddress { field, .. }
            | DecodeError::NumberOutOfRange { field, .. } => field,
        }
    }
}
