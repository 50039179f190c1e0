// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

use crate::boc::parse_boc;
use crate::types::{Address, CellBlob};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Malformed address: {0}")]
pub struct MalformedAddress(pub String);

/// Read a standard address from a serialized cell.
///
/// `addr_none` is rejected: callers use this for fields that must always be
/// set.
pub fn decode_address(cell: &CellBlob) -> Result<Address, MalformedAddress> {
    let root = parse_boc(cell.as_bytes()).map_err(|e| MalformedAddress(e.to_string()))?;
    root.parse()
        .load_address()
        .map_err(|e| MalformedAddress(e.to_string()))
}

/// Read an address that may be `addr_none`, which decodes to `None`.
pub fn decode_optional_address(cell: &CellBlob) -> Result<Option<Address>, MalformedAddress> {
    let root = parse_boc(cell.as_bytes()).map_err(|e| MalformedAddress(e.to_string()))?;
    root.parse()
        .load_maybe_address()
        .map_err(|e| MalformedAddress(e.to_string()))
}
