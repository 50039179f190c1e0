// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Minimal cell model and "bag of cells" container codec.
//!
//! Only what the SDK needs: reading addresses out of cells returned by get
//! methods, and building the small message bodies sent to the pool.

mod builder;
mod cell;
mod container;
mod slice;

pub use builder::CellBuilder;
pub use cell::{Cell, MAX_CELL_BITS, MAX_CELL_REFS};
pub use container::{parse_boc, parse_boc_hex, serialize_boc};
pub use slice::CellSlice;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BocError {
    #[error("Invalid hex in cell blob: {0}")]
    InvalidHex(String),

    #[error("Bad container magic 0x{0:08x}")]
    BadMagic(u32),

    #[error("Container is truncated: needed {needed} bytes at offset {offset}")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("Invalid container header: {0}")]
    InvalidHeader(String),

    #[error("Checksum mismatch: expected 0x{expected:08x}, computed 0x{computed:08x}")]
    ChecksumMismatch { expected: u32, computed: u32 },

    #[error("Container has no root cell")]
    NoRoot,

    #[error("Invalid cell #{index}: {reason}")]
    InvalidCell { index: usize, reason: String },

    #[error("Cell overflow: {0}")]
    CellOverflow(String),

    #[error("Cell underflow: wanted {wanted} more bits, {remaining} remaining")]
    CellUnderflow { wanted: usize, remaining: usize },

    #[error("Cell has no more references")]
    NoMoreRefs,

    #[error("Invalid address in cell: {0}")]
    InvalidAddress(String),
}
