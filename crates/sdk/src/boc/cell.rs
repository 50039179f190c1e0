// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use super::CellSlice;

pub const MAX_CELL_BITS: usize = 1023;
pub const MAX_CELL_REFS: usize = 4;

/// An ordinary cell: up to 1023 data bits and up to four references.
///
/// Bits are stored MSB-first; bits past `bit_len` in the last byte are zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub(crate) data: Vec<u8>,
    pub(crate) bit_len: usize,
    pub(crate) refs: Vec<Arc<Cell>>,
    pub(crate) exotic: bool,
}

impl Cell {
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn refs(&self) -> &[Arc<Cell>] {
        &self.refs
    }

    pub fn is_exotic(&self) -> bool {
        self.exotic
    }

    /// Start reading this cell from its first bit.
    pub fn parse(&self) -> CellSlice<'_> {
        CellSlice::new(self)
    }

    /// Number of cells in the tree rooted here, counting shared subtrees
    /// once per reference.
    pub fn tree_size(&self) -> usize {
        1 + self.refs.iter().map(|r| r.tree_size()).sum::<usize>()
    }

    /// Cell descriptor bytes as they appear in a serialized container.
    pub(crate) fn descriptors(&self) -> [u8; 2] {
        let d1 = self.refs.len() as u8 | if self.exotic { 8 } else { 0 };
        let full_bytes = self.bit_len / 8;
        let d2 = (full_bytes * 2 + usize::from(self.bit_len % 8 != 0)) as u8;
        [d1, d2]
    }

    /// Data bytes with the completion tag appended when the bit length is
    /// not a multiple of eight.
    pub(crate) fn padded_data(&self) -> Vec<u8> {
        let byte_len = self.bit_len.div_ceil(8);
        let mut out = self.data[..byte_len].to_vec();
        let rem = self.bit_len % 8;
        if rem != 0 {
            let last = out.len() - 1;
            out[last] |= 0x80 >> rem;
        }
        out
    }
}
