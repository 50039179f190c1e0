// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use super::{BocError, Cell, MAX_CELL_BITS, MAX_CELL_REFS};
use crate::types::Address;

/// Append-only writer producing a [`Cell`].
#[derive(Debug, Clone, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl CellBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self, BocError> {
        if self.bit_len >= MAX_CELL_BITS {
            return Err(BocError::CellOverflow(format!(
                "cell already holds {MAX_CELL_BITS} bits"
            )));
        }
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
        Ok(self)
    }

    /// Store `value` as an unsigned big-endian integer of `bits` bits.
    pub fn store_uint(&mut self, value: u64, bits: usize) -> Result<&mut Self, BocError> {
        if bits > 64 || (bits < 64 && value >> bits != 0) {
            return Err(BocError::CellOverflow(format!(
                "{value} does not fit in {bits} bits"
            )));
        }
        self.ensure_room(bits)?;
        for i in (0..bits).rev() {
            self.store_bit((value >> i) & 1 == 1)?;
        }
        Ok(self)
    }

    /// Store `value` as a two's complement integer of `bits` bits.
    pub fn store_int(&mut self, value: i64, bits: usize) -> Result<&mut Self, BocError> {
        if bits == 0 || bits > 64 {
            return Err(BocError::CellOverflow(format!(
                "invalid signed integer width {bits}"
            )));
        }
        if bits < 64 {
            let min = -(1i64 << (bits - 1));
            let max = (1i64 << (bits - 1)) - 1;
            if value < min || value > max {
                return Err(BocError::CellOverflow(format!(
                    "{value} does not fit in {bits} signed bits"
                )));
            }
            let mask = (1u64 << bits) - 1;
            return self.store_uint(value as u64 & mask, bits);
        }
        self.store_uint(value as u64, 64)
    }

    pub fn store_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, BocError> {
        self.ensure_room(bytes.len() * 8)?;
        for byte in bytes {
            self.store_uint(u64::from(*byte), 8)?;
        }
        Ok(self)
    }

    /// Store a `VarUInteger 16` amount of nano-units.
    pub fn store_coins(&mut self, amount: u128) -> Result<&mut Self, BocError> {
        let len = (128 - amount.leading_zeros() as usize).div_ceil(8);
        if len > 15 {
            return Err(BocError::CellOverflow(format!(
                "coin amount {amount} exceeds 120 bits"
            )));
        }
        self.store_uint(len as u64, 4)?;
        let bytes = amount.to_be_bytes();
        self.store_bytes(&bytes[16 - len..])
    }

    /// Store `addr_std` for `Some`, `addr_none` for `None`.
    pub fn store_address(&mut self, address: Option<&Address>) -> Result<&mut Self, BocError> {
        match address {
            None => self.store_uint(0, 2),
            Some(address) => {
                self.ensure_room(267)?;
                self.store_uint(0b10, 2)?;
                self.store_bit(false)?;
                self.store_int(i64::from(address.workchain()), 8)?;
                self.store_bytes(address.hash())
            }
        }
    }

    pub fn store_ref(&mut self, cell: Cell) -> Result<&mut Self, BocError> {
        if self.refs.len() >= MAX_CELL_REFS {
            return Err(BocError::CellOverflow(format!(
                "cell already holds {MAX_CELL_REFS} references"
            )));
        }
        self.refs.push(Arc::new(cell));
        Ok(self)
    }

    pub fn store_maybe_ref(&mut self, cell: Option<Cell>) -> Result<&mut Self, BocError> {
        match cell {
            Some(cell) => {
                self.store_bit(true)?;
                self.store_ref(cell)
            }
            None => self.store_bit(false),
        }
    }

    pub fn build(self) -> Cell {
        Cell {
            data: self.data,
            bit_len: self.bit_len,
            refs: self.refs,
            exotic: false,
        }
    }

    fn ensure_room(&self, bits: usize) -> Result<(), BocError> {
        if self.bit_len + bits > MAX_CELL_BITS {
            return Err(BocError::CellOverflow(format!(
                "storing {bits} bits would exceed {MAX_CELL_BITS}"
            )));
        }
        Ok(())
    }
}
