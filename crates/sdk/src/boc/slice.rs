// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{BocError, Cell};
use crate::types::Address;

/// Sequential bit/reference reader over a [`Cell`].
#[derive(Debug, Clone)]
pub struct CellSlice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> CellSlice<'a> {
    pub fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len - self.bit_pos
    }

    pub fn remaining_refs(&self) -> usize {
        self.cell.refs.len() - self.ref_pos
    }

    fn ensure(&self, wanted: usize) -> Result<(), BocError> {
        let remaining = self.remaining_bits();
        if wanted > remaining {
            return Err(BocError::CellUnderflow { wanted, remaining });
        }
        Ok(())
    }

    pub fn load_bit(&mut self) -> Result<bool, BocError> {
        self.ensure(1)?;
        let byte = self.cell.data[self.bit_pos / 8];
        let bit = (byte >> (7 - self.bit_pos % 8)) & 1 == 1;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Load an unsigned big-endian integer of at most 64 bits.
    pub fn load_uint(&mut self, bits: usize) -> Result<u64, BocError> {
        if bits > 64 {
            return Err(BocError::CellOverflow(format!(
                "cannot load {bits}-bit integer into u64"
            )));
        }
        self.ensure(bits)?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.load_bit()?);
        }
        Ok(value)
    }

    /// Load a two's complement signed integer of at most 64 bits.
    pub fn load_int(&mut self, bits: usize) -> Result<i64, BocError> {
        if bits == 0 {
            return Ok(0);
        }
        let raw = self.load_uint(bits)?;
        if bits == 64 {
            return Ok(raw as i64);
        }
        let sign = 1u64 << (bits - 1);
        Ok(if raw & sign != 0 {
            (i128::from(raw) - (1i128 << bits)) as i64
        } else {
            raw as i64
        })
    }

    /// Load `len` whole bytes.
    pub fn load_bytes(&mut self, len: usize) -> Result<Vec<u8>, BocError> {
        self.ensure(len * 8)?;
        (0..len).map(|_| self.load_uint(8).map(|b| b as u8)).collect()
    }

    /// Load a `VarUInteger 16` amount of nano-units.
    pub fn load_coins(&mut self) -> Result<u128, BocError> {
        let len = self.load_uint(4)? as usize;
        let bytes = self.load_bytes(len)?;
        Ok(bytes
            .iter()
            .fold(0u128, |acc, b| (acc << 8) | u128::from(*b)))
    }

    /// Load an `addr_std` address. `addr_none` and every other variant is an
    /// error.
    pub fn load_address(&mut self) -> Result<Address, BocError> {
        self.load_maybe_address()?
            .ok_or_else(|| BocError::InvalidAddress("expected an address, found addr_none".into()))
    }

    /// Load an address that may be `addr_none`.
    pub fn load_maybe_address(&mut self) -> Result<Option<Address>, BocError> {
        match self.load_uint(2)? {
            0b00 => Ok(None),
            0b10 => {
                if self.load_bit()? {
                    return Err(BocError::InvalidAddress(
                        "anycast addresses are not supported".into(),
                    ));
                }
                let workchain = self.load_int(8)? as i8;
                let bytes = self.load_bytes(32)?;
                let mut hash = [0u8; 32];
                hash.copy_from_slice(&bytes);
                Ok(Some(Address::new(workchain, hash)))
            }
            0b01 => Err(BocError::InvalidAddress(
                "external addresses are not supported".into(),
            )),
            _ => Err(BocError::InvalidAddress(
                "variable-length addresses are not supported".into(),
            )),
        }
    }

    pub fn load_ref(&mut self) -> Result<&'a Cell, BocError> {
        let cell = self
            .cell
            .refs
            .get(self.ref_pos)
            .ok_or(BocError::NoMoreRefs)?;
        self.ref_pos += 1;
        Ok(cell.as_ref())
    }

    pub fn load_maybe_ref(&mut self) -> Result<Option<&'a Cell>, BocError> {
        if self.load_bit()? {
            self.load_ref().map(Some)
        } else {
            Ok(None)
        }
    }
}
