// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared stacks and cells for unit tests.

use lazy_static::lazy_static;

use crate::boc::{CellBuilder, serialize_boc};
use crate::types::{Address, CellBlob, SchemaVersion, TaggedValue};

/// Mainnet staking pool address as a serialized cell (with CRC32C).
pub const POOL_ADDRESS_BOC: &str = "b5ee9c724101010100240000438007a3e02321ff69c6beae7d4a4a5a1ea948f37c424420d947e81720f60320aceb904b4a96a6";

lazy_static! {
    pub static ref MINTER: Address = Address::new(0, [0x11; 32]);
    pub static ref GOVERNOR: Address = Address::new(-1, [0x22; 32]);
    pub static ref SUDOER: Address = Address::new(0, [0x33; 32]);
    pub static ref INTEREST_MANAGER: Address = Address::new(0, [0x44; 32]);
    pub static ref HALTER: Address = Address::new(0, [0x55; 32]);
    pub static ref APPROVER: Address = Address::new(0, [0x66; 32]);
}

pub fn address_blob(address: &Address) -> CellBlob {
    let mut b = CellBuilder::new();
    b.store_address(Some(address)).unwrap();
    CellBlob::new(serialize_boc(&b.build(), true))
}

pub fn none_address_blob() -> CellBlob {
    let mut b = CellBuilder::new();
    b.store_address(None).unwrap();
    CellBlob::new(serialize_boc(&b.build(), false))
}

pub fn address_cell(address: &Address) -> TaggedValue {
    TaggedValue::Cell(address_blob(address))
}

pub fn none_address_cell() -> TaggedValue {
    TaggedValue::Cell(none_address_blob())
}

/// Small opaque cell standing in for contract code or a dictionary.
pub fn opaque_cell(tag: u64) -> TaggedValue {
    let mut b = CellBuilder::new();
    b.store_uint(tag, 32).unwrap();
    TaggedValue::Cell(CellBlob::new(serialize_boc(&b.build(), false)))
}

fn num(value: i64) -> TaggedValue {
    TaggedValue::number(value)
}

/// A pool with 1 TON of balance, 0.95 TON of supply and two rounds of lending.
pub fn sample_pool_stack(version: SchemaVersion) -> Vec<TaggedValue> {
    let current = version == SchemaVersion::Current;
    let mut stack = vec![num(0), num(0), num(1_000_000_000), num(1000), num(0), num(-1)];
    if current {
        stack.push(num(5000));
    }
    stack.extend([
        num(0x1234_5678_9abc),
        TaggedValue::Tuple(vec![
            opaque_cell(0xb0b),
            num(41),
            num(1),
            num(100),
            num(106),
            num(106),
            num(6),
        ]),
        TaggedValue::Tuple(vec![
            TaggedValue::null(),
            num(42),
            num(2),
            num(200),
            num(210),
            num(0),
            num(12),
        ]),
        num(10_000_000_000_000),
        num(1_000_000_000_000_000),
        num(4_194_304),
    ]);
    if current {
        stack.extend([num(77), num(25), num(600)]);
    }
    stack.extend([
        address_cell(&MINTER),
        num(950_000_000),
        none_address_cell(),
        num(0),
        address_cell(&GOVERNOR),
        num(0),
        address_cell(&SUDOER),
        num(1_700_000_000),
        address_cell(&GOVERNOR),
        num(0),
        address_cell(&INTEREST_MANAGER),
        address_cell(&HALTER),
        address_cell(&APPROVER),
        opaque_cell(1),
        opaque_cell(2),
        opaque_cell(3),
        num(1_050_000_000),
        num(900_000_000),
    ]);
    if !current {
        // Trailing slot seen in legacy responses.
        stack.push(num(0));
    }
    stack
}
