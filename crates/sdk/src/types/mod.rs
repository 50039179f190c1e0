// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Domain types shared by the decoder, the cache and the client.

pub mod address;
pub mod pool;
pub mod stack;

pub use address::{Address, AddressError, FriendlyFlags};
pub use pool::{PoolState, RoundInfo, SchemaVersion};
pub use stack::{CellBlob, StackError, StackRecord, TaggedValue, parse_stack_number};
