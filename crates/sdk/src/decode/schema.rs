// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Versioned field layouts of `get_pool_full_data`.
//!
//! The current contract inserts `instantWithdrawalFee` after `depositsOpen`
//! and the `accruedGovernanceFee`/`disbalanceTolerance`/
//! `creditStartPriorElectionsEnd` trailer after `governanceFee`. The stack
//! carries no version tag, so the layout is picked by slot count.

use crate::types::SchemaVersion;

/// Slot count that identifies the current layout.
pub const CURRENT_STACK_LEN: usize = 34;

/// Expected shape of one stack slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Integer; a null slot reads as zero.
    Int,
    /// Integer interpreted as a boolean (non-zero is true).
    Flag,
    /// Opaque cell kept as-is.
    Cell,
    /// Cell that may be null.
    MaybeCell,
    /// Cell holding a standard address.
    Address,
    /// Cell holding an address or `addr_none`.
    OptionalAddress,
    /// Nested record.
    Tuple,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Int | SlotKind::Flag => "num",
            SlotKind::Cell | SlotKind::Address | SlotKind::OptionalAddress => "cell",
            SlotKind::MaybeCell => "cell or null",
            SlotKind::Tuple => "tuple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: SlotKind,
}

const fn field(name: &'static str, kind: SlotKind) -> FieldSpec {
    FieldSpec { name, kind }
}

use SlotKind::*;

pub const CURRENT_LAYOUT: &[FieldSpec] = &[
    field("state", Int),
    field("halted", Flag),
    field("totalBalance", Int),
    field("interestRate", Int),
    field("optimisticDepositWithdrawals", Flag),
    field("depositsOpen", Flag),
    field("instantWithdrawalFee", Int),
    field("savedValidatorSetHash", Int),
    field("previousRound", Tuple),
    field("currentRound", Tuple),
    field("minLoan", Int),
    field("maxLoan", Int),
    field("governanceFee", Int),
    field("accruedGovernanceFee", Int),
    field("disbalanceTolerance", Int),
    field("creditStartPriorElectionsEnd", Int),
    field("poolJettonMinter", Address),
    field("poolJettonSupply", Int),
    field("depositPayout", OptionalAddress),
    field("requestedForDeposit", Int),
    field("withdrawalPayout", OptionalAddress),
    field("requestedForWithdrawal", Int),
    field("sudoer", OptionalAddress),
    field("sudoerSetAt", Int),
    field("governor", Address),
    field("governorUpdateAfter", Int),
    field("interestManager", Address),
    field("halter", Address),
    field("approver", Address),
    field("controllerCode", Cell),
    field("jettonWalletCode", Cell),
    field("payoutMinterCode", Cell),
    field("projectedTotalBalance", Int),
    field("projectedPoolSupply", Int),
];

/// Legacy responses were observed with 31 slots; the decoder reads these 30
/// and ignores anything after them.
pub const LEGACY_LAYOUT: &[FieldSpec] = &[
    field("state", Int),
    field("halted", Flag),
    field("totalBalance", Int),
    field("interestRate", Int),
    field("optimisticDepositWithdrawals", Flag),
    field("depositsOpen", Flag),
    field("savedValidatorSetHash", Int),
    field("previousRound", Tuple),
    field("currentRound", Tuple),
    field("minLoan", Int),
    field("maxLoan", Int),
    field("governanceFee", Int),
    field("poolJettonMinter", Address),
    field("poolJettonSupply", Int),
    field("depositPayout", OptionalAddress),
    field("requestedForDeposit", Int),
    field("withdrawalPayout", OptionalAddress),
    field("requestedForWithdrawal", Int),
    field("sudoer", OptionalAddress),
    field("sudoerSetAt", Int),
    field("governor", Address),
    field("governorUpdateAfter", Int),
    field("interestManager", Address),
    field("halter", Address),
    field("approver", Address),
    field("controllerCode", Cell),
    field("jettonWalletCode", Cell),
    field("payoutMinterCode", Cell),
    field("projectedTotalBalance", Int),
    field("projectedPoolSupply", Int),
];

/// Layout of each round tuple, indexed from zero within the tuple.
pub const ROUND_LAYOUT: &[FieldSpec] = &[
    field("borrowers", MaybeCell),
    field("roundId", Int),
    field("activeBorrowers", Int),
    field("borrowed", Int),
    field("expected", Int),
    field("returned", Int),
    field("profit", Int),
];

/// Pick the layout from the top-level slot count. Never fails: any count
/// other than [`CURRENT_STACK_LEN`] is treated as legacy, and a short legacy
/// stack surfaces later as a truncation error.
pub fn resolve_schema(stack_len: usize) -> SchemaVersion {
    if stack_len == CURRENT_STACK_LEN {
        SchemaVersion::Current
    } else {
        SchemaVersion::Legacy
    }
}

pub fn layout_for(version: SchemaVersion) -> &'static [FieldSpec] {
    match version {
        SchemaVersion::Current => CURRENT_LAYOUT,
        SchemaVersion::Legacy => LEGACY_LAYOUT,
    }
}
