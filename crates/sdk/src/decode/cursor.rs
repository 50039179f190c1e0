// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use num_bigint::BigInt;

use super::schema::{FieldSpec, SlotKind};
use super::{DecodeError, decode_address, decode_optional_address};
use crate::types::{Address, CellBlob, TaggedValue};

/// Sequential reader over stack slots, naming each slot after the layout
/// entry at the same position.
pub(crate) struct StackCursor<'a> {
    slots: &'a [TaggedValue],
    layout: &'static [FieldSpec],
    prefix: Option<&'static str>,
    pos: usize,
}

impl<'a> StackCursor<'a> {
    pub fn new(slots: &'a [TaggedValue], layout: &'static [FieldSpec]) -> Self {
        Self {
            slots,
            layout,
            prefix: None,
            pos: 0,
        }
    }

    /// Number of slots consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn field_name(&self, index: usize) -> String {
        let name = self.layout.get(index).map_or("<unnamed>", |f| f.name);
        match self.prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_string(),
        }
    }

    fn next(&mut self, kind: SlotKind) -> Result<(usize, &'a TaggedValue), DecodeError> {
        let index = self.pos;
        debug_assert_eq!(
            self.layout.get(index).map(|f| f.kind),
            Some(kind),
            "read order diverges from layout at slot {index}"
        );
        let slot = self
            .slots
            .get(index)
            .ok_or_else(|| DecodeError::TruncatedStack {
                field: self.field_name(index),
                index,
                len: self.slots.len(),
            })?;
        self.pos += 1;
        Ok((index, slot))
    }

    fn mismatch(&self, index: usize, kind: SlotKind, found: &TaggedValue) -> DecodeError {
        DecodeError::TypeMismatch {
            field: self.field_name(index),
            index,
            expected: kind.as_str(),
            found: found.kind(),
        }
    }

    /// Integer slot. A null slot reads as zero.
    pub fn int(&mut self) -> Result<BigInt, DecodeError> {
        let (index, slot) = self.next(SlotKind::Int)?;
        match slot {
            TaggedValue::Number(value) => Ok(value.clone().unwrap_or_default()),
            other => Err(self.mismatch(index, SlotKind::Int, other)),
        }
    }

    /// Integer slot narrowed to a fixed-width type.
    pub fn small<T>(&mut self) -> Result<T, DecodeError>
    where
        T: for<'b> TryFrom<&'b BigInt>,
    {
        let index = self.pos;
        let value = self.int()?;
        T::try_from(&value).map_err(|_| DecodeError::NumberOutOfRange {
            field: self.field_name(index),
            index,
            value: value.to_string(),
        })
    }

    /// Integer slot where any non-zero value is true.
    pub fn flag(&mut self) -> Result<bool, DecodeError> {
        let (index, slot) = self.next(SlotKind::Flag)?;
        match slot {
            TaggedValue::Number(value) => Ok(value.as_ref().is_some_and(|v| *v != BigInt::ZERO)),
            other => Err(self.mismatch(index, SlotKind::Flag, other)),
        }
    }

    pub fn cell(&mut self) -> Result<CellBlob, DecodeError> {
        let (index, slot) = self.next(SlotKind::Cell)?;
        match slot {
            TaggedValue::Cell(blob) => Ok(blob.clone()),
            other => Err(self.mismatch(index, SlotKind::Cell, other)),
        }
    }

    /// Cell slot that may be null.
    pub fn maybe_cell(&mut self) -> Result<Option<CellBlob>, DecodeError> {
        let (index, slot) = self.next(SlotKind::MaybeCell)?;
        match slot {
            TaggedValue::Cell(blob) => Ok(Some(blob.clone())),
            TaggedValue::Number(None) => Ok(None),
            other => Err(self.mismatch(index, SlotKind::MaybeCell, other)),
        }
    }

    pub fn address(&mut self) -> Result<Address, DecodeError> {
        let (index, slot) = self.next(SlotKind::Address)?;
        match slot {
            TaggedValue::Cell(blob) => {
                decode_address(blob).map_err(|e| DecodeError::MalformedAddress {
                    field: self.field_name(index),
                    reason: e.0,
                })
            }
            other => Err(self.mismatch(index, SlotKind::Address, other)),
        }
    }

    pub fn optional_address(&mut self) -> Result<Option<Address>, DecodeError> {
        let (index, slot) = self.next(SlotKind::OptionalAddress)?;
        match slot {
            TaggedValue::Cell(blob) => {
                decode_optional_address(blob).map_err(|e| DecodeError::MalformedAddress {
                    field: self.field_name(index),
                    reason: e.0,
                })
            }
            other => Err(self.mismatch(index, SlotKind::OptionalAddress, other)),
        }
    }

    /// Tuple slot, read with its own layout. Errors inside the tuple are
    /// reported as `<tuple field>.<inner field>`.
    pub fn tuple(&mut self, layout: &'static [FieldSpec]) -> Result<StackCursor<'a>, DecodeError> {
        let (index, slot) = self.next(SlotKind::Tuple)?;
        match slot {
            TaggedValue::Tuple(items) => Ok(StackCursor {
                slots: items,
                layout,
                prefix: self.layout.get(index).map(|f| f.name),
                pos: 0,
            }),
            other => Err(self.mismatch(index, SlotKind::Tuple, other)),
        }
    }
}
