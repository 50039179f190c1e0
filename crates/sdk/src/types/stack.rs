// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stack slots returned by get-method invocations.
//!
//! Two JSON shapes are accepted for each slot:
//! - the bare form `{"num": "..."}`, `{"cell": "<hex>"}`, `{"tuple": [...]}`
//! - the indexer form with a `type` discriminator
//!   (`num`, `cell`, `slice`, `tuple`, `null`, `nan`)

use num_bigint::BigInt;
use num_traits::Num;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("Invalid integer literal '{0}'")]
    InvalidNumber(String),

    #[error("Invalid hex in cell slot: {0}")]
    InvalidCellHex(String),

    #[error("Unknown stack slot type '{0}'")]
    UnknownType(String),

    #[error("Stack slot of type '{0}' is missing its payload")]
    MissingPayload(String),
}

/// Opaque serialized cell, kept as the raw container bytes.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct CellBlob(Vec<u8>);

impl CellBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn from_hex(text: &str) -> Result<Self, StackError> {
        hex::decode(text.trim())
            .map(Self)
            .map_err(|e| StackError::InvalidCellHex(e.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for CellBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellBlob({})", self.to_hex())
    }
}

impl Serialize for CellBlob {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CellBlob {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// One stack slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedValue {
    /// Integer slot; `None` when the slot is null, NaN or has no value.
    Number(Option<BigInt>),
    Cell(CellBlob),
    Tuple(Vec<TaggedValue>),
}

impl TaggedValue {
    /// Short name of the slot shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TaggedValue::Number(Some(_)) => "num",
            TaggedValue::Number(None) => "null",
            TaggedValue::Cell(_) => "cell",
            TaggedValue::Tuple(_) => "tuple",
        }
    }

    pub fn number(value: impl Into<BigInt>) -> Self {
        TaggedValue::Number(Some(value.into()))
    }

    pub fn null() -> Self {
        TaggedValue::Number(None)
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal integer, optionally negative.
/// Only a single leading `-` is allowed; separators and inner signs are not.
pub fn parse_stack_number(text: &str) -> Result<BigInt, StackError> {
    let text = text.trim();
    let invalid = || StackError::InvalidNumber(text.to_string());
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (radix, digits) = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex_digits) => (16, hex_digits),
        None => (10, body),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    let value = BigInt::from_str_radix(digits, radix).map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}

/// Wire shape of a slot before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        default,
        deserialize_with = "number_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub num: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuple: Option<Vec<StackRecord>>,
}

/// Numbers arrive as text or, from some providers, as JSON integers.
fn number_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
        Repr::Text(text) => text,
        Repr::Signed(n) => n.to_string(),
        Repr::Unsigned(n) => n.to_string(),
    }))
}

impl TryFrom<StackRecord> for TaggedValue {
    type Error = StackError;

    fn try_from(record: StackRecord) -> Result<Self, Self::Error> {
        let number = |num: Option<String>| -> Result<TaggedValue, StackError> {
            num.map(|n| parse_stack_number(&n))
                .transpose()
                .map(TaggedValue::Number)
        };
        let tuple = |items: Vec<StackRecord>| -> Result<TaggedValue, StackError> {
            items
                .into_iter()
                .map(TaggedValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(TaggedValue::Tuple)
        };

        match record.kind.as_deref() {
            Some("num") => number(record.num),
            Some("null") | Some("nan") => Ok(TaggedValue::Number(None)),
            Some("cell") => record
                .cell
                .ok_or_else(|| StackError::MissingPayload("cell".into()))
                .and_then(|hex| CellBlob::from_hex(&hex))
                .map(TaggedValue::Cell),
            Some("slice") => record
                .slice
                .or(record.cell)
                .ok_or_else(|| StackError::MissingPayload("slice".into()))
                .and_then(|hex| CellBlob::from_hex(&hex))
                .map(TaggedValue::Cell),
            Some("tuple") => tuple(record.tuple.unwrap_or_default()),
            Some(other) => Err(StackError::UnknownType(other.to_string())),
            None => {
                if let Some(items) = record.tuple {
                    tuple(items)
                } else if let Some(hex) = record.cell.or(record.slice) {
                    CellBlob::from_hex(&hex).map(TaggedValue::Cell)
                } else {
                    number(record.num)
                }
            }
        }
    }
}

impl From<&TaggedValue> for StackRecord {
    fn from(value: &TaggedValue) -> Self {
        match value {
            TaggedValue::Number(Some(n)) => StackRecord {
                kind: Some("num".into()),
                num: Some(n.to_str_radix(10)),
                ..Default::default()
            },
            TaggedValue::Number(None) => StackRecord {
                kind: Some("null".into()),
                ..Default::default()
            },
            TaggedValue::Cell(blob) => StackRecord {
                kind: Some("cell".into()),
                cell: Some(blob.to_hex()),
                ..Default::default()
            },
            TaggedValue::Tuple(items) => StackRecord {
                kind: Some("tuple".into()),
                tuple: Some(items.iter().map(StackRecord::from).collect()),
                ..Default::default()
            },
        }
    }
}

impl<'de> Deserialize<'de> for TaggedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let record = StackRecord::deserialize(deserializer)?;
        TaggedValue::try_from(record).map_err(serde::de::Error::custom)
    }
}

impl Serialize for TaggedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        StackRecord::from(self).serialize(serializer)
    }
}
