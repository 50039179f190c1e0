// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text encoding that keeps arbitrary-precision integers exact.
//!
//! JSON numbers lose precision past 2^53 in most consumers, so big integers
//! are written as their decimal digits followed by [`BIG_INT_SUFFIX`]
//! (`"1000000000000000000000n"`). Decoding turns every string scalar that
//! matches `-?digits+n` back into an integer, at any nesting depth.
//!
//! Known limitation: an ordinary string that happens to look like
//! `123n` is indistinguishable from an encoded integer and decodes as one.
//!
//! Typed values opt in per field with `#[serde(with = "precision::big_int")]`;
//! untyped trees go through [`Value`].

use lazy_static::lazy_static;
use num_bigint::BigInt;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

pub const BIG_INT_SUFFIX: char = 'n';

lazy_static! {
    static ref BIG_INT_PATTERN: Regex = Regex::new(r"^-?[0-9]+n$").expect("static pattern");
}

/// `12345` → `"12345n"`
pub fn encode_big_int(value: &BigInt) -> String {
    format!("{value}{BIG_INT_SUFFIX}")
}

/// `"12345n"` → `12345`; anything else → `None`.
pub fn decode_big_int(text: &str) -> Option<BigInt> {
    if !BIG_INT_PATTERN.is_match(text) {
        return None;
    }
    text[..text.len() - 1].parse().ok()
}

/// Serialize `value` to text, big integers included.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Inverse of [`encode`].
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(text)
}

/// Generic structured value with a first-class big integer variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    BigInt(BigInt),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => match decode_big_int(&s) {
                Some(big) => Value::BigInt(big),
                None => Value::String(s),
            },
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::BigInt(big) => serde_json::Value::String(encode_big_int(big)),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

/// Field adapter: `#[serde(with = "crate::cache::precision::big_int")]`.
///
/// Writes the suffixed form. Reads the suffixed form, a plain decimal string
/// or a JSON integer.
pub mod big_int {
    use super::{BIG_INT_SUFFIX, decode_big_int, encode_big_int};
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_big_int(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => decode_big_int(&text)
                .or_else(|| text.parse().ok())
                .ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "expected an integer with optional '{BIG_INT_SUFFIX}' suffix, got '{text}'"
                    ))
                }),
            Repr::Signed(n) => Ok(BigInt::from(n)),
            Repr::Unsigned(n) => Ok(BigInt::from(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn big(text: &str) -> BigInt {
        text.parse().unwrap()
    }

    #[test]
    fn test_big_int_text_form() {
        assert_eq!(encode_big_int(&big("0")), "0n");
        assert_eq!(encode_big_int(&big("-17")), "-17n");
        assert_eq!(decode_big_int("123n"), Some(big("123")));
        assert_eq!(decode_big_int("-0n"), Some(big("0")));
        assert_eq!(decode_big_int("123"), None);
        assert_eq!(decode_big_int("n"), None);
        assert_eq!(decode_big_int("12a3n"), None);
        assert_eq!(decode_big_int(" 123n"), None);
        assert_eq!(decode_big_int("--1n"), None);
    }

    #[test]
    fn test_value_round_trip_nested() {
        let huge = big("-340282366920938463463374607431768211457");
        let mut inner = BTreeMap::new();
        inner.insert("balance".to_string(), Value::BigInt(huge.clone()));
        inner.insert("zero".to_string(), Value::BigInt(big("0")));
        let mut outer = BTreeMap::new();
        outer.insert(
            "rounds".to_string(),
            Value::Array(vec![
                Value::Object(inner),
                Value::Array(vec![Value::BigInt(big("12345678901234567890123"))]),
            ]),
        );
        outer.insert("top".to_string(), Value::BigInt(big("7")));
        outer.insert("label".to_string(), Value::from("pool"));
        outer.insert("flag".to_string(), Value::Bool(true));
        outer.insert("small".to_string(), Value::Number(42.into()));
        outer.insert("nothing".to_string(), Value::Null);
        let value = Value::Object(outer);

        let text = encode(&value).unwrap();
        assert!(text.contains("\"-340282366920938463463374607431768211457n\""));
        let back: Value = decode(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_top_level_big_int() {
        let value = Value::BigInt(big("99999999999999999999"));
        let text = encode(&value).unwrap();
        assert_eq!(text, "\"99999999999999999999n\"");
        assert_eq!(decode::<Value>(&text).unwrap(), value);
    }

    #[test]
    fn test_plain_strings_are_untouched() {
        let back: Value = decode(r#"{"a":"123","b":"abc","c":"12n3"}"#).unwrap();
        let Value::Object(map) = back else {
            panic!("expected object");
        };
        assert_eq!(map["a"], Value::from("123"));
        assert_eq!(map["b"], Value::from("abc"));
        assert_eq!(map["c"], Value::from("12n3"));
    }

    #[test]
    fn test_lookalike_string_is_decoded_as_integer() {
        // Documented ambiguity: a literal "5n" string comes back as 5.
        let text = encode(&json!({"note": "5n"})).unwrap();
        let Value::Object(map) = decode::<Value>(&text).unwrap() else {
            panic!("expected object");
        };
        assert_eq!(map["note"], Value::BigInt(big("5")));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "big_int")]
        amount: BigInt,
    }

    #[test]
    fn test_field_adapter() {
        let holder = Holder {
            amount: big("18446744073709551616"),
        };
        let text = encode(&holder).unwrap();
        assert_eq!(text, r#"{"amount":"18446744073709551616n"}"#);
        assert_eq!(decode::<Holder>(&text).unwrap(), holder);

        assert_eq!(
            decode::<Holder>(r#"{"amount":"42"}"#).unwrap().amount,
            big("42")
        );
        assert_eq!(
            decode::<Holder>(r#"{"amount":-3}"#).unwrap().amount,
            big("-3")
        );
        assert!(decode::<Holder>(r#"{"amount":"lots"}"#).is_err());
    }
}
