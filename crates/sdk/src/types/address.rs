// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use crc::{CRC_16_XMODEM, Crc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TEST_ONLY: u8 = 0x80;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid raw address '{0}'")]
    InvalidRaw(String),

    #[error("Invalid user-friendly address '{0}'")]
    InvalidFriendly(String),

    #[error("Unknown address tag 0x{0:02x}")]
    UnknownTag(u8),

    #[error("Address checksum mismatch in '{0}'")]
    ChecksumMismatch(String),
}

/// Flags carried by the user-friendly address form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendlyFlags {
    pub bounceable: bool,
    pub test_only: bool,
}

impl Default for FriendlyFlags {
    fn default() -> Self {
        Self {
            bounceable: true,
            test_only: false,
        }
    }
}

/// A standard (`addr_std`) chain address: 8-bit workchain plus 256-bit
/// account id.
///
/// `Display` renders the canonical user-friendly form: bounceable, not
/// test-only, URL-safe base64 (e.g. `EQ...` on the basechain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    workchain: i8,
    hash: [u8; 32],
}

impl Address {
    pub fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    pub fn workchain(&self) -> i8 {
        self.workchain
    }

    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// `<workchain>:<64 hex chars>`
    pub fn to_raw_string(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// 48-character URL-safe base64 form with the given flags.
    pub fn to_friendly(&self, flags: FriendlyFlags) -> String {
        let mut tag = if flags.bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if flags.test_only {
            tag |= TAG_TEST_ONLY;
        }

        let mut bytes = Vec::with_capacity(36);
        bytes.push(tag);
        bytes.push(self.workchain as u8);
        bytes.extend_from_slice(&self.hash);
        let checksum = CRC16.checksum(&bytes);
        bytes.extend_from_slice(&checksum.to_be_bytes());

        URL_SAFE.encode(bytes)
    }

    /// Parse the user-friendly form, returning the address and its flags.
    /// Both the URL-safe and the standard base64 alphabets are accepted.
    pub fn parse_friendly(text: &str) -> Result<(Self, FriendlyFlags), AddressError> {
        if text.len() != 48 {
            return Err(AddressError::InvalidFriendly(text.to_string()));
        }
        let bytes = URL_SAFE
            .decode(text)
            .or_else(|_| STANDARD.decode(text))
            .map_err(|_| AddressError::InvalidFriendly(text.to_string()))?;
        if bytes.len() != 36 {
            return Err(AddressError::InvalidFriendly(text.to_string()));
        }

        let checksum = u16::from_be_bytes([bytes[34], bytes[35]]);
        if CRC16.checksum(&bytes[..34]) != checksum {
            return Err(AddressError::ChecksumMismatch(text.to_string()));
        }

        let mut tag = bytes[0];
        let test_only = tag & TAG_TEST_ONLY != 0;
        if test_only {
            tag ^= TAG_TEST_ONLY;
        }
        let bounceable = match tag {
            TAG_BOUNCEABLE => true,
            TAG_NON_BOUNCEABLE => false,
            other => return Err(AddressError::UnknownTag(other)),
        };

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);
        Ok((
            Self::new(bytes[1] as i8, hash),
            FriendlyFlags {
                bounceable,
                test_only,
            },
        ))
    }

    fn parse_raw(text: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidRaw(text.to_string());
        let (workchain, hash_hex) = text.split_once(':').ok_or_else(invalid)?;
        let workchain: i8 = workchain.parse().map_err(|_| invalid())?;
        let bytes = hex::decode(hash_hex).map_err(|_| invalid())?;
        let hash: [u8; 32] = bytes.try_into().map_err(|_| invalid())?;
        Ok(Self::new(workchain, hash))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_friendly(FriendlyFlags::default()))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(':') {
            Self::parse_raw(s)
        } else {
            Self::parse_friendly(s).map(|(address, _)| address)
        }
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
