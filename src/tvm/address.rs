//! Internal (`addr_std`) account addresses
//!
//! Parses the raw `workchain:hex` form and the 48-character user-friendly
//! base64 form. Flags from the friendly form are kept for display only;
//! two addresses are equal when workchain and hash are equal.

use crate::crc::CRC16;
use crate::tvm::error::AddressError;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TEST_ONLY: u8 = 0x80;

#[derive(Debug, Clone, Copy)]
pub struct Address {
    /// Workchain ID (-1 for masterchain, 0 for basechain)
    pub workchain: i8,
    pub hash_part: [u8; 32],
    pub is_bounceable: bool,
    pub is_test_only: bool,
}

impl Address {
    pub fn new(workchain: i8, hash_part: [u8; 32]) -> Self {
        Self {
            workchain,
            hash_part,
            is_bounceable: true,
            is_test_only: false,
        }
    }

    /// Parses `workchain:64-hex-digits`
    pub fn from_raw(s: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidRaw(s.to_string());
        let (wc, hash) = s.split_once(':').ok_or_else(invalid)?;
        let workchain = wc.parse::<i8>().map_err(|_| invalid())?;
        if hash.len() != 64 {
            return Err(invalid());
        }
        let mut hash_part = [0u8; 32];
        hex::decode_to_slice(hash, &mut hash_part).map_err(|_| invalid())?;
        Ok(Self::new(workchain, hash_part))
    }

    /// Parses the user-friendly form, url-safe or standard alphabet
    pub fn from_friendly(s: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidFriendly(s.to_string());
        if s.len() != 48 {
            return Err(invalid());
        }
        let bytes = URL_SAFE
            .decode(s)
            .or_else(|_| STANDARD.decode(s))
            .map_err(|_| invalid())?;
        if bytes.len() != 36 {
            return Err(invalid());
        }

        let checksum = CRC16.checksum(&bytes[..34]).to_be_bytes();
        if checksum != bytes[34..36] {
            return Err(AddressError::Checksum(s.to_string()));
        }

        let tag = bytes[0];
        let is_test_only = tag & TAG_TEST_ONLY != 0;
        let is_bounceable = match tag & !TAG_TEST_ONLY {
            TAG_BOUNCEABLE => true,
            TAG_NON_BOUNCEABLE => false,
            _ => return Err(invalid()),
        };

        let mut hash_part = [0u8; 32];
        hash_part.copy_from_slice(&bytes[2..34]);
        Ok(Self {
            workchain: bytes[1] as i8,
            hash_part,
            is_bounceable,
            is_test_only,
        })
    }

    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash_part))
    }

    /// User-friendly url-safe base64 form with explicit flags
    pub fn to_friendly(&self, bounceable: bool, test_only: bool) -> String {
        let mut tag = if bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if test_only {
            tag |= TAG_TEST_ONLY;
        }

        let mut bytes = Vec::with_capacity(36);
        bytes.push(tag);
        bytes.push(self.workchain as u8);
        bytes.extend_from_slice(&self.hash_part);
        let checksum = CRC16.checksum(&bytes);
        bytes.extend_from_slice(&checksum.to_be_bytes());

        URL_SAFE.encode(bytes)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.workchain == other.workchain && self.hash_part == other.hash_part
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.workchain.hash(state);
        self.hash_part.hash(state);
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') {
            Self::from_raw(s)
        } else {
            Self::from_friendly(s)
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_friendly(self.is_bounceable, self.is_test_only))
    }
}
