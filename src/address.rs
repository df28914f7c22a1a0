//! Chain address validation and derivation.
//!
//! Pocket addresses are the first 20 bytes of the SHA-256 digest of the
//! account's public key, written as 40 hex characters. They carry no
//! checksum, so validation is purely syntactic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// A validated 20 byte chain address.
///
/// Parsing accepts either case; [`Display`](fmt::Display) always renders
/// lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if !is_hex(s) {
            return Err(Error::InvalidAddress(s.to_string()));
        }
        let bytes = hex::decode(s).map_err(|_| Error::InvalidAddress(s.to_string()))?;
        let bytes: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|_| Error::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Returns `true` if `address` is a well formed chain address.
///
/// The string must consist only of hex digits (either case, no surrounding
/// whitespace) and decode to exactly 20 bytes. Never fails.
pub fn is_valid_address(address: &str) -> bool {
    Address::from_str(address).is_ok()
}

/// Derives the chain address owned by a hex encoded public key.
///
/// The key is not checked for curve membership; any non-empty hex string is
/// hashed.
///
/// # Errors
///
/// Returns [`Error::InvalidPublicKey`] if `public_key_hex` is empty or not
/// valid hex.
///
/// # Example
///
/// ```rust
/// use pocket_query::derive_address;
///
/// let address = derive_address("2cf38013f8cbe524db3172ec507967ec551fd14cea8209cf4c9da2a490cecf74").unwrap();
/// assert_eq!(address.to_string(), "fa08efadee9eaa9d5549bccd6087002a5f47c0e2");
/// ```
pub fn derive_address(public_key_hex: &str) -> Result<Address> {
    if !is_hex(public_key_hex) {
        return Err(Error::InvalidPublicKey(public_key_hex.to_string()));
    }
    let public_key = hex::decode(public_key_hex).map_err(|_| Error::InvalidPublicKey(public_key_hex.to_string()))?;

    let digest = Sha256::digest(&public_key);
    let mut bytes = [0u8; ADDRESS_LENGTH];
    bytes.copy_from_slice(&digest[..ADDRESS_LENGTH]);
    Ok(Address(bytes))
}
