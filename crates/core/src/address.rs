//! ICON addresses.
//!
//! An address is 20 bytes behind a two letter prefix: `hx` for accounts
//! owned by a key pair and `cx` for SCOREs.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;

/// Length of the address body in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// The System SCORE (staking, delegation, P-Rep registry, I-Score).
pub const SYSTEM_SCORE_ADDRESS: Address = Address::contract([0u8; ADDRESS_SIZE]);

/// The Governance SCORE.
pub const GOVERNANCE_SCORE_ADDRESS: Address = Address::contract({
    let mut body = [0u8; ADDRESS_SIZE];
    body[ADDRESS_SIZE - 1] = 1;
    body
});

/// Default sender of read-only calls.
pub const ZERO_ADDRESS: Address = Address::account([0u8; ADDRESS_SIZE]);

/// Address prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressPrefix {
    /// Externally owned account (`hx`)
    Eoa,
    /// Contract account (`cx`)
    Contract,
}

impl AddressPrefix {
    /// Returns the textual prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressPrefix::Eoa => "hx",
            AddressPrefix::Contract => "cx",
        }
    }
}

/// An ICON address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    prefix: AddressPrefix,
    body: [u8; ADDRESS_SIZE],
}

impl Address {
    /// Creates an `hx` address.
    pub const fn account(body: [u8; ADDRESS_SIZE]) -> Self {
        Self {
            prefix: AddressPrefix::Eoa,
            body,
        }
    }

    /// Creates a `cx` address.
    pub const fn contract(body: [u8; ADDRESS_SIZE]) -> Self {
        Self {
            prefix: AddressPrefix::Contract,
            body,
        }
    }

    /// Derives the account address of an uncompressed secp256k1 public key.
    ///
    /// The address body is the last 20 bytes of SHA3-256 over the 64 key
    /// bytes, excluding the leading `0x04` tag.
    pub fn from_public_key(uncompressed: &[u8; 65]) -> Self {
        let digest = Sha3_256::digest(&uncompressed[1..]);
        let mut body = [0u8; ADDRESS_SIZE];
        body.copy_from_slice(&digest[digest.len() - ADDRESS_SIZE..]);
        Self::account(body)
    }

    pub fn prefix(&self) -> AddressPrefix {
        self.prefix
    }

    pub fn body(&self) -> &[u8; ADDRESS_SIZE] {
        &self.body
    }

    pub fn is_contract(&self) -> bool {
        self.prefix == AddressPrefix::Contract
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidAddress(s.to_string());

        let prefix = match s.get(..2) {
            Some("hx") => AddressPrefix::Eoa,
            Some("cx") => AddressPrefix::Contract,
            _ => return Err(invalid()),
        };
        let digits = &s[2..];
        if digits.len() != ADDRESS_SIZE * 2 {
            return Err(invalid());
        }

        let mut body = [0u8; ADDRESS_SIZE];
        hex::decode_to_slice(digits, &mut body).map_err(|_| invalid())?;
        Ok(Self { prefix, body })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix.as_str(), hex::encode(self.body))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_lowercase() {
        let address: Address = "hxBE258CEB872E08851F1F59694DAC2558708ECE11".parse().unwrap();
        assert_eq!(
            address.to_string(),
            "hxbe258ceb872e08851f1f59694dac2558708ece11"
        );
        assert!(!address.is_contract());
    }

    #[test]
    fn score_addresses() {
        assert_eq!(
            SYSTEM_SCORE_ADDRESS.to_string(),
            "cx0000000000000000000000000000000000000000"
        );
        assert_eq!(
            GOVERNANCE_SCORE_ADDRESS.to_string(),
            "cx0000000000000000000000000000000000000001"
        );
        assert!(GOVERNANCE_SCORE_ADDRESS.is_contract());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for text in [
            "",
            "hx",
            "0xbe258ceb872e08851f1f59694dac2558708ece11",
            "hxbe258ceb872e08851f1f59694dac2558708ece1",
            "hxbe258ceb872e08851f1f59694dac2558708ece111",
            "hxzz258ceb872e08851f1f59694dac2558708ece11",
        ] {
            assert!(text.parse::<Address>().is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&GOVERNANCE_SCORE_ADDRESS).unwrap();
        assert_eq!(json, "\"cx0000000000000000000000000000000000000001\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GOVERNANCE_SCORE_ADDRESS);
    }
}
