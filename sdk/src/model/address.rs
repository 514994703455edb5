//! # Addresses & Recipients
//!
//! A raw address is 25 bytes:
//!
//! ```text
//! network (1) | RIPEMD-160(SHA3-256(public_key)) (20) | checksum (4)
//! ```
//!
//! where the checksum is the first four bytes of SHA3-256 over the first 21
//! bytes. The textual form is unpadded RFC 4648 base32, exactly 40
//! characters, optionally shown in dashed groups of six.
//!
//! A [`Recipient`] is what transfers and secret locks actually encode: either
//! a concrete address or a namespace alias that the node resolves later.

use base32::Alphabet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::namespace::NamespaceId;
use super::network::NetworkType;
use crate::config::{
    ADDRESS_CHECKSUM_SIZE, ADDRESS_ENCODED_SIZE, ADDRESS_SIZE, ALIAS_ADDRESS_NETWORK_BYTE,
};
use crate::crypto::hash::{ripemd160, sha3_256};
use crate::crypto::keys::PublicKey;
use crate::error::SdkError;

const BASE32: Alphabet = Alphabet::RFC4648 { padding: false };

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A checked account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    network_type: NetworkType,
    bytes: [u8; ADDRESS_SIZE],
}

impl Address {
    /// Derives the address of `public_key` on `network_type`.
    pub fn from_public_key(public_key: &PublicKey, network_type: NetworkType) -> Self {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = network_type.as_u8();
        bytes[1..21].copy_from_slice(&ripemd160(&sha3_256(public_key.as_bytes())));
        let checksum = sha3_256(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum[..ADDRESS_CHECKSUM_SIZE]);
        Self {
            network_type,
            bytes,
        }
    }

    /// Parses a base32 address, with or without dashes, in either case.
    pub fn from_raw(raw: &str) -> Result<Self, SdkError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if cleaned.len() != ADDRESS_ENCODED_SIZE {
            return Err(SdkError::InvalidAddress(format!(
                "expected {} base32 characters, got {}",
                ADDRESS_ENCODED_SIZE,
                cleaned.len()
            )));
        }
        let decoded = base32::decode(BASE32, &cleaned)
            .ok_or_else(|| SdkError::InvalidAddress(format!("{raw} is not base32")))?;
        Self::from_bytes(&decoded)
    }

    /// Parses 25 raw bytes, validating the network byte and checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SdkError> {
        let bytes: [u8; ADDRESS_SIZE] = bytes.try_into().map_err(|_| {
            SdkError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_SIZE,
                bytes.len()
            ))
        })?;
        let network_type = NetworkType::from_u8(bytes[0])?;
        let checksum = sha3_256(&bytes[..21]);
        if checksum[..ADDRESS_CHECKSUM_SIZE] != bytes[21..] {
            return Err(SdkError::InvalidAddress("checksum mismatch".to_string()));
        }
        Ok(Self {
            network_type,
            bytes,
        })
    }

    /// Parses a hex-encoded raw address, as returned by the REST API.
    pub fn from_hex(s: &str) -> Result<Self, SdkError> {
        Self::from_bytes(&hex::decode(s)?)
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.bytes
    }

    /// 40-character base32 form.
    pub fn to_raw(&self) -> String {
        base32::encode(BASE32, &self.bytes)
    }

    /// Base32 form in dashed groups of six characters.
    pub fn pretty(&self) -> String {
        let raw = self.to_raw();
        raw.as_bytes()
            .chunks(6)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_raw())
    }
}

impl FromStr for Address {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_raw(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_raw())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_raw(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Destination of a transfer or secret lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    Address(Address),
    /// A namespace the node resolves to whatever address it is linked to.
    Alias(NamespaceId),
}

impl Recipient {
    /// The 25-byte unresolved-address encoding.
    ///
    /// Aliases are `0x91 | namespace id (LE u64) | 16 zero bytes`.
    pub fn to_bytes(&self) -> [u8; ADDRESS_SIZE] {
        match self {
            Self::Address(address) => *address.as_bytes(),
            Self::Alias(namespace_id) => {
                let mut bytes = [0u8; ADDRESS_SIZE];
                bytes[0] = ALIAS_ADDRESS_NETWORK_BYTE;
                bytes[1..9].copy_from_slice(&namespace_id.to_u64().to_le_bytes());
                bytes
            }
        }
    }

    /// Inverse of [`Recipient::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SdkError> {
        if bytes.first() == Some(&ALIAS_ADDRESS_NETWORK_BYTE) {
            if bytes.len() != ADDRESS_SIZE {
                return Err(SdkError::InvalidAddress(format!(
                    "alias recipient must be {} bytes, got {}",
                    ADDRESS_SIZE,
                    bytes.len()
                )));
            }
            let mut id = [0u8; 8];
            id.copy_from_slice(&bytes[1..9]);
            return Ok(Self::Alias(NamespaceId::new(u64::from_le_bytes(id))));
        }
        Address::from_bytes(bytes).map(Self::Address)
    }

    pub fn from_hex(s: &str) -> Result<Self, SdkError> {
        Self::from_bytes(&hex::decode(s)?)
    }
}

impl From<Address> for Recipient {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<NamespaceId> for Recipient {
    fn from(namespace_id: NamespaceId) -> Self {
        Self::Alias(namespace_id)
    }
}
