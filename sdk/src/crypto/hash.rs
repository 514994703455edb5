//! # Hashing Utilities
//!
//! The chain hashes with the SHA-3 family and nothing else on the
//! transaction path:
//!
//! - **SHA3-256** for transaction hashes, unique aggregate hashes, address
//!   bodies and checksums, and mosaic/namespace id generation.
//! - **SHA3-512** inside the `Ed25519Sha3` signature scheme.
//!
//! SHA-256, Keccak-256 and RIPEMD-160 appear only where the protocol names
//! them: secret-lock hash algorithms and the address body.

use ripemd::Ripemd160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;
use sha3::{Digest, Keccak256, Sha3_256};
use std::fmt;
use std::str::FromStr;

use crate::config::HASH_SIZE;
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// A 32-byte digest: transaction hash, generation hash, or lock secret.
///
/// Displays and serializes as uppercase hex, the form the REST API and the
/// announce endpoint use.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// The all-zero hash.
    pub const ZERO: Hash = Hash([0u8; HASH_SIZE]);

    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parses a hash from exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SdkError> {
        let arr: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| SdkError::InvalidLength {
            what: "hash",
            expected: HASH_SIZE,
            got: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parses a hash from 64 hex characters (either case).
    pub fn from_hex(s: &str) -> Result<Self, SdkError> {
        Self::from_slice(&hex::decode(s)?)
    }

    /// Uppercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Hash functions
// ---------------------------------------------------------------------------

/// SHA3-256 of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// SHA3-256 over several slices fed in order, without concatenating them.
///
/// This is how the transaction hash and the unique aggregate hash are
/// computed: the inputs are disjoint regions of a payload plus the
/// generation hash.
pub fn sha3_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Keccak-256 (the pre-standard SHA-3 padding) of `data`.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// `SHA-256(SHA-256(data))`.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// `RIPEMD-160(SHA-256(data))`, the Bitcoin-style Hash160.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_256_known_vector() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_keccak_differs_from_sha3() {
        assert_eq!(
            hex::encode(keccak_256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_ne!(keccak_256(b"sirius"), sha3_256(b"sirius"));
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(double_sha256(b"abc"), sha256(&sha256(b"abc")));
    }

    #[test]
    fn test_ripemd160_known_vector() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
        assert_eq!(hash160(b"abc"), ripemd160(&sha256(b"abc")));
    }

    #[test]
    fn test_multi_matches_concatenation() {
        let multi = sha3_256_multi(&[b"hello", b" ", b"world"]);
        assert_eq!(multi, sha3_256(b"hello world"));
    }

    #[test]
    fn test_hash_hex_roundtrip_is_uppercase() {
        let h = Hash::new(sha3_256(b"x"));
        let hex = h.to_hex();
        assert!(hex.chars().all(|c| !c.is_ascii_lowercase()));
        assert_eq!(Hash::from_hex(&hex.to_lowercase()).unwrap(), h);
    }

    #[test]
    fn test_hash_rejects_wrong_length() {
        let err = Hash::from_hex("ABCD").unwrap_err();
        assert!(matches!(
            err,
            SdkError::InvalidLength {
                expected: 32,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_hash_serde_as_hex_string() {
        let h = Hash::new([0xAB; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", "AB".repeat(32)));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
