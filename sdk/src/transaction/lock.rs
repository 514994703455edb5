//! # Locks
//!
//! Funds locks guarding bonded aggregates, and the secret lock / secret
//! proof pair used for cross-chain swaps.
//!
//! A secret lock commits to `secret = H(proof)` under one of four hash
//! algorithms; the matching proof transaction reveals `proof` and is checked
//! against the secret before it is ever encoded.

use bytes::BufMut;
use serde::{Deserialize, Serialize};

use super::signing::SignedTransaction;
use super::types::EntityType;
use super::Body;
use crate::config::{ADDRESS_SIZE, HASH_SIZE};
use crate::crypto::hash::{double_sha256, hash160, keccak_256, sha3_256, Hash};
use crate::error::SdkError;
use crate::model::{Mosaic, Recipient};

// ---------------------------------------------------------------------------
// HashType
// ---------------------------------------------------------------------------

/// Hash algorithm binding a secret to its proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashType {
    Sha3_256,
    Keccak256,
    /// RIPEMD-160(SHA-256(x)), right-padded with zeros to 32 bytes.
    Hash160,
    /// SHA-256(SHA-256(x)).
    Hash256,
}

impl HashType {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Sha3_256 => 0,
            Self::Keccak256 => 1,
            Self::Hash160 => 2,
            Self::Hash256 => 3,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, SdkError> {
        match value {
            0 => Ok(Self::Sha3_256),
            1 => Ok(Self::Keccak256),
            2 => Ok(Self::Hash160),
            3 => Ok(Self::Hash256),
            other => Err(SdkError::dto("hashAlgorithm", format!("unknown value {other}"))),
        }
    }

    /// The secret committed to by `proof`.
    pub fn secret_for(&self, proof: &[u8]) -> Hash {
        match self {
            Self::Sha3_256 => Hash::new(sha3_256(proof)),
            Self::Keccak256 => Hash::new(keccak_256(proof)),
            Self::Hash160 => {
                let mut padded = [0u8; HASH_SIZE];
                padded[..20].copy_from_slice(&hash160(proof));
                Hash::new(padded)
            }
            Self::Hash256 => Hash::new(double_sha256(proof)),
        }
    }
}

// ---------------------------------------------------------------------------
// HashLock
// ---------------------------------------------------------------------------

/// Locks funds against the hash of a signed bonded aggregate.
///
/// ```text
/// mosaic_id:u64 | amount:u64 | duration:u64 | hash:32
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashLockTransaction {
    pub mosaic: Mosaic,
    pub duration: u64,
    pub hash: Hash,
}

impl HashLockTransaction {
    /// Locks `mosaic` for `duration` blocks against `signed`, which must be
    /// an aggregate bonded transaction.
    pub fn for_bonded(
        mosaic: Mosaic,
        duration: u64,
        signed: &SignedTransaction,
    ) -> Result<Self, SdkError> {
        if signed.entity_type != EntityType::AggregateBonded {
            return Err(SdkError::NotBondedAggregate {
                entity_type: signed.entity_type.value(),
            });
        }
        Ok(Self {
            mosaic,
            duration,
            hash: signed.hash,
        })
    }
}

impl Body for HashLockTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::HashLock
    }

    fn body_size(&self) -> usize {
        8 + 8 + 8 + HASH_SIZE
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.hash.is_zero() {
            return Err(SdkError::structural("hash", "locked hash is all zeros"));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u64_le(self.mosaic.asset_id.to_u64());
        buf.put_u64_le(self.mosaic.amount);
        buf.put_u64_le(self.duration);
        buf.put_slice(self.hash.as_bytes());
    }
}

// ---------------------------------------------------------------------------
// SecretLock / SecretProof
// ---------------------------------------------------------------------------

/// ```text
/// mosaic_id:u64 | amount:u64 | duration:u64 | hash_type:u8 | secret:32 | recipient:25
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretLockTransaction {
    pub mosaic: Mosaic,
    pub duration: u64,
    pub hash_type: HashType,
    pub secret: Hash,
    pub recipient: Recipient,
}

impl Body for SecretLockTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::SecretLock
    }

    fn body_size(&self) -> usize {
        8 + 8 + 8 + 1 + HASH_SIZE + ADDRESS_SIZE
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.secret.is_zero() {
            return Err(SdkError::structural("secret", "secret is all zeros"));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u64_le(self.mosaic.asset_id.to_u64());
        buf.put_u64_le(self.mosaic.amount);
        buf.put_u64_le(self.duration);
        buf.put_u8(self.hash_type.as_u8());
        buf.put_slice(self.secret.as_bytes());
        buf.put_slice(&self.recipient.to_bytes());
    }
}

/// ```text
/// hash_type:u8 | secret:32 | recipient:25 | proof_size:u16 | proof
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretProofTransaction {
    pub hash_type: HashType,
    pub secret: Hash,
    pub recipient: Recipient,
    pub proof: Vec<u8>,
}

impl SecretProofTransaction {
    /// Builds a proof and derives its secret.
    pub fn new(hash_type: HashType, proof: Vec<u8>, recipient: impl Into<Recipient>) -> Self {
        Self {
            hash_type,
            secret: hash_type.secret_for(&proof),
            recipient: recipient.into(),
            proof,
        }
    }
}

impl Body for SecretProofTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::SecretProof
    }

    fn body_size(&self) -> usize {
        1 + HASH_SIZE + ADDRESS_SIZE + 2 + self.proof.len()
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.proof.is_empty() {
            return Err(SdkError::structural("proof", "proof is empty"));
        }
        if self.proof.len() > usize::from(u16::MAX) {
            return Err(SdkError::structural(
                "proof",
                format!("{} bytes does not fit a u16 size field", self.proof.len()),
            ));
        }
        if self.hash_type.secret_for(&self.proof) != self.secret {
            return Err(SdkError::structural(
                "proof",
                format!("proof does not hash to the secret under {:?}", self.hash_type),
            ));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u8(self.hash_type.as_u8());
        buf.put_slice(self.secret.as_bytes());
        buf.put_slice(&self.recipient.to_bytes());
        buf.put_u16_le(self.proof.len() as u16);
        buf.put_slice(&self.proof);
    }
}
