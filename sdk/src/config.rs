//! # Wire-Format Constants & Fee Parameters
//!
//! Every fixed width, offset and magic byte of the transaction wire format
//! lives here. Encoders, the signing pipeline and the schema walker all read
//! from this module, so a layout change is a one-line edit here plus a
//! failing test somewhere else.
//!
//! Nothing in this module is network-specific. Network type and generation
//! hash travel explicitly with accounts and are never read from globals.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Primitive widths
// ---------------------------------------------------------------------------

/// Length of an Ed25519 public key.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Length of an Ed25519 private key seed.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Length of an Ed25519 signature (`R || S`).
pub const SIGNATURE_SIZE: usize = 64;

/// Length of the `R` half of a signature, the part mixed into the
/// transaction hash.
pub const SIGNATURE_R_SIZE: usize = 32;

/// Length of a SHA3-256 digest, used for hashes, secrets and generation hashes.
pub const HASH_SIZE: usize = 32;

/// Raw (decoded) address length: network byte, RIPEMD-160 body, checksum.
pub const ADDRESS_SIZE: usize = 25;

/// Base32 textual address length.
pub const ADDRESS_ENCODED_SIZE: usize = 40;

/// Address checksum length.
pub const ADDRESS_CHECKSUM_SIZE: usize = 4;

// ---------------------------------------------------------------------------
// Transaction header
// ---------------------------------------------------------------------------

/// `size` prefix width.
pub const SIZE_SIZE: usize = 4;

/// Signer public key width inside the header.
pub const SIGNER_SIZE: usize = PUBLIC_KEY_SIZE;

/// Merged version + derivation scheme + network field width.
pub const VERSION_SIZE: usize = 4;

/// Entity type field width.
pub const TYPE_SIZE: usize = 2;

/// Max fee field width.
pub const MAX_FEE_SIZE: usize = 8;

/// Deadline field width.
pub const DEADLINE_SIZE: usize = 8;

/// `size:4 | signature:64 | signer:32 | version:4 | type:2 | maxFee:8 | deadline:8`
pub const TRANSACTION_HEADER_SIZE: usize =
    SIZE_SIZE + SIGNATURE_SIZE + SIGNER_SIZE + VERSION_SIZE + TYPE_SIZE + MAX_FEE_SIZE + DEADLINE_SIZE;

/// `size:4 | signer:32 | version:4 | type:2`
pub const EMBEDDED_HEADER_SIZE: usize = SIZE_SIZE + SIGNER_SIZE + VERSION_SIZE + TYPE_SIZE;

/// Offset of the signature region in a full transaction buffer.
pub const SIGNATURE_OFFSET: usize = SIZE_SIZE;

/// Offset of the signer region in a full transaction buffer.
pub const SIGNER_OFFSET: usize = SIGNATURE_OFFSET + SIGNATURE_SIZE;

/// Offset of the version field; everything from here on is what gets signed.
pub const VERSION_OFFSET: usize = SIGNER_OFFSET + SIGNER_SIZE;

/// Offset of the entity type field.
pub const TYPE_OFFSET: usize = VERSION_OFFSET + VERSION_SIZE;

/// Offset of the max fee field.
pub const MAX_FEE_OFFSET: usize = TYPE_OFFSET + TYPE_SIZE;

/// Offset of the deadline field.
pub const DEADLINE_OFFSET: usize = MAX_FEE_OFFSET + MAX_FEE_SIZE;

/// Bytes removed from a transaction when it is embedded in an aggregate.
pub const EMBEDDING_STRIPPED_SIZE: usize = SIGNATURE_SIZE + MAX_FEE_SIZE + DEADLINE_SIZE;

/// Aggregate header: the normal header plus the 4-byte payload size.
pub const AGGREGATE_HEADER_SIZE: usize = TRANSACTION_HEADER_SIZE + 4;

/// One cosignature appended to an aggregate payload.
pub const COSIGNATURE_SIZE: usize = PUBLIC_KEY_SIZE + SIGNATURE_SIZE;

// ---------------------------------------------------------------------------
// Identifiers & time
// ---------------------------------------------------------------------------

/// Network epoch, 2016-04-01T00:00:00Z, in Unix milliseconds.
pub const NETWORK_EPOCH_MS: i64 = 1_459_468_800_000;

/// Network byte used by unresolved (alias) addresses.
pub const ALIAS_ADDRESS_NETWORK_BYTE: u8 = 0x91;

/// High bit marking a 64-bit identifier as a namespace id.
pub const NAMESPACE_BIT: u64 = 1 << 63;

/// Maximum depth of a namespace path (`root.sub.leaf`).
pub const MAX_NAMESPACE_DEPTH: usize = 3;

/// Maximum length of a single namespace name part.
pub const MAX_NAMESPACE_NAME_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// How the builder derives `max_fee` from a transaction's encoded size.
///
/// `max_fee = size_in_bytes * multiplier`. `Zero` leaves the fee at 0,
/// which private networks usually accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FeeCalculationStrategy {
    #[default]
    Zero,
    Low,
    Middle,
    High,
}

impl FeeCalculationStrategy {
    /// Fee units charged per encoded byte.
    pub fn multiplier(&self) -> u64 {
        match self {
            Self::Zero => 0,
            Self::Low => 250,
            Self::Middle => 2_500,
            Self::High => 25_000,
        }
    }

    /// Computes the max fee for a transaction of `size` bytes.
    pub fn max_fee_for(&self, size: usize) -> u64 {
        (size as u64).saturating_mul(self.multiplier())
    }
}

impl fmt::Display for FeeCalculationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::Low => write!(f, "low"),
            Self::Middle => write!(f, "middle"),
            Self::High => write!(f, "high"),
        }
    }
}
