//! Error types for the transaction core.
//!
//! Every fallible operation in the crate returns an [`SdkError`]. Variants
//! are grouped into the five failure categories reported by
//! [`SdkError::kind`]: structural problems caught before encoding, encoding
//! mismatches, cryptographic failures, aggregate composition mistakes, and
//! decode errors from hex or JSON input.

use thiserror::Error;

use crate::crypto::keys::KeyError;
use crate::transaction::schema::LayoutError;

/// Coarse category of an [`SdkError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is missing, empty, or out of range.
    Structural,
    /// The encoder produced bytes that disagree with `size()` or the schema.
    Encoding,
    /// Key material, scheme, signature or hash problems.
    Crypto,
    /// Aggregate embedding or cosigning was attempted on the wrong input.
    Composition,
    /// Malformed hex, JSON, or DTO content.
    Decode,
}

/// Errors produced while building, encoding, signing, hashing or decoding
/// transactions.
#[derive(Debug, Error)]
pub enum SdkError {
    /// A field failed validation before any bytes were written.
    #[error("invalid {field}: {reason}")]
    Structural {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// `bytes()` appended a different number of bytes than `size()` declared.
    #[error("encoded entity 0x{entity_type:04X} is {actual} bytes but size() declares {declared}")]
    SizeMismatch {
        entity_type: u16,
        declared: usize,
        actual: usize,
    },

    /// The encoded buffer does not walk cleanly against its schema.
    #[error("schema layout mismatch: {0}")]
    Layout(#[from] LayoutError),

    /// Private or public key material is unusable.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// The derivation scheme tag cannot be used to sign or verify.
    #[error("unsupported derivation scheme: {0}")]
    UnsupportedScheme(u8),

    /// A fixed-width value (hash, signature, key) has the wrong length.
    #[error("invalid {what} length: expected {expected} bytes, got {got}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// A signature did not verify.
    #[error("signature verification failed")]
    VerificationFailed,

    /// Aggregate embedding requires the inner transaction to carry a signer.
    #[error("transaction 0x{entity_type:04X} has no signer and cannot be embedded in an aggregate")]
    MissingSigner { entity_type: u16 },

    /// An aggregate-only operation received something else.
    #[error("expected an aggregate transaction, got entity type 0x{entity_type:04X}")]
    NotAggregate { entity_type: u16 },

    /// Cosigning and hash locks only apply to bonded aggregates.
    #[error("expected an aggregate bonded transaction, got entity type 0x{entity_type:04X}")]
    NotBondedAggregate { entity_type: u16 },

    /// The transaction to cosign has no confirmed hash attached.
    #[error("transaction to cosign has no hash in its transaction info")]
    MissingTransactionHash,

    /// The entity type is not part of the closed transaction catalogue.
    #[error("unknown entity type 0x{0:04X}")]
    UnknownEntityType(u16),

    /// The network byte is not a known network.
    #[error("unknown network type 0x{0:02X}")]
    UnknownNetworkType(u8),

    /// An address string or raw address failed to parse.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Hex input could not be decoded.
    #[error("hex decode failed: {0}")]
    Hex(#[from] hex::FromHexError),

    /// JSON input could not be parsed.
    #[error("json decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A DTO parsed as JSON but carries an unusable value.
    #[error("invalid dto field {field}: {reason}")]
    Dto { field: &'static str, reason: String },

    /// A batch element failed to decode.
    #[error("element {index}: {source}")]
    BatchElement {
        index: usize,
        #[source]
        source: Box<SdkError>,
    },
}

impl SdkError {
    /// Shorthand for a [`SdkError::Structural`] error.
    pub fn structural(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Structural {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`SdkError::Dto`] error.
    pub fn dto(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Dto {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Structural { .. } => ErrorKind::Structural,
            Self::SizeMismatch { .. } | Self::Layout(_) => ErrorKind::Encoding,
            Self::Key(_)
            | Self::UnsupportedScheme(_)
            | Self::InvalidLength { .. }
            | Self::VerificationFailed => ErrorKind::Crypto,
            Self::MissingSigner { .. }
            | Self::NotAggregate { .. }
            | Self::NotBondedAggregate { .. }
            | Self::MissingTransactionHash => ErrorKind::Composition,
            Self::UnknownEntityType(_)
            | Self::UnknownNetworkType(_)
            | Self::InvalidAddress(_)
            | Self::Hex(_)
            | Self::Json(_)
            | Self::Dto { .. } => ErrorKind::Decode,
            Self::BatchElement { source, .. } => source.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            SdkError::structural("recipient", "missing").kind(),
            ErrorKind::Structural
        );
        assert_eq!(
            SdkError::SizeMismatch {
                entity_type: 0x4154,
                declared: 10,
                actual: 11
            }
            .kind(),
            ErrorKind::Encoding
        );
        assert_eq!(SdkError::VerificationFailed.kind(), ErrorKind::Crypto);
        assert_eq!(
            SdkError::MissingSigner { entity_type: 0x4154 }.kind(),
            ErrorKind::Composition
        );
        assert_eq!(SdkError::UnknownEntityType(1).kind(), ErrorKind::Decode);
    }

    #[test]
    fn batch_element_inherits_kind() {
        let err = SdkError::BatchElement {
            index: 3,
            source: Box::new(SdkError::MissingTransactionHash),
        };
        assert_eq!(err.kind(), ErrorKind::Composition);
        assert!(err.to_string().starts_with("element 3:"));
    }

    #[test]
    fn size_mismatch_message_is_hex() {
        let err = SdkError::SizeMismatch {
            entity_type: 0x415D,
            declared: 156,
            actual: 155,
        };
        assert_eq!(
            err.to_string(),
            "encoded entity 0x415D is 155 bytes but size() declares 156"
        );
    }
}
