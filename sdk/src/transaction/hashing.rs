//! Transaction identity.
//!
//! ```text
//! transaction_hash = sha3_256(signature[..32] | signer | generation_hash | bytes[100..])
//!
//! unique_aggregate_hash = sha3_256(inner.signer | generation_hash
//!     | inner.version | inner.type | aggregate.deadline | inner.body)
//! ```
//!
//! The unique aggregate hash uses the deadline of the enclosing aggregate,
//! since embedded transactions carry none of their own.

use super::Transaction;
use crate::config::{
    EMBEDDED_HEADER_SIZE, SIGNATURE_OFFSET, SIGNATURE_R_SIZE, SIGNER_OFFSET, SIGNER_SIZE, SIZE_SIZE,
    TRANSACTION_HEADER_SIZE, VERSION_OFFSET,
};
use crate::crypto::hash::{sha3_256_multi, Hash};
use crate::error::SdkError;

fn generation_bytes(generation_hash: Option<&Hash>) -> &[u8] {
    match generation_hash {
        Some(hash) => hash.as_bytes(),
        None => &[],
    }
}

/// Canonical hash of a signed (or placeholder-patched) transaction buffer.
pub fn transaction_hash(bytes: &[u8], generation_hash: Option<&Hash>) -> Result<Hash, SdkError> {
    if bytes.len() < TRANSACTION_HEADER_SIZE {
        return Err(SdkError::InvalidLength {
            what: "transaction payload",
            expected: TRANSACTION_HEADER_SIZE,
            got: bytes.len(),
        });
    }
    Ok(Hash::new(sha3_256_multi(&[
        &bytes[SIGNATURE_OFFSET..SIGNATURE_OFFSET + SIGNATURE_R_SIZE],
        &bytes[SIGNER_OFFSET..VERSION_OFFSET],
        generation_bytes(generation_hash),
        &bytes[VERSION_OFFSET..],
    ])))
}

/// Hash identifying `inner` as embedded in `aggregate`.
pub fn unique_aggregate_hash(
    aggregate: &Transaction,
    inner: &Transaction,
    generation_hash: Option<&Hash>,
) -> Result<Hash, SdkError> {
    if aggregate.as_aggregate().is_none() {
        return Err(SdkError::NotAggregate {
            entity_type: aggregate.entity_type().value(),
        });
    }
    let embedded = inner.embedded_bytes()?;
    let signer_end = SIZE_SIZE + SIGNER_SIZE;
    let deadline = aggregate.header.deadline.to_network_timestamp().to_le_bytes();

    Ok(Hash::new(sha3_256_multi(&[
        &embedded[SIZE_SIZE..signer_end],
        generation_bytes(generation_hash),
        &embedded[signer_end..EMBEDDED_HEADER_SIZE],
        &deadline,
        &embedded[EMBEDDED_HEADER_SIZE..],
    ])))
}
