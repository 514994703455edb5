//! Signature checks on signed payloads.
//!
//! [`verify_signed_transaction`] re-derives everything a node would from the
//! hex payload alone: the size field, the entity type, the derivation scheme
//! in the version field, the transaction hash and the signer's signature.
//! Checks run cheapest first.
//!
//! Appended cosignatures do not record their signer's derivation scheme, so
//! each one is accepted if it verifies under either scheme.

use super::aggregate::AggregateCosignature;
use super::hashing::transaction_hash;
use super::header::VersionField;
use super::signing::{signing_bytes, CosignatureSignedTransaction, SignedTransaction};
use super::read_u32_le;
use crate::config::{
    AGGREGATE_HEADER_SIZE, COSIGNATURE_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_OFFSET, SIGNER_OFFSET,
    TRANSACTION_HEADER_SIZE, TYPE_OFFSET, VERSION_OFFSET,
};
use crate::crypto::hash::Hash;
use crate::crypto::keys::{self, DerivationScheme, PublicKey, Signature};
use crate::error::SdkError;

/// Verifies the signer's signature and the hash of `signed`, plus every
/// cosignature appended to an aggregate payload.
pub fn verify_signed_transaction(
    signed: &SignedTransaction,
    generation_hash: Option<&Hash>,
) -> Result<(), SdkError> {
    let bytes = signed.payload_bytes()?;
    if bytes.len() < TRANSACTION_HEADER_SIZE {
        return Err(SdkError::InvalidLength {
            what: "transaction payload",
            expected: TRANSACTION_HEADER_SIZE,
            got: bytes.len(),
        });
    }

    let declared = read_u32_le(&bytes, 0).map_or(0, |size| size as usize);
    if declared != bytes.len() {
        return Err(SdkError::SizeMismatch {
            entity_type: signed.entity_type.value(),
            declared,
            actual: bytes.len(),
        });
    }

    let entity_type = u16::from_le_bytes([bytes[TYPE_OFFSET], bytes[TYPE_OFFSET + 1]]);
    if entity_type != signed.entity_type.value() {
        return Err(SdkError::structural(
            "type",
            format!(
                "payload has type 0x{entity_type:04X} but is labelled {}",
                signed.entity_type
            ),
        ));
    }

    let version = read_u32_le(&bytes, VERSION_OFFSET)
        .ok_or_else(|| SdkError::structural("version", "missing"))
        .and_then(VersionField::parse)?;

    let signed_len = signed_region_len(&bytes, signed)?;
    let body = &bytes[..signed_len];

    let hash = transaction_hash(body, generation_hash)?;
    if hash != signed.hash {
        return Err(SdkError::VerificationFailed);
    }

    let signature = Signature::from_slice(&body[SIGNATURE_OFFSET..SIGNER_OFFSET])?;
    let signer = PublicKey::from_slice(&body[SIGNER_OFFSET..VERSION_OFFSET])?;
    keys::verify(
        &signer,
        version.derivation_scheme,
        &signing_bytes(body, generation_hash),
        &signature,
    )?;

    for cosignature in parse_cosignatures(&bytes[signed_len..])? {
        verify_appended(&hash, &cosignature)?;
    }
    Ok(())
}

/// Verifies a detached cosignature over its parent hash.
pub fn verify_cosignature(cosignature: &CosignatureSignedTransaction) -> Result<(), SdkError> {
    keys::verify(
        &cosignature.signer,
        cosignature.derivation_scheme,
        cosignature.parent_hash.as_bytes(),
        &cosignature.signature,
    )
}

/// Cosignatures appended after the signed part of an aggregate payload.
/// Empty for every other entity type.
pub fn extract_cosignatures(
    signed: &SignedTransaction,
) -> Result<Vec<AggregateCosignature>, SdkError> {
    let bytes = signed.payload_bytes()?;
    let signed_len = signed_region_len(&bytes, signed)?;
    parse_cosignatures(&bytes[signed_len..])
}

/// Length of the part covered by the signer's signature: the whole payload,
/// or for aggregates the header, payload size and embedded transactions.
fn signed_region_len(bytes: &[u8], signed: &SignedTransaction) -> Result<usize, SdkError> {
    if !signed.entity_type.is_aggregate() {
        return Ok(bytes.len());
    }
    let payload_size = read_u32_le(bytes, TRANSACTION_HEADER_SIZE).ok_or(
        SdkError::InvalidLength {
            what: "aggregate payload",
            expected: AGGREGATE_HEADER_SIZE,
            got: bytes.len(),
        },
    )?;
    let end = AGGREGATE_HEADER_SIZE + payload_size as usize;
    if end > bytes.len() || (bytes.len() - end) % COSIGNATURE_SIZE != 0 {
        return Err(SdkError::structural(
            "cosignatures",
            format!(
                "{} trailing bytes is not a whole number of cosignatures",
                bytes.len().saturating_sub(end)
            ),
        ));
    }
    Ok(end)
}

fn parse_cosignatures(tail: &[u8]) -> Result<Vec<AggregateCosignature>, SdkError> {
    tail.chunks_exact(COSIGNATURE_SIZE)
        .map(|record| {
            Ok(AggregateCosignature {
                signer: PublicKey::from_slice(&record[..PUBLIC_KEY_SIZE])?,
                signature: Signature::from_slice(&record[PUBLIC_KEY_SIZE..])?,
            })
        })
        .collect()
}

fn verify_appended(hash: &Hash, cosignature: &AggregateCosignature) -> Result<(), SdkError> {
    let verified = [DerivationScheme::Ed25519Sha3, DerivationScheme::Ed25519Sha2]
        .into_iter()
        .any(|scheme| {
            keys::verify(
                &cosignature.signer,
                scheme,
                hash.as_bytes(),
                &cosignature.signature,
            )
            .is_ok()
        });
    if verified {
        Ok(())
    } else {
        Err(SdkError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, Deadline, Message, NetworkType};
    use crate::transaction::signing::{
        cosign_signed_transaction, sign_transaction, sign_with_cosignatures,
    };
    use crate::transaction::{
        AbstractTransaction, AggregateTransaction, Transaction, TransferTransaction,
    };

    fn account(version: u8) -> Account {
        Account::generate(NetworkType::Mijin, version, Some(Hash::new([9; 32]))).unwrap()
    }

    fn transfer(signer: &Account) -> Transaction {
        let header = AbstractTransaction::new(
            NetworkType::Mijin,
            3,
            Deadline::from_network_timestamp(77),
            0,
        );
        let body = TransferTransaction::new(signer.address(), vec![], Message::plain("verify"));
        Transaction::new(header, body).to_aggregate(*signer.public_account())
    }

    fn bonded(signer: &Account) -> Transaction {
        let header = AbstractTransaction::new(
            NetworkType::Mijin,
            2,
            Deadline::from_network_timestamp(77),
            0,
        );
        Transaction::new(header, AggregateTransaction::bonded(vec![transfer(signer)]))
    }

    fn tamper(signed: &SignedTransaction, index: usize) -> SignedTransaction {
        let mut bytes = signed.payload_bytes().unwrap();
        bytes[index] ^= 0x01;
        SignedTransaction {
            payload: hex::encode_upper(bytes),
            ..signed.clone()
        }
    }

    #[test]
    fn valid_signatures_verify_under_both_schemes() {
        for version in [1, 2] {
            let signer = account(version);
            let signed = sign_transaction(&transfer(&signer), &signer).unwrap();
            verify_signed_transaction(&signed, signer.generation_hash()).unwrap();
        }
    }

    #[test]
    fn wrong_generation_hash_fails() {
        let signer = account(1);
        let signed = sign_transaction(&transfer(&signer), &signer).unwrap();
        assert!(verify_signed_transaction(&signed, None).is_err());
        assert!(verify_signed_transaction(&signed, Some(&Hash::new([8; 32]))).is_err());
    }

    #[test]
    fn tampered_body_fails() {
        let signer = account(1);
        let signed = sign_transaction(&transfer(&signer), &signer).unwrap();
        let last = signed.payload.len() / 2 - 1;
        assert!(matches!(
            verify_signed_transaction(&tamper(&signed, last), signer.generation_hash()),
            Err(SdkError::VerificationFailed)
        ));
    }

    #[test]
    fn tampered_size_field_fails() {
        let signer = account(1);
        let signed = sign_transaction(&transfer(&signer), &signer).unwrap();
        assert!(matches!(
            verify_signed_transaction(&tamper(&signed, 0), signer.generation_hash()),
            Err(SdkError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn appended_cosignatures_verify() {
        let initiator = account(1);
        let cosigners = [account(1), account(2)];
        let signed = sign_with_cosignatures(
            &bonded(&initiator),
            &initiator,
            &[&cosigners[0], &cosigners[1]],
        )
        .unwrap();

        verify_signed_transaction(&signed, initiator.generation_hash()).unwrap();
        let cosignatures = extract_cosignatures(&signed).unwrap();
        assert_eq!(cosignatures.len(), 2);
        assert_eq!(cosignatures[1].signer, cosigners[1].public_key());

        let last = signed.payload.len() / 2 - 1;
        assert!(matches!(
            verify_signed_transaction(&tamper(&signed, last), initiator.generation_hash()),
            Err(SdkError::VerificationFailed)
        ));
    }

    #[test]
    fn detached_cosignature_verifies() {
        let initiator = account(1);
        let signed = sign_transaction(&bonded(&initiator), &initiator).unwrap();
        let mut cosignature = cosign_signed_transaction(&signed, &account(2)).unwrap();
        verify_cosignature(&cosignature).unwrap();

        cosignature.parent_hash = Hash::new([0; 32]);
        assert!(verify_cosignature(&cosignature).is_err());
    }

    #[test]
    fn non_aggregates_have_no_cosignatures() {
        let signer = account(1);
        let signed = sign_transaction(&transfer(&signer), &signer).unwrap();
        assert!(extract_cosignatures(&signed).unwrap().is_empty());
    }
}
