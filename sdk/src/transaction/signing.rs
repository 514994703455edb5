//! Transaction signing and the cosignature protocol.
//!
//! Signing never touches the [`Transaction`] value. It encodes the
//! transaction under the signer's derivation scheme, signs
//!
//! ```text
//! generation_hash | bytes[100..]
//! ```
//!
//! then patches signature and signer into the placeholder regions of that
//! buffer and hashes the result. The buffer is owned by one call from
//! encode to hex, so nothing else can observe it half-patched.
//!
//! Cosignatories sign the aggregate's transaction hash. Their
//! `signer | signature` records are either appended to the payload at sign
//! time ([`sign_with_cosignatures`]) or produced detached
//! ([`CosignatureTransaction::sign`], [`cosign_signed_transaction`]).

use bytes::BufMut;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hashing::transaction_hash;
use super::types::EntityType;
use super::Transaction;
use crate::config::{COSIGNATURE_SIZE, SIGNATURE_OFFSET, SIGNER_OFFSET, VERSION_OFFSET};
use crate::crypto::hash::Hash;
use crate::crypto::keys::{DerivationScheme, PublicKey, Signature};
use crate::error::SdkError;
use crate::model::Account;

/// The immutable result of signing: what gets announced to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    pub entity_type: EntityType,
    /// Uppercase hex of the signed buffer.
    pub payload: String,
    pub hash: Hash,
}

impl SignedTransaction {
    pub fn payload_bytes(&self) -> Result<Vec<u8>, SdkError> {
        Ok(hex::decode(&self.payload)?)
    }
}

/// Bytes a transaction signature covers.
pub(crate) fn signing_bytes(bytes: &[u8], generation_hash: Option<&Hash>) -> Vec<u8> {
    let signed = &bytes[VERSION_OFFSET..];
    let mut message = Vec::with_capacity(32 + signed.len());
    if let Some(hash) = generation_hash {
        message.put_slice(hash.as_bytes());
    }
    message.put_slice(signed);
    message
}

/// Signs `tx` with `account`, merging the account's derivation scheme into
/// the version field.
pub fn sign_transaction(tx: &Transaction, account: &Account) -> Result<SignedTransaction, SdkError> {
    let scheme = account.derivation_scheme();
    let mut bytes = tx.encode(scheme)?;
    let generation_hash = account.generation_hash();

    let signature = account.sign_data(&signing_bytes(&bytes, generation_hash))?;
    bytes[SIGNATURE_OFFSET..SIGNER_OFFSET].copy_from_slice(signature.as_bytes());
    bytes[SIGNER_OFFSET..VERSION_OFFSET].copy_from_slice(account.public_key().as_bytes());

    let hash = transaction_hash(&bytes, generation_hash)?;
    debug!(
        entity_type = %tx.entity_type(),
        size = bytes.len(),
        scheme = %scheme,
        hash = %hash,
        "Signed transaction"
    );

    Ok(SignedTransaction {
        entity_type: tx.entity_type(),
        payload: hex::encode_upper(&bytes),
        hash,
    })
}

/// Signs an aggregate with `initiator` and appends one cosignature per
/// entry of `cosignatories`, in the order given.
pub fn sign_with_cosignatures(
    tx: &Transaction,
    initiator: &Account,
    cosignatories: &[&Account],
) -> Result<SignedTransaction, SdkError> {
    if tx.as_aggregate().is_none() {
        return Err(SdkError::NotAggregate {
            entity_type: tx.entity_type().value(),
        });
    }
    let signed = sign_transaction(tx, initiator)?;
    let mut bytes = signed.payload_bytes()?;
    bytes.reserve(cosignatories.len() * COSIGNATURE_SIZE);

    for cosignatory in cosignatories {
        let signature = cosignatory.sign_data(signed.hash.as_bytes())?;
        bytes.put_slice(cosignatory.public_key().as_bytes());
        bytes.put_slice(signature.as_bytes());
    }

    let size = u32::try_from(bytes.len()).map_err(|_| {
        SdkError::structural("cosignatures", format!("{} bytes overflows u32", bytes.len()))
    })?;
    bytes[..4].copy_from_slice(&size.to_le_bytes());

    debug!(
        hash = %signed.hash,
        cosignatures = cosignatories.len(),
        size = bytes.len(),
        "Appended cosignatures"
    );

    Ok(SignedTransaction {
        payload: hex::encode_upper(&bytes),
        ..signed
    })
}

// ---------------------------------------------------------------------------
// Detached cosignatures
// ---------------------------------------------------------------------------

/// A cosignature announced separately from the aggregate it approves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureSignedTransaction {
    pub parent_hash: Hash,
    pub signature: Signature,
    pub derivation_scheme: DerivationScheme,
    pub signer: PublicKey,
}

/// A bonded aggregate, already announced, waiting for this account's
/// approval.
#[derive(Debug, Clone)]
pub struct CosignatureTransaction {
    transaction: Transaction,
    parent_hash: Hash,
}

impl CosignatureTransaction {
    /// Wraps `transaction`, which must be an aggregate bonded transaction
    /// whose hash is known from its transaction info.
    pub fn new(transaction: Transaction) -> Result<Self, SdkError> {
        if transaction.entity_type() != EntityType::AggregateBonded {
            return Err(SdkError::NotBondedAggregate {
                entity_type: transaction.entity_type().value(),
            });
        }
        let parent_hash = *transaction
            .header
            .hash()
            .ok_or(SdkError::MissingTransactionHash)?;
        Ok(Self {
            transaction,
            parent_hash,
        })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn parent_hash(&self) -> &Hash {
        &self.parent_hash
    }

    pub fn sign(&self, account: &Account) -> Result<CosignatureSignedTransaction, SdkError> {
        cosign_hash(self.parent_hash, account)
    }
}

/// Cosigns a bonded aggregate straight from its signed form.
pub fn cosign_signed_transaction(
    signed: &SignedTransaction,
    account: &Account,
) -> Result<CosignatureSignedTransaction, SdkError> {
    if signed.entity_type != EntityType::AggregateBonded {
        return Err(SdkError::NotBondedAggregate {
            entity_type: signed.entity_type.value(),
        });
    }
    cosign_hash(signed.hash, account)
}

/// Cosigns an aggregate bonded hash announced elsewhere, typically a partial
/// transaction listed by a node.
pub fn cosign_hash(
    parent_hash: Hash,
    account: &Account,
) -> Result<CosignatureSignedTransaction, SdkError> {
    let signature = account.sign_data(parent_hash.as_bytes())?;
    debug!(parent_hash = %parent_hash, signer = %account.public_key(), "Cosigned aggregate");
    Ok(CosignatureSignedTransaction {
        parent_hash,
        signature,
        derivation_scheme: account.derivation_scheme(),
        signer: account.public_key(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys;
    use crate::model::{Deadline, Message, Mosaic, MosaicId, NetworkType};
    use crate::transaction::{
        AbstractTransaction, AggregateTransaction, TransactionInfo, TransferTransaction,
    };

    const PRIVATE_KEY: &str = "787225aaff3d2c71f4ffa32d4f19ec4922f3cd869747f267378f81f8e3fcb12d";

    fn account(version: u8, generation_hash: Option<Hash>) -> Account {
        Account::from_private_key(PRIVATE_KEY, NetworkType::MijinTest, version, generation_hash)
            .unwrap()
    }

    fn header(version: u16) -> AbstractTransaction {
        AbstractTransaction::new(
            NetworkType::MijinTest,
            version,
            Deadline::from_network_timestamp(1_000_000),
            0,
        )
    }

    fn transfer(signer: &Account) -> Transaction {
        let body = TransferTransaction::new(
            signer.address(),
            vec![Mosaic::new(MosaicId::new(0x0DC6_7FBE_1CAD_29E3).unwrap(), 10)],
            Message::plain("test"),
        );
        Transaction::new(header(3), body).to_aggregate(*signer.public_account())
    }

    fn bonded(signer: &Account) -> Transaction {
        Transaction::new(header(2), AggregateTransaction::bonded(vec![transfer(signer)]))
    }

    #[test]
    fn signed_payload_carries_scheme_signer_and_valid_signature() {
        let gen = Hash::new([0x11; 32]);
        for version in [1u8, 2] {
            let signer = account(version, Some(gen));
            let tx = transfer(&signer);
            let signed = sign_transaction(&tx, &signer).unwrap();
            let bytes = signed.payload_bytes().unwrap();

            assert_eq!(bytes.len(), tx.size());
            assert_eq!(bytes[102], signer.derivation_scheme().as_u8());
            assert_eq!(&bytes[68..100], signer.public_key().as_bytes());

            let signature = Signature::from_slice(&bytes[4..68]).unwrap();
            keys::verify(
                &signer.public_key(),
                signer.derivation_scheme(),
                &signing_bytes(&bytes, Some(&gen)),
                &signature,
            )
            .unwrap();
            assert_eq!(signed.hash, transaction_hash(&bytes, Some(&gen)).unwrap());
        }
    }

    #[test]
    fn signing_is_deterministic_and_payload_is_uppercase() {
        let signer = account(1, None);
        let tx = transfer(&signer);
        let a = sign_transaction(&tx, &signer).unwrap();
        let b = sign_transaction(&tx, &signer).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.payload, a.payload.to_uppercase());
    }

    #[test]
    fn generation_hash_changes_signature_and_hash() {
        let tx = transfer(&account(1, None));
        let a = sign_transaction(&tx, &account(1, Some(Hash::new([1; 32])))).unwrap();
        let b = sign_transaction(&tx, &account(1, Some(Hash::new([2; 32])))).unwrap();
        assert_ne!(a.payload, b.payload);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn cosignatures_are_appended_in_order() {
        let initiator = account(1, None);
        let first = Account::generate(NetworkType::MijinTest, 1, None).unwrap();
        let second = Account::generate(NetworkType::MijinTest, 2, None).unwrap();
        let tx = bonded(&initiator);

        let plain = sign_transaction(&tx, &initiator).unwrap();
        let cosigned = sign_with_cosignatures(&tx, &initiator, &[&first, &second]).unwrap();
        let base = plain.payload_bytes().unwrap();
        let bytes = cosigned.payload_bytes().unwrap();

        assert_eq!(cosigned.hash, plain.hash);
        assert_eq!(bytes.len(), base.len() + 2 * COSIGNATURE_SIZE);
        assert_eq!(
            u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize,
            bytes.len()
        );
        assert_eq!(&bytes[4..base.len()], &base[4..]);

        let tail = &bytes[base.len()..];
        assert_eq!(&tail[..32], first.public_key().as_bytes());
        assert_eq!(&tail[96..128], second.public_key().as_bytes());
        let signature = Signature::from_slice(&tail[128..192]).unwrap();
        assert!(second
            .public_account()
            .verify_signature(plain.hash.as_bytes(), &signature)
            .is_ok());
    }

    #[test]
    fn cosigning_requires_an_aggregate() {
        let signer = account(1, None);
        let err = sign_with_cosignatures(&transfer(&signer), &signer, &[]).unwrap_err();
        assert!(matches!(err, SdkError::NotAggregate { entity_type: 0x4154 }));
    }

    #[test]
    fn detached_cosignature_over_signed_bonded() {
        let initiator = account(1, None);
        let cosigner = account(2, None);
        let signed = sign_transaction(&bonded(&initiator), &initiator).unwrap();

        let cosignature = cosign_signed_transaction(&signed, &cosigner).unwrap();
        assert_eq!(cosignature.parent_hash, signed.hash);
        assert_eq!(cosignature.derivation_scheme, DerivationScheme::Ed25519Sha2);
        assert!(keys::verify(
            &cosignature.signer,
            cosignature.derivation_scheme,
            signed.hash.as_bytes(),
            &cosignature.signature
        )
        .is_ok());

        let complete = Transaction::new(
            header(2),
            AggregateTransaction::complete(vec![transfer(&initiator)]),
        );
        let signed = sign_transaction(&complete, &initiator).unwrap();
        assert!(matches!(
            cosign_signed_transaction(&signed, &cosigner),
            Err(SdkError::NotBondedAggregate { entity_type: 0x4141 })
        ));
    }

    #[test]
    fn cosignature_transaction_needs_known_hash() {
        let initiator = account(1, None);
        let mut tx = bonded(&initiator);
        assert!(matches!(
            CosignatureTransaction::new(tx.clone()),
            Err(SdkError::MissingTransactionHash)
        ));

        let hash = Hash::new([0x42; 32]);
        tx.header.info = Some(TransactionInfo {
            hash: Some(hash),
            ..Default::default()
        });
        let cosignature = CosignatureTransaction::new(tx)
            .unwrap()
            .sign(&initiator)
            .unwrap();
        assert_eq!(cosignature.parent_hash, hash);
        assert_eq!(cosignature.signer, initiator.public_key());

        assert!(matches!(
            CosignatureTransaction::new(transfer(&initiator)),
            Err(SdkError::NotBondedAggregate { .. })
        ));
    }
}
