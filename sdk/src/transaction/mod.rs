//! # Transaction Module
//!
//! Typed transactions, their canonical binary encoding, and the signing,
//! hashing and aggregate-composition pipeline built on top of it.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        EntityType catalogue and shared small enums
//! header.rs       AbstractTransaction header and TransactionInfo
//! schema.rs       Field descriptors and the layout walker
//! schemas.rs      One body schema per entity type
//! transfer.rs … exchange.rs, aggregate.rs
//!                 One body struct per variant, each implementing `Body`
//! builder.rs      Fluent TransactionBuilder with fee strategies
//! signing.rs      Signing, cosigning and the signed artifacts
//! hashing.rs      Transaction hash and unique aggregate hash
//! verification.rs Signature checks on signed payloads
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: assemble a [`Transaction`] from a header and a
//!    [`TransactionBody`], usually through [`TransactionBuilder`].
//! 2. **Encode**: [`Transaction::bytes`] validates the body, writes the
//!    122-byte header with zeroed signature and signer, appends the body, and
//!    checks the result against both `size()` and the schema.
//! 3. **Sign**: [`sign_transaction`] patches signature and signer into that
//!    buffer and hashes it into a [`SignedTransaction`].
//! 4. **Cosign** (bonded aggregates): other accounts sign the hash, either
//!    appended directly ([`sign_with_cosignatures`]) or as detached
//!    [`CosignatureSignedTransaction`]s.

pub mod aggregate;
pub mod builder;
pub mod exchange;
pub mod hashing;
pub mod header;
pub mod link;
pub mod lock;
pub mod metadata;
pub mod mosaic;
pub mod multisig;
pub mod namespace;
pub mod properties;
pub mod schema;
pub mod schemas;
pub mod signing;
pub mod transfer;
pub mod types;
pub mod verification;

use bytes::BufMut;

pub use aggregate::{AggregateCosignature, AggregateKind, AggregateTransaction};
pub use builder::TransactionBuilder;
pub use exchange::{
    AddExchangeOfferTransaction, AddOffer, ExchangeConfirmation, ExchangeOfferTransaction,
    OfferType, RemoveExchangeOfferTransaction, RemoveOffer,
};
pub use hashing::{transaction_hash, unique_aggregate_hash};
pub use header::{AbstractTransaction, TransactionInfo, VersionField};
pub use link::{AccountLinkTransaction, AddressAliasTransaction, MosaicAliasTransaction};
pub use lock::{HashLockTransaction, HashType, SecretLockTransaction, SecretProofTransaction};
pub use metadata::{MetadataModification, MetadataTarget, ModifyMetadataTransaction};
pub use mosaic::{MosaicDefinitionTransaction, MosaicSupplyChangeTransaction};
pub use multisig::{ModifyMultisigAccountTransaction, MultisigCosignatoryModification};
pub use namespace::{NamespaceRegistration, RegisterNamespaceTransaction};
pub use properties::{
    AccountPropertiesTransaction, PropertyModification, PropertyType, PropertyValue,
};
pub use schema::{Layout, LayoutError, Schema};
pub use signing::{
    cosign_hash, cosign_signed_transaction, sign_transaction, sign_with_cosignatures,
    CosignatureSignedTransaction, CosignatureTransaction, SignedTransaction,
};
pub use transfer::TransferTransaction;
pub use types::{EntityType, LinkAction, ModificationType};
pub use verification::{verify_cosignature, verify_signed_transaction};

use crate::config::{
    EMBEDDED_HEADER_SIZE, EMBEDDING_STRIPPED_SIZE, SIGNATURE_SIZE, SIGNER_SIZE,
    TRANSACTION_HEADER_SIZE, TYPE_OFFSET, TYPE_SIZE, VERSION_OFFSET,
};
use crate::crypto::keys::DerivationScheme;
use crate::error::SdkError;
use crate::model::{Address, AssetId, PublicAccount};

// ---------------------------------------------------------------------------
// Body capability
// ---------------------------------------------------------------------------

/// What every transaction body provides to the shared encoder.
///
/// `write_body` must append exactly `body_size()` bytes; the encoder checks
/// this on every call and fails with [`SdkError::SizeMismatch`] otherwise.
pub trait Body {
    fn entity_type(&self) -> EntityType;

    /// Bytes appended after the header.
    fn body_size(&self) -> usize;

    /// Structural checks run before any byte is written.
    fn validate(&self) -> Result<(), SdkError>;

    fn write_body(&self, buf: &mut Vec<u8>);
}

/// The closed set of transaction bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionBody {
    Transfer(TransferTransaction),
    ModifyMultisig(ModifyMultisigAccountTransaction),
    RegisterNamespace(RegisterNamespaceTransaction),
    MosaicDefinition(MosaicDefinitionTransaction),
    MosaicSupplyChange(MosaicSupplyChangeTransaction),
    AddressAlias(AddressAliasTransaction),
    MosaicAlias(MosaicAliasTransaction),
    AccountLink(AccountLinkTransaction),
    HashLock(HashLockTransaction),
    SecretLock(SecretLockTransaction),
    SecretProof(SecretProofTransaction),
    AccountPropertiesAddress(AccountPropertiesTransaction<Address>),
    AccountPropertiesMosaic(AccountPropertiesTransaction<AssetId>),
    AccountPropertiesEntityType(AccountPropertiesTransaction<EntityType>),
    ModifyMetadata(ModifyMetadataTransaction),
    AddExchangeOffer(AddExchangeOfferTransaction),
    ExchangeOffer(ExchangeOfferTransaction),
    RemoveExchangeOffer(RemoveExchangeOfferTransaction),
    Aggregate(AggregateTransaction),
}

macro_rules! dispatch {
    ($body:expr, $inner:ident => $e:expr) => {
        match $body {
            TransactionBody::Transfer($inner) => $e,
            TransactionBody::ModifyMultisig($inner) => $e,
            TransactionBody::RegisterNamespace($inner) => $e,
            TransactionBody::MosaicDefinition($inner) => $e,
            TransactionBody::MosaicSupplyChange($inner) => $e,
            TransactionBody::AddressAlias($inner) => $e,
            TransactionBody::MosaicAlias($inner) => $e,
            TransactionBody::AccountLink($inner) => $e,
            TransactionBody::HashLock($inner) => $e,
            TransactionBody::SecretLock($inner) => $e,
            TransactionBody::SecretProof($inner) => $e,
            TransactionBody::AccountPropertiesAddress($inner) => $e,
            TransactionBody::AccountPropertiesMosaic($inner) => $e,
            TransactionBody::AccountPropertiesEntityType($inner) => $e,
            TransactionBody::ModifyMetadata($inner) => $e,
            TransactionBody::AddExchangeOffer($inner) => $e,
            TransactionBody::ExchangeOffer($inner) => $e,
            TransactionBody::RemoveExchangeOffer($inner) => $e,
            TransactionBody::Aggregate($inner) => $e,
        }
    };
}

impl Body for TransactionBody {
    fn entity_type(&self) -> EntityType {
        dispatch!(self, b => b.entity_type())
    }

    fn body_size(&self) -> usize {
        dispatch!(self, b => b.body_size())
    }

    fn validate(&self) -> Result<(), SdkError> {
        dispatch!(self, b => b.validate())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        dispatch!(self, b => b.write_body(buf))
    }
}

macro_rules! impl_from_body {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for TransactionBody {
                fn from(body: $ty) -> Self {
                    TransactionBody::$variant(body)
                }
            }
        )*
    };
}

impl_from_body!(
    Transfer(TransferTransaction),
    ModifyMultisig(ModifyMultisigAccountTransaction),
    RegisterNamespace(RegisterNamespaceTransaction),
    MosaicDefinition(MosaicDefinitionTransaction),
    MosaicSupplyChange(MosaicSupplyChangeTransaction),
    AddressAlias(AddressAliasTransaction),
    MosaicAlias(MosaicAliasTransaction),
    AccountLink(AccountLinkTransaction),
    HashLock(HashLockTransaction),
    SecretLock(SecretLockTransaction),
    SecretProof(SecretProofTransaction),
    AccountPropertiesAddress(AccountPropertiesTransaction<Address>),
    AccountPropertiesMosaic(AccountPropertiesTransaction<AssetId>),
    AccountPropertiesEntityType(AccountPropertiesTransaction<EntityType>),
    ModifyMetadata(ModifyMetadataTransaction),
    AddExchangeOffer(AddExchangeOfferTransaction),
    ExchangeOffer(ExchangeOfferTransaction),
    RemoveExchangeOffer(RemoveExchangeOfferTransaction),
    Aggregate(AggregateTransaction),
);

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A header plus one body variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub header: AbstractTransaction,
    pub body: TransactionBody,
}

impl Transaction {
    pub fn new(header: AbstractTransaction, body: impl Into<TransactionBody>) -> Self {
        Self {
            header,
            body: body.into(),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.body.entity_type()
    }

    /// Encoded length of [`Transaction::bytes`].
    pub fn size(&self) -> usize {
        TRANSACTION_HEADER_SIZE + self.body.body_size()
    }

    /// Encoded length of [`Transaction::embedded_bytes`].
    pub fn embedded_size(&self) -> usize {
        EMBEDDED_HEADER_SIZE + self.body.body_size()
    }

    pub fn schema(&self) -> &'static Schema {
        schemas::schema_for(self.entity_type())
    }

    pub fn as_aggregate(&self) -> Option<&AggregateTransaction> {
        match &self.body {
            TransactionBody::Aggregate(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    /// Sets the signer, which is what embedding in an aggregate requires.
    pub fn to_aggregate(mut self, signer: PublicAccount) -> Self {
        self.header.signer = Some(signer);
        self
    }

    /// Canonical bytes with zeroed signature and signer.
    pub fn bytes(&self) -> Result<Vec<u8>, SdkError> {
        self.encode(self.header.derivation_scheme)
    }

    /// Canonical bytes with `scheme` merged into the version field.
    pub(crate) fn encode(&self, scheme: DerivationScheme) -> Result<Vec<u8>, SdkError> {
        self.body.validate()?;
        let size = self.size();
        let declared = u32::try_from(size)
            .map_err(|_| SdkError::structural("size", format!("{size} bytes overflows u32")))?;

        let mut buf = Vec::with_capacity(size);
        buf.put_u32_le(declared);
        buf.put_slice(&[0u8; SIGNATURE_SIZE]);
        buf.put_slice(&[0u8; SIGNER_SIZE]);
        buf.put_u32_le(self.header.version_field(scheme));
        buf.put_u16_le(self.entity_type().value());
        buf.put_u64_le(self.header.max_fee);
        buf.put_u64_le(self.header.deadline.to_network_timestamp());
        self.body.write_body(&mut buf);

        self.check_encoded(&buf, size)?;
        self.schema().layout(&buf)?;
        if let TransactionBody::Aggregate(aggregate) = &self.body {
            aggregate.check_embedded(&buf[TRANSACTION_HEADER_SIZE..])?;
        }
        Ok(buf)
    }

    /// The form used inside an aggregate: signature, max fee and deadline are
    /// stripped from [`Transaction::bytes`] and the signer is filled in.
    ///
    /// ```text
    /// size:4 | signer:32 | version:4 | type:2 | body
    /// ```
    pub fn embedded_bytes(&self) -> Result<Vec<u8>, SdkError> {
        let signer = self.header.signer.ok_or(SdkError::MissingSigner {
            entity_type: self.entity_type().value(),
        })?;
        let full = self.bytes()?;
        let size = full.len() - EMBEDDING_STRIPPED_SIZE;

        let mut buf = Vec::with_capacity(size);
        buf.put_u32_le(size as u32);
        buf.put_slice(signer.public_key.as_bytes());
        buf.put_slice(&full[VERSION_OFFSET..TYPE_OFFSET + TYPE_SIZE]);
        buf.put_slice(&full[TRANSACTION_HEADER_SIZE..]);

        self.schema().embedded_layout(&buf)?;
        Ok(buf)
    }

    /// Writes the embedded form straight into an aggregate buffer. The
    /// aggregate has already validated the body and the signer.
    pub(crate) fn write_embedded(&self, buf: &mut Vec<u8>) {
        let signer = self
            .header
            .signer
            .map(|s| *s.public_key.as_bytes())
            .unwrap_or([0u8; SIGNER_SIZE]);
        buf.put_u32_le(self.embedded_size() as u32);
        buf.put_slice(&signer);
        buf.put_u32_le(self.header.version_field(self.header.derivation_scheme));
        buf.put_u16_le(self.entity_type().value());
        self.body.write_body(buf);
    }

    fn check_encoded(&self, buf: &[u8], declared: usize) -> Result<(), SdkError> {
        if buf.len() != declared {
            return Err(SdkError::SizeMismatch {
                entity_type: self.entity_type().value(),
                declared,
                actual: buf.len(),
            });
        }
        Ok(())
    }
}

/// Little-endian `u32` at `offset`.
pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> Option<u32> {
    let slice = bytes.get(offset..offset + 4)?;
    let mut word = [0u8; 4];
    word.copy_from_slice(slice);
    Some(u32::from_le_bytes(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::PublicKey;
    use crate::model::{Deadline, Message, NamespaceId, NetworkType};

    fn transfer() -> Transaction {
        let header = AbstractTransaction::new(
            NetworkType::MijinTest,
            3,
            Deadline::from_network_timestamp(0x0102_0304),
            7,
        );
        Transaction::new(
            header,
            TransferTransaction::new(
                NamespaceId::new(0x8000_0000_0000_00AA),
                vec![],
                Message::plain("ab"),
            ),
        )
    }

    #[test]
    fn header_fields_land_at_fixed_offsets() {
        let tx = transfer();
        let bytes = tx.bytes().unwrap();
        let layout = tx.schema().layout(&bytes).unwrap();

        assert_eq!(layout.get("signature"), Some(4..68));
        assert_eq!(layout.get("signer"), Some(68..100));
        assert!(bytes[4..100].iter().all(|b| *b == 0));
        assert_eq!(read_u32_le(&bytes, VERSION_OFFSET), Some(0x9000_0003));
        assert_eq!(&bytes[TYPE_OFFSET..TYPE_OFFSET + 2], &[0x54, 0x41]);
        assert_eq!(&bytes[106..114], &7u64.to_le_bytes());
        assert_eq!(&bytes[114..122], &0x0102_0304u64.to_le_bytes());
    }

    #[test]
    fn encode_merges_the_requested_scheme() {
        let bytes = transfer().encode(DerivationScheme::Ed25519Sha2).unwrap();
        assert_eq!(read_u32_le(&bytes, VERSION_OFFSET), Some(0x9002_0003));
    }

    #[test]
    fn embedded_bytes_need_a_signer() {
        assert!(matches!(
            transfer().embedded_bytes(),
            Err(SdkError::MissingSigner { entity_type: 0x4154 })
        ));

        let signer = PublicAccount::new(PublicKey::new([5; 32]), NetworkType::MijinTest, 1);
        let tx = transfer().to_aggregate(signer);
        let embedded = tx.embedded_bytes().unwrap();
        assert_eq!(embedded.len(), tx.embedded_size());
        assert_eq!(&embedded[4..36], &[5; 32]);
        assert_eq!(&embedded[42..], &tx.bytes().unwrap()[TRANSACTION_HEADER_SIZE..]);

        let mut written = Vec::new();
        tx.write_embedded(&mut written);
        assert_eq!(written, embedded);
    }

    #[test]
    fn invalid_body_never_encodes() {
        let header = transfer().header;
        let empty = Transaction::new(
            header,
            ModifyMultisigAccountTransaction {
                min_approval_delta: 0,
                min_removal_delta: 0,
                modifications: vec![],
            },
        );
        assert_eq!(
            empty.bytes().unwrap_err().kind(),
            crate::error::ErrorKind::Structural
        );
    }
}
