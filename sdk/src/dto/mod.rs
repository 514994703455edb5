//! # REST DTO Decoding
//!
//! Maps transaction JSON as returned by a node's REST API into typed
//! [`Transaction`] values. The binary form is never decoded; JSON is the
//! only input.
//!
//! ```text
//! [ { "meta": {...}, "transaction": { "type": 16724, "version": ..., ... } }, ... ]
//! ```
//!
//! [`map_transactions`] decodes each array element on the rayon pool. Every
//! element runs to completion, results land in input order, and the first
//! failure by index is reported next to whatever did decode.

pub mod bodies;
mod meta;
pub mod uint64;

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

pub use meta::{TransactionHeaderDto, TransactionMetaDto};
pub use uint64::Uint64Dto;

use bodies::{
    decode, AccountLinkDto, AccountPropertiesDto, AddExchangeOfferDto, AddressAliasDto,
    ExchangeOfferDto, HashLockDto, ModifyMetadataDto, ModifyMultisigDto, MosaicAliasDto,
    MosaicDefinitionDto, MosaicSupplyChangeDto, RegisterNamespaceDto, RemoveExchangeOfferDto,
    SecretLockDto, SecretProofDto, TransferDto,
};
use crate::crypto::hash::Hash;
use crate::error::SdkError;
use crate::transaction::{
    unique_aggregate_hash, AbstractTransaction, AggregateCosignature, AggregateTransaction, Body,
    EntityType, Transaction, TransactionBody, TransactionInfo,
};

/// Outcome of [`map_transactions`].
///
/// `transactions[i]` is `None` exactly when element `i` failed to decode.
#[derive(Debug, Default)]
pub struct DecodedBatch {
    pub transactions: Vec<Option<Transaction>>,
    /// The lowest-index failure, wrapped in [`SdkError::BatchElement`].
    pub first_error: Option<SdkError>,
}

impl DecodedBatch {
    pub fn is_complete(&self) -> bool {
        self.first_error.is_none()
    }

    /// Successfully decoded transactions, in input order.
    pub fn decoded(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().flatten()
    }

    /// All transactions, or the first error if any element failed.
    pub fn into_result(self) -> Result<Vec<Transaction>, SdkError> {
        match self.first_error {
            Some(err) => Err(err),
            None => Ok(self.transactions.into_iter().flatten().collect()),
        }
    }
}

/// Decodes a JSON array of transactions concurrently.
///
/// Fails outright only if `json` is not an array. `generation_hash` is used
/// for the unique aggregate hash of every inner transaction.
pub fn map_transactions(
    json: &str,
    generation_hash: Option<&Hash>,
) -> Result<DecodedBatch, SdkError> {
    let elements: Vec<Value> = serde_json::from_str(json)?;
    debug!(count = elements.len(), "Decoding transaction batch");

    let results: Vec<Result<Transaction, SdkError>> = elements
        .par_iter()
        .map(|element| decode_transaction(element, generation_hash))
        .collect();

    let mut batch = DecodedBatch {
        transactions: Vec::with_capacity(results.len()),
        first_error: None,
    };
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(tx) => batch.transactions.push(Some(tx)),
            Err(err) => {
                warn!(index, error = %err, "Failed to decode transaction");
                if batch.first_error.is_none() {
                    batch.first_error = Some(SdkError::BatchElement {
                        index,
                        source: Box::new(err),
                    });
                }
                batch.transactions.push(None);
            }
        }
    }

    debug!(
        decoded = batch.decoded().count(),
        failed = batch.transactions.iter().filter(|t| t.is_none()).count(),
        "Decoded transaction batch"
    );
    Ok(batch)
}

/// Decodes one element, either `{meta, transaction}` or a bare transaction
/// object.
pub fn decode_transaction(
    element: &Value,
    generation_hash: Option<&Hash>,
) -> Result<Transaction, SdkError> {
    let (meta, value) = match element.get("transaction") {
        Some(transaction) => (element.get("meta"), transaction),
        None => (None, element),
    };
    let meta = meta.map(TransactionMetaDto::deserialize).transpose()?;
    let header_dto = TransactionHeaderDto::deserialize(value)?;
    let entity_type = header_dto.entity_type()?;
    let header = header_dto.to_header(meta.as_ref())?;

    let body = match entity_type {
        EntityType::Transfer => decode::<TransferDto>(value)?,
        EntityType::ModifyMultisig => decode::<ModifyMultisigDto>(value)?,
        EntityType::RegisterNamespace => decode::<RegisterNamespaceDto>(value)?,
        EntityType::MosaicDefinition => decode::<MosaicDefinitionDto>(value)?,
        EntityType::MosaicSupplyChange => decode::<MosaicSupplyChangeDto>(value)?,
        EntityType::AddressAlias => decode::<AddressAliasDto>(value)?,
        EntityType::MosaicAlias => decode::<MosaicAliasDto>(value)?,
        EntityType::AccountLink => decode::<AccountLinkDto>(value)?,
        EntityType::HashLock => decode::<HashLockDto>(value)?,
        EntityType::SecretLock => decode::<SecretLockDto>(value)?,
        EntityType::SecretProof => decode::<SecretProofDto>(value)?,
        EntityType::AccountPropertiesAddress => decode::<AccountPropertiesDto<String>>(value)?,
        EntityType::AccountPropertiesMosaic => decode::<AccountPropertiesDto<Uint64Dto>>(value)?,
        EntityType::AccountPropertiesEntityType => decode::<AccountPropertiesDto<u16>>(value)?,
        EntityType::ModifyMetadataAddress
        | EntityType::ModifyMetadataMosaic
        | EntityType::ModifyMetadataNamespace => decode::<ModifyMetadataDto>(value)?,
        EntityType::AddExchangeOffer => decode::<AddExchangeOfferDto>(value)?,
        EntityType::ExchangeOffer => decode::<ExchangeOfferDto>(value)?,
        EntityType::RemoveExchangeOffer => decode::<RemoveExchangeOfferDto>(value)?,
        EntityType::AggregateComplete | EntityType::AggregateBonded => {
            return decode_aggregate(header, entity_type, value, generation_hash);
        }
    };

    if body.entity_type() != entity_type {
        return Err(SdkError::dto(
            "type",
            format!("declared {entity_type} but the body decodes as {}", body.entity_type()),
        ));
    }
    Ok(Transaction::new(header, body))
}

#[derive(Debug, Deserialize)]
struct AggregateDto {
    #[serde(default)]
    transactions: Vec<Value>,
    #[serde(default)]
    cosignatures: Vec<AggregateCosignature>,
}

fn decode_aggregate(
    header: AbstractTransaction,
    entity_type: EntityType,
    value: &Value,
    generation_hash: Option<&Hash>,
) -> Result<Transaction, SdkError> {
    let dto = AggregateDto::deserialize(value)?;
    let inner = dto
        .transactions
        .iter()
        .map(|element| {
            let inner = decode_transaction(element, generation_hash)?;
            if inner.entity_type().is_aggregate() {
                return Err(SdkError::dto("transactions", "aggregates cannot be nested"));
            }
            Ok(inner)
        })
        .collect::<Result<Vec<_>, SdkError>>()?;

    let mut aggregate = match entity_type {
        EntityType::AggregateBonded => AggregateTransaction::bonded(inner),
        _ => AggregateTransaction::complete(inner),
    };
    aggregate.cosignatures = dto.cosignatures;
    let mut tx = Transaction::new(header, aggregate);

    let hashes = match tx.as_aggregate() {
        Some(aggregate) => aggregate
            .inner
            .iter()
            .map(|inner| unique_aggregate_hash(&tx, inner, generation_hash))
            .collect::<Result<Vec<_>, SdkError>>()?,
        None => Vec::new(),
    };
    if let TransactionBody::Aggregate(aggregate) = &mut tx.body {
        for (inner, hash) in aggregate.inner.iter_mut().zip(hashes) {
            inner
                .header
                .info
                .get_or_insert_with(TransactionInfo::default)
                .unique_aggregate_hash = Some(hash);
        }
    }
    Ok(tx)
}
