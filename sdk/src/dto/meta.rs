//! The `meta` object and the header fields every transaction DTO carries.

use serde::Deserialize;

use super::uint64::Uint64Dto;
use crate::crypto::hash::Hash;
use crate::crypto::keys::{DerivationScheme, PublicKey, Signature};
use crate::error::SdkError;
use crate::model::{Deadline, PublicAccount};
use crate::transaction::{AbstractTransaction, EntityType, TransactionInfo, VersionField};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetaDto {
    #[serde(default)]
    pub height: Uint64Dto,
    pub index: Option<u32>,
    pub id: Option<String>,
    pub hash: Option<Hash>,
    pub merkle_component_hash: Option<Hash>,
    pub aggregate_hash: Option<Hash>,
    pub aggregate_id: Option<String>,
}

impl TransactionMetaDto {
    pub fn to_info(&self) -> TransactionInfo {
        TransactionInfo {
            height: self.height.to_u64(),
            index: self.index,
            id: self.id.clone(),
            hash: self.hash,
            merkle_component_hash: self.merkle_component_hash,
            aggregate_hash: self.aggregate_hash,
            aggregate_id: self.aggregate_id.clone(),
            unique_aggregate_hash: None,
        }
    }
}

/// Header fields. Embedded transactions have no signature, max fee or
/// deadline, so those default to empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHeaderDto {
    #[serde(rename = "type")]
    pub entity_type: u16,
    pub version: u32,
    pub signer: PublicKey,
    pub signature: Option<Signature>,
    #[serde(default)]
    pub max_fee: Uint64Dto,
    #[serde(default)]
    pub deadline: Uint64Dto,
}

impl TransactionHeaderDto {
    pub fn entity_type(&self) -> Result<EntityType, SdkError> {
        EntityType::from_u16(self.entity_type)
    }

    pub fn to_header(&self, meta: Option<&TransactionMetaDto>) -> Result<AbstractTransaction, SdkError> {
        let version = VersionField::parse(self.version)?;
        let account_version = match version.derivation_scheme {
            DerivationScheme::Ed25519Sha2 => 2,
            _ => 1,
        };

        let mut header = AbstractTransaction::new(
            version.network_type,
            version.version,
            Deadline::from_network_timestamp(self.deadline.to_u64()),
            self.max_fee.to_u64(),
        );
        header.derivation_scheme = version.derivation_scheme;
        header.signature = self.signature;
        header.signer = Some(PublicAccount::new(
            self.signer,
            version.network_type,
            account_version,
        ));
        header.info = meta.map(TransactionMetaDto::to_info);
        Ok(header)
    }
}
