//! Per-type body DTOs.
//!
//! Each DTO deserializes the type-specific fields of one transaction object
//! (unknown fields, including the header, are ignored) and converts into a
//! [`TransactionBody`]. Aggregates are decoded in [`super`] since they nest
//! whole transactions.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::uint64::Uint64Dto;
use crate::crypto::hash::Hash;
use crate::crypto::keys::PublicKey;
use crate::error::SdkError;
use crate::model::mosaic::{FLAG_SUPPLY_MUTABLE, FLAG_TRANSFERABLE};
use crate::model::{
    Address, AssetId, Message, MessageType, Mosaic, MosaicId, MosaicNonce, MosaicProperties,
    MosaicSupplyType, NamespaceId, NamespaceType, Recipient,
};
use crate::transaction::{
    AccountLinkTransaction, AccountPropertiesTransaction, AddExchangeOfferTransaction, AddOffer,
    AddressAliasTransaction, ExchangeConfirmation, ExchangeOfferTransaction, HashLockTransaction,
    HashType, LinkAction, MetadataModification, MetadataTarget, ModificationType,
    ModifyMetadataTransaction, ModifyMultisigAccountTransaction, MosaicAliasTransaction,
    MosaicDefinitionTransaction, MosaicSupplyChangeTransaction, MultisigCosignatoryModification,
    NamespaceRegistration, OfferType, PropertyModification, PropertyType,
    RegisterNamespaceTransaction, RemoveExchangeOfferTransaction, RemoveOffer,
    SecretLockTransaction, SecretProofTransaction, TransactionBody, TransferTransaction,
};
use crate::transaction::EntityType;

/// A DTO that converts into one body variant.
pub(crate) trait BodyDto: DeserializeOwned {
    fn into_body(self) -> Result<TransactionBody, SdkError>;
}

pub(crate) fn decode<D: BodyDto>(value: &Value) -> Result<TransactionBody, SdkError> {
    D::deserialize(value)?.into_body()
}

/// Accepts the 50-character hex form the REST API returns and the
/// 40-character base32 form.
fn parse_address(s: &str) -> Result<Address, SdkError> {
    if s.len() == 50 {
        Address::from_hex(s)
    } else {
        Address::from_raw(s)
    }
}

fn parse_recipient(s: &str) -> Result<Recipient, SdkError> {
    if s.len() == 50 {
        Recipient::from_hex(s)
    } else {
        Address::from_raw(s).map(Recipient::Address)
    }
}

fn mosaic_id(dto: Uint64Dto) -> Result<MosaicId, SdkError> {
    MosaicId::new(dto.to_u64())
}

fn offered(id: Uint64Dto, amount: Uint64Dto) -> Mosaic {
    Mosaic::new(AssetId::from_u64(id.to_u64()), amount.to_u64())
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    #[serde(rename = "type")]
    pub message_type: u8,
    /// Hex-encoded payload.
    #[serde(default)]
    pub payload: String,
}

#[derive(Debug, Deserialize)]
pub struct MosaicDto {
    pub id: Uint64Dto,
    pub amount: Uint64Dto,
}

impl MosaicDto {
    fn to_mosaic(&self) -> Mosaic {
        offered(self.id, self.amount)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDto {
    pub recipient: String,
    pub message: Option<MessageDto>,
    #[serde(default)]
    pub mosaics: Vec<MosaicDto>,
}

impl BodyDto for TransferDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        let message = match self.message {
            Some(dto) => Message::raw(
                MessageType::from_u8(dto.message_type),
                hex::decode(dto.payload)?,
            ),
            None => Message::empty(),
        };
        Ok(TransferTransaction::new(
            parse_recipient(&self.recipient)?,
            self.mosaics.iter().map(MosaicDto::to_mosaic).collect(),
            message,
        )
        .into())
    }
}

// ---------------------------------------------------------------------------
// Multisig
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatoryModificationDto {
    #[serde(rename = "type", alias = "modificationType")]
    pub modification_type: u8,
    pub cosignatory_public_key: PublicKey,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyMultisigDto {
    pub min_approval_delta: i8,
    pub min_removal_delta: i8,
    #[serde(default)]
    pub modifications: Vec<CosignatoryModificationDto>,
}

impl BodyDto for ModifyMultisigDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        let modifications = self
            .modifications
            .iter()
            .map(|m| {
                Ok(MultisigCosignatoryModification {
                    modification_type: ModificationType::from_u8(m.modification_type)?,
                    cosignatory: m.cosignatory_public_key,
                })
            })
            .collect::<Result<_, SdkError>>()?;
        Ok(ModifyMultisigAccountTransaction {
            min_approval_delta: self.min_approval_delta,
            min_removal_delta: self.min_removal_delta,
            modifications,
        }
        .into())
    }
}

// ---------------------------------------------------------------------------
// Namespace & mosaic
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNamespaceDto {
    pub namespace_type: u8,
    pub duration: Option<Uint64Dto>,
    pub parent_id: Option<Uint64Dto>,
    pub namespace_id: Uint64Dto,
    pub name: String,
}

impl BodyDto for RegisterNamespaceDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        let registration = match NamespaceType::from_u8(self.namespace_type)? {
            NamespaceType::Root => NamespaceRegistration::Root {
                duration: self.duration.unwrap_or_default().to_u64(),
            },
            NamespaceType::Sub => NamespaceRegistration::Sub {
                parent_id: NamespaceId::new(
                    self.parent_id
                        .ok_or_else(|| SdkError::dto("parentId", "missing for a sub namespace"))?
                        .to_u64(),
                ),
            },
        };
        Ok(RegisterNamespaceTransaction {
            name: self.name,
            namespace_id: NamespaceId::new(self.namespace_id.to_u64()),
            registration,
        }
        .into())
    }
}

#[derive(Debug, Deserialize)]
pub struct MosaicPropertyDto {
    pub id: u8,
    pub value: Uint64Dto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicDefinitionDto {
    /// Written by some nodes as a signed 32-bit integer.
    pub mosaic_nonce: i64,
    pub mosaic_id: Uint64Dto,
    #[serde(default)]
    pub properties: Vec<MosaicPropertyDto>,
}

impl BodyDto for MosaicDefinitionDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        if self.mosaic_nonce < i64::from(i32::MIN) || self.mosaic_nonce > i64::from(u32::MAX) {
            return Err(SdkError::dto(
                "mosaicNonce",
                format!("{} does not fit 32 bits", self.mosaic_nonce),
            ));
        }
        let mut properties = MosaicProperties::default();
        for property in &self.properties {
            let value = property.value.to_u64();
            match property.id {
                0 => {
                    properties.supply_mutable = value & u64::from(FLAG_SUPPLY_MUTABLE) != 0;
                    properties.transferable = value & u64::from(FLAG_TRANSFERABLE) != 0;
                }
                1 => {
                    properties.divisibility = u8::try_from(value).map_err(|_| {
                        SdkError::dto("properties", format!("divisibility {value} out of range"))
                    })?;
                }
                2 => properties.duration = value,
                other => {
                    return Err(SdkError::dto(
                        "properties",
                        format!("unknown mosaic property id {other}"),
                    ))
                }
            }
        }
        Ok(MosaicDefinitionTransaction {
            nonce: MosaicNonce::from_u32(self.mosaic_nonce as u32),
            mosaic_id: mosaic_id(self.mosaic_id)?,
            properties,
        }
        .into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicSupplyChangeDto {
    pub mosaic_id: Uint64Dto,
    pub direction: u8,
    pub delta: Uint64Dto,
}

impl BodyDto for MosaicSupplyChangeDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(MosaicSupplyChangeTransaction {
            asset_id: AssetId::from_u64(self.mosaic_id.to_u64()),
            direction: MosaicSupplyType::from_u8(self.direction)?,
            delta: self.delta.to_u64(),
        }
        .into())
    }
}

// ---------------------------------------------------------------------------
// Aliases & links
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressAliasDto {
    pub alias_action: u8,
    pub namespace_id: Uint64Dto,
    pub address: String,
}

impl BodyDto for AddressAliasDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(AddressAliasTransaction {
            action: LinkAction::from_u8(self.alias_action)?,
            namespace_id: NamespaceId::new(self.namespace_id.to_u64()),
            address: parse_address(&self.address)?,
        }
        .into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicAliasDto {
    pub alias_action: u8,
    pub namespace_id: Uint64Dto,
    pub mosaic_id: Uint64Dto,
}

impl BodyDto for MosaicAliasDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(MosaicAliasTransaction {
            action: LinkAction::from_u8(self.alias_action)?,
            namespace_id: NamespaceId::new(self.namespace_id.to_u64()),
            mosaic_id: mosaic_id(self.mosaic_id)?,
        }
        .into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLinkDto {
    pub remote_account_key: PublicKey,
    #[serde(alias = "linkAction")]
    pub action: u8,
}

impl BodyDto for AccountLinkDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(AccountLinkTransaction {
            remote_account_key: self.remote_account_key,
            action: LinkAction::from_u8(self.action)?,
        }
        .into())
    }
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashLockDto {
    pub mosaic_id: Uint64Dto,
    pub amount: Uint64Dto,
    pub duration: Uint64Dto,
    pub hash: Hash,
}

impl BodyDto for HashLockDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(HashLockTransaction {
            mosaic: offered(self.mosaic_id, self.amount),
            duration: self.duration.to_u64(),
            hash: self.hash,
        }
        .into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretLockDto {
    pub mosaic_id: Uint64Dto,
    pub amount: Uint64Dto,
    pub duration: Uint64Dto,
    pub hash_algorithm: u8,
    pub secret: Hash,
    pub recipient: String,
}

impl BodyDto for SecretLockDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(SecretLockTransaction {
            mosaic: offered(self.mosaic_id, self.amount),
            duration: self.duration.to_u64(),
            hash_type: HashType::from_u8(self.hash_algorithm)?,
            secret: self.secret,
            recipient: parse_recipient(&self.recipient)?,
        }
        .into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretProofDto {
    pub hash_algorithm: u8,
    pub secret: Hash,
    pub recipient: String,
    /// Hex-encoded proof.
    pub proof: String,
}

impl BodyDto for SecretProofDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(SecretProofTransaction {
            hash_type: HashType::from_u8(self.hash_algorithm)?,
            secret: self.secret,
            recipient: parse_recipient(&self.recipient)?,
            proof: hex::decode(self.proof)?,
        }
        .into())
    }
}

// ---------------------------------------------------------------------------
// Account properties
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyModificationDto<T> {
    #[serde(rename = "type", alias = "modificationType")]
    pub modification_type: u8,
    pub value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPropertiesDto<T> {
    pub property_type: u8,
    #[serde(default)]
    pub modifications: Vec<PropertyModificationDto<T>>,
}

impl<T> AccountPropertiesDto<T> {
    fn convert<V>(
        self,
        value: impl Fn(T) -> Result<V, SdkError>,
    ) -> Result<AccountPropertiesTransaction<V>, SdkError> {
        let modifications = self
            .modifications
            .into_iter()
            .map(|m| {
                Ok(PropertyModification {
                    modification_type: ModificationType::from_u8(m.modification_type)?,
                    value: value(m.value)?,
                })
            })
            .collect::<Result<_, SdkError>>()?;
        Ok(AccountPropertiesTransaction {
            property_type: PropertyType::from_u8(self.property_type)?,
            modifications,
        })
    }
}

impl BodyDto for AccountPropertiesDto<String> {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(self.convert(|s| parse_address(&s))?.into())
    }
}

impl BodyDto for AccountPropertiesDto<Uint64Dto> {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(self.convert(|id| Ok(AssetId::from_u64(id.to_u64())))?.into())
    }
}

impl BodyDto for AccountPropertiesDto<u16> {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        Ok(self.convert(EntityType::from_u16)?.into())
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MetadataIdDto {
    Address(String),
    Id(Uint64Dto),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataModificationDto {
    #[serde(rename = "modificationType", alias = "type")]
    pub modification_type: u8,
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyMetadataDto {
    pub metadata_type: u8,
    pub metadata_id: MetadataIdDto,
    #[serde(default)]
    pub modifications: Vec<MetadataModificationDto>,
}

impl BodyDto for ModifyMetadataDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        let target = match (self.metadata_type, &self.metadata_id) {
            (1, MetadataIdDto::Address(s)) => MetadataTarget::Address(parse_address(s)?),
            (2, MetadataIdDto::Id(id)) => MetadataTarget::Mosaic(mosaic_id(*id)?),
            (3, MetadataIdDto::Id(id)) => MetadataTarget::Namespace(NamespaceId::new(id.to_u64())),
            (other, id) => {
                return Err(SdkError::dto(
                    "metadataId",
                    format!("{id:?} does not fit metadata type {other}"),
                ))
            }
        };
        let modifications = self
            .modifications
            .into_iter()
            .map(|m| {
                Ok(MetadataModification {
                    modification_type: ModificationType::from_u8(m.modification_type)?,
                    key: m.key,
                    value: m.value.unwrap_or_default(),
                })
            })
            .collect::<Result<_, SdkError>>()?;
        Ok(ModifyMetadataTransaction {
            target,
            modifications,
        }
        .into())
    }
}

// ---------------------------------------------------------------------------
// Exchange offers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOfferDto {
    pub mosaic_id: Uint64Dto,
    pub mosaic_amount: Uint64Dto,
    pub cost: Uint64Dto,
    #[serde(rename = "type", alias = "offerType")]
    pub offer_type: u8,
    pub duration: Uint64Dto,
}

#[derive(Debug, Deserialize)]
pub struct AddExchangeOfferDto {
    pub offers: Vec<AddOfferDto>,
}

impl BodyDto for AddExchangeOfferDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        let offers = self
            .offers
            .iter()
            .map(|o| {
                Ok(AddOffer {
                    mosaic: offered(o.mosaic_id, o.mosaic_amount),
                    cost: o.cost.to_u64(),
                    offer_type: OfferType::from_u8(o.offer_type)?,
                    duration: o.duration.to_u64(),
                })
            })
            .collect::<Result<_, SdkError>>()?;
        Ok(AddExchangeOfferTransaction { offers }.into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeConfirmationDto {
    pub mosaic_id: Uint64Dto,
    pub mosaic_amount: Uint64Dto,
    pub cost: Uint64Dto,
    #[serde(rename = "type", alias = "offerType")]
    pub offer_type: u8,
    pub owner: PublicKey,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeOfferDto {
    pub offers: Vec<ExchangeConfirmationDto>,
}

impl BodyDto for ExchangeOfferDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        let offers = self
            .offers
            .iter()
            .map(|o| {
                Ok(ExchangeConfirmation {
                    mosaic: offered(o.mosaic_id, o.mosaic_amount),
                    cost: o.cost.to_u64(),
                    offer_type: OfferType::from_u8(o.offer_type)?,
                    owner: o.owner,
                })
            })
            .collect::<Result<_, SdkError>>()?;
        Ok(ExchangeOfferTransaction { offers }.into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveOfferDto {
    pub mosaic_id: Uint64Dto,
    #[serde(rename = "offerType", alias = "type")]
    pub offer_type: u8,
}

#[derive(Debug, Deserialize)]
pub struct RemoveExchangeOfferDto {
    pub offers: Vec<RemoveOfferDto>,
}

impl BodyDto for RemoveExchangeOfferDto {
    fn into_body(self) -> Result<TransactionBody, SdkError> {
        let offers = self
            .offers
            .iter()
            .map(|o| {
                Ok(RemoveOffer {
                    asset_id: AssetId::from_u64(o.mosaic_id.to_u64()),
                    offer_type: OfferType::from_u8(o.offer_type)?,
                })
            })
            .collect::<Result<_, SdkError>>()?;
        Ok(RemoveExchangeOfferTransaction { offers }.into())
    }
}
