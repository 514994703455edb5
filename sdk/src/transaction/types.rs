//! Entity types and the small enums shared by several transaction bodies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SdkError;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Closed catalogue of transaction kinds.
///
/// The discriminant selects both the body layout and the schema, so adding a
/// variant is a compile error everywhere a match has to learn about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityType {
    Transfer,
    ModifyMultisig,
    RegisterNamespace,
    MosaicDefinition,
    MosaicSupplyChange,
    AddressAlias,
    MosaicAlias,
    AccountLink,
    HashLock,
    SecretLock,
    SecretProof,
    AccountPropertiesAddress,
    AccountPropertiesMosaic,
    AccountPropertiesEntityType,
    ModifyMetadataAddress,
    ModifyMetadataMosaic,
    ModifyMetadataNamespace,
    AddExchangeOffer,
    ExchangeOffer,
    RemoveExchangeOffer,
    AggregateComplete,
    AggregateBonded,
}

impl EntityType {
    pub const ALL: [EntityType; 22] = [
        Self::Transfer,
        Self::ModifyMultisig,
        Self::RegisterNamespace,
        Self::MosaicDefinition,
        Self::MosaicSupplyChange,
        Self::AddressAlias,
        Self::MosaicAlias,
        Self::AccountLink,
        Self::HashLock,
        Self::SecretLock,
        Self::SecretProof,
        Self::AccountPropertiesAddress,
        Self::AccountPropertiesMosaic,
        Self::AccountPropertiesEntityType,
        Self::ModifyMetadataAddress,
        Self::ModifyMetadataMosaic,
        Self::ModifyMetadataNamespace,
        Self::AddExchangeOffer,
        Self::ExchangeOffer,
        Self::RemoveExchangeOffer,
        Self::AggregateComplete,
        Self::AggregateBonded,
    ];

    /// The 16-bit wire value.
    pub fn value(&self) -> u16 {
        match self {
            Self::Transfer => 0x4154,
            Self::ModifyMultisig => 0x4155,
            Self::RegisterNamespace => 0x414E,
            Self::MosaicDefinition => 0x414D,
            Self::MosaicSupplyChange => 0x424D,
            Self::AddressAlias => 0x424E,
            Self::MosaicAlias => 0x434E,
            Self::AccountLink => 0x414C,
            Self::HashLock => 0x4148,
            Self::SecretLock => 0x4152,
            Self::SecretProof => 0x4252,
            Self::AccountPropertiesAddress => 0x4150,
            Self::AccountPropertiesMosaic => 0x4250,
            Self::AccountPropertiesEntityType => 0x4350,
            Self::ModifyMetadataAddress => 0x413D,
            Self::ModifyMetadataMosaic => 0x423D,
            Self::ModifyMetadataNamespace => 0x433D,
            Self::AddExchangeOffer => 0x415D,
            Self::ExchangeOffer => 0x425D,
            Self::RemoveExchangeOffer => 0x435D,
            Self::AggregateComplete => 0x4141,
            Self::AggregateBonded => 0x4241,
        }
    }

    /// Current body version for this entity type.
    pub fn version(&self) -> u16 {
        match self {
            Self::Transfer | Self::ModifyMultisig | Self::MosaicDefinition => 3,
            Self::RegisterNamespace
            | Self::MosaicSupplyChange
            | Self::AccountLink
            | Self::AggregateComplete
            | Self::AggregateBonded => 2,
            Self::AddressAlias
            | Self::MosaicAlias
            | Self::HashLock
            | Self::SecretLock
            | Self::SecretProof
            | Self::AccountPropertiesAddress
            | Self::AccountPropertiesMosaic
            | Self::AccountPropertiesEntityType
            | Self::ModifyMetadataAddress
            | Self::ModifyMetadataMosaic
            | Self::ModifyMetadataNamespace
            | Self::AddExchangeOffer
            | Self::ExchangeOffer
            | Self::RemoveExchangeOffer => 1,
        }
    }

    pub fn from_u16(value: u16) -> Result<Self, SdkError> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.value() == value)
            .ok_or(SdkError::UnknownEntityType(value))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(0x{:04X})", self, self.value())
    }
}

// ---------------------------------------------------------------------------
// Shared small enums
// ---------------------------------------------------------------------------

/// Add or remove, used by multisig, property and metadata modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModificationType {
    Add,
    Remove,
}

impl ModificationType {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Add => 0,
            Self::Remove => 1,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, SdkError> {
        match value {
            0 => Ok(Self::Add),
            1 => Ok(Self::Remove),
            other => Err(SdkError::dto("modificationType", format!("unknown value {other}"))),
        }
    }
}

/// Link or unlink, used by aliases and account links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkAction {
    Link,
    Unlink,
}

impl LinkAction {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Link => 0,
            Self::Unlink => 1,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, SdkError> {
        match value {
            0 => Ok(Self::Link),
            1 => Ok(Self::Unlink),
            other => Err(SdkError::dto("action", format!("unknown value {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_unique_and_roundtrip() {
        let mut values: Vec<u16> = EntityType::ALL.iter().map(|t| t.value()).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), EntityType::ALL.len());
        for t in EntityType::ALL {
            assert_eq!(EntityType::from_u16(t.value()).unwrap(), t);
        }
    }

    #[test]
    fn unknown_entity_type_is_rejected() {
        assert!(matches!(
            EntityType::from_u16(0x1234),
            Err(SdkError::UnknownEntityType(0x1234))
        ));
    }

    #[test]
    fn versions() {
        assert_eq!(EntityType::Transfer.version(), 3);
        assert_eq!(EntityType::AggregateBonded.version(), 2);
        assert_eq!(EntityType::AddExchangeOffer.version(), 1);
        assert!(EntityType::AggregateComplete.is_aggregate());
        assert!(!EntityType::HashLock.is_aggregate());
    }

    #[test]
    fn display_includes_hex() {
        assert_eq!(EntityType::Transfer.to_string(), "Transfer(0x4154)");
    }
}
