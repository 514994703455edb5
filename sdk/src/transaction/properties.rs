//! # Account Properties
//!
//! Allow or block lists on an account, keyed by address, mosaic, or
//! transaction type. The three flavours share one layout and differ only in
//! the width of each value and in their entity type:
//!
//! ```text
//! property_type:u8 | count:u8 | modifications[type:u8, value:25|8|2]
//! ```

use bytes::BufMut;
use std::fmt::Debug;

use super::types::{EntityType, ModificationType};
use super::Body;
use crate::config::ADDRESS_SIZE;
use crate::error::SdkError;
use crate::model::{Address, AssetId};

/// Allow or block, combined with what the list applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    AllowAddress,
    AllowMosaic,
    AllowTransaction,
    BlockAddress,
    BlockMosaic,
    BlockTransaction,
}

const BLOCK_FLAG: u8 = 0x80;

impl PropertyType {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::AllowAddress => 0x01,
            Self::AllowMosaic => 0x02,
            Self::AllowTransaction => 0x04,
            Self::BlockAddress => 0x81,
            Self::BlockMosaic => 0x82,
            Self::BlockTransaction => 0x84,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, SdkError> {
        match value {
            0x01 => Ok(Self::AllowAddress),
            0x02 => Ok(Self::AllowMosaic),
            0x04 => Ok(Self::AllowTransaction),
            0x81 => Ok(Self::BlockAddress),
            0x82 => Ok(Self::BlockMosaic),
            0x84 => Ok(Self::BlockTransaction),
            other => Err(SdkError::dto("propertyType", format!("unknown value {other:#04x}"))),
        }
    }

    /// The value kind without the block flag.
    fn base(&self) -> u8 {
        self.as_u8() & !BLOCK_FLAG
    }
}

/// A value that can appear in a property list.
pub trait PropertyValue: Clone + Debug + PartialEq + Eq {
    const WIDTH: usize;
    const ENTITY_TYPE: EntityType;
    /// [`PropertyType`] base this value kind pairs with.
    const BASE: u8;

    fn write(&self, buf: &mut Vec<u8>);
}

impl PropertyValue for Address {
    const WIDTH: usize = ADDRESS_SIZE;
    const ENTITY_TYPE: EntityType = EntityType::AccountPropertiesAddress;
    const BASE: u8 = 0x01;

    fn write(&self, buf: &mut Vec<u8>) {
        buf.put_slice(self.as_bytes());
    }
}

impl PropertyValue for AssetId {
    const WIDTH: usize = 8;
    const ENTITY_TYPE: EntityType = EntityType::AccountPropertiesMosaic;
    const BASE: u8 = 0x02;

    fn write(&self, buf: &mut Vec<u8>) {
        buf.put_u64_le(self.to_u64());
    }
}

impl PropertyValue for EntityType {
    const WIDTH: usize = 2;
    const ENTITY_TYPE: EntityType = EntityType::AccountPropertiesEntityType;
    const BASE: u8 = 0x04;

    fn write(&self, buf: &mut Vec<u8>) {
        buf.put_u16_le(self.value());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModification<V> {
    pub modification_type: ModificationType,
    pub value: V,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPropertiesTransaction<V> {
    pub property_type: PropertyType,
    pub modifications: Vec<PropertyModification<V>>,
}

impl<V: PropertyValue> Body for AccountPropertiesTransaction<V> {
    fn entity_type(&self) -> EntityType {
        V::ENTITY_TYPE
    }

    fn body_size(&self) -> usize {
        2 + self.modifications.len() * (1 + V::WIDTH)
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.property_type.base() != V::BASE {
            return Err(SdkError::structural(
                "property_type",
                format!("{:?} does not apply to {}", self.property_type, V::ENTITY_TYPE),
            ));
        }
        if self.modifications.is_empty() {
            return Err(SdkError::structural("modifications", "no modifications"));
        }
        if self.modifications.len() > usize::from(u8::MAX) {
            return Err(SdkError::structural(
                "modifications",
                format!("{} entries exceeds the limit of 255", self.modifications.len()),
            ));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u8(self.property_type.as_u8());
        buf.put_u8(self.modifications.len() as u8);
        for modification in &self.modifications {
            buf.put_u8(modification.modification_type.as_u8());
            modification.value.write(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_property_layout() {
        let tx = AccountPropertiesTransaction {
            property_type: PropertyType::BlockTransaction,
            modifications: vec![PropertyModification {
                modification_type: ModificationType::Add,
                value: EntityType::Transfer,
            }],
        };
        assert_eq!(tx.entity_type(), EntityType::AccountPropertiesEntityType);
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf, vec![0x84, 1, 0, 0x54, 0x41]);
        assert_eq!(buf.len(), tx.body_size());
    }

    #[test]
    fn mismatched_property_type_is_rejected() {
        let tx = AccountPropertiesTransaction {
            property_type: PropertyType::AllowAddress,
            modifications: vec![PropertyModification {
                modification_type: ModificationType::Add,
                value: AssetId::from_u64(5),
            }],
        };
        assert!(tx.validate().is_err());
    }

    #[test]
    fn empty_list_is_rejected() {
        let tx: AccountPropertiesTransaction<AssetId> = AccountPropertiesTransaction {
            property_type: PropertyType::AllowMosaic,
            modifications: vec![],
        };
        assert!(tx.validate().is_err());
    }

    #[test]
    fn property_type_roundtrip() {
        for raw in [0x01, 0x02, 0x04, 0x81, 0x82, 0x84] {
            assert_eq!(PropertyType::from_u8(raw).unwrap().as_u8(), raw);
        }
        assert!(PropertyType::from_u8(0x08).is_err());
    }
}
