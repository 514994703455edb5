//! Mosaic definition and supply change.

use bytes::BufMut;

use super::types::EntityType;
use super::Body;
use crate::crypto::keys::PublicKey;
use crate::error::SdkError;
use crate::model::{AssetId, MosaicId, MosaicNonce, MosaicProperties, MosaicSupplyType};

/// Highest divisibility the network accepts.
pub const MAX_DIVISIBILITY: u8 = 6;

/// ```text
/// nonce:u32 | mosaic_id:u64 | properties_count:u8 | flags:u8 | divisibility:u8 | properties[id:u8, value:u64]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicDefinitionTransaction {
    pub nonce: MosaicNonce,
    pub mosaic_id: MosaicId,
    pub properties: MosaicProperties,
}

impl MosaicDefinitionTransaction {
    /// Derives the mosaic id from `nonce` and the owner's key.
    pub fn new(nonce: MosaicNonce, owner: &PublicKey, properties: MosaicProperties) -> Self {
        Self {
            nonce,
            mosaic_id: MosaicId::from_nonce_and_owner(nonce, owner),
            properties,
        }
    }
}

impl Body for MosaicDefinitionTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::MosaicDefinition
    }

    fn body_size(&self) -> usize {
        4 + 8 + 1 + 1 + 1 + 9 * self.properties.optional_properties().len()
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.properties.divisibility > MAX_DIVISIBILITY {
            return Err(SdkError::structural(
                "divisibility",
                format!(
                    "{} exceeds the maximum of {MAX_DIVISIBILITY}",
                    self.properties.divisibility
                ),
            ));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        let optional = self.properties.optional_properties();
        buf.put_slice(self.nonce.as_bytes());
        buf.put_u64_le(self.mosaic_id.to_u64());
        buf.put_u8(optional.len() as u8);
        buf.put_u8(self.properties.flags());
        buf.put_u8(self.properties.divisibility);
        for (id, value) in optional {
            buf.put_u8(id);
            buf.put_u64_le(value);
        }
    }
}

/// ```text
/// mosaic_id:u64 | direction:u8 | delta:u64
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicSupplyChangeTransaction {
    /// A mosaic or a namespace aliasing one.
    pub asset_id: AssetId,
    pub direction: MosaicSupplyType,
    pub delta: u64,
}

impl Body for MosaicSupplyChangeTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::MosaicSupplyChange
    }

    fn body_size(&self) -> usize {
        8 + 1 + 8
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.delta == 0 {
            return Err(SdkError::structural("delta", "supply change of zero"));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u64_le(self.asset_id.to_u64());
        buf.put_u8(self.direction.as_u8());
        buf.put_u64_le(self.delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "1026D70E1954775749C6811084D6450A3184D977383F0E4282CD47118AF37755";

    #[test]
    fn definition_without_duration() {
        let owner = PublicKey::from_hex(OWNER).unwrap();
        let tx = MosaicDefinitionTransaction::new(
            MosaicNonce::from_u32(0),
            &owner,
            MosaicProperties {
                supply_mutable: true,
                transferable: false,
                divisibility: 6,
                duration: 0,
            },
        );
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf.len(), 15);
        assert_eq!(buf.len(), tx.body_size());
        assert_eq!(&buf[4..12], &0x592B_41EE_ACC4_4068u64.to_le_bytes());
        assert_eq!(&buf[12..15], &[0, 0x01, 6]);
    }

    #[test]
    fn definition_with_duration_adds_property() {
        let owner = PublicKey::from_hex(OWNER).unwrap();
        let tx = MosaicDefinitionTransaction::new(
            MosaicNonce::from_u32(1),
            &owner,
            MosaicProperties {
                duration: 500,
                ..Default::default()
            },
        );
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf.len(), 24);
        assert_eq!(buf[12], 1);
        assert_eq!(buf[15], 2);
        assert_eq!(&buf[16..], &500u64.to_le_bytes());
    }

    #[test]
    fn divisibility_is_bounded() {
        let tx = MosaicDefinitionTransaction {
            nonce: MosaicNonce::from_u32(0),
            mosaic_id: MosaicId::new(1).unwrap(),
            properties: MosaicProperties {
                divisibility: 7,
                ..Default::default()
            },
        };
        assert!(tx.validate().is_err());
    }

    #[test]
    fn supply_change_layout() {
        let tx = MosaicSupplyChangeTransaction {
            asset_id: AssetId::from_u64(0x1234),
            direction: MosaicSupplyType::Increase,
            delta: 10,
        };
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf.len(), 17);
        assert_eq!(buf[8], 1);
        assert!(MosaicSupplyChangeTransaction { delta: 0, ..tx }.validate().is_err());
    }
}
