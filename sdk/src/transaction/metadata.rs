//! Key/value metadata attached to an address, mosaic, or namespace.
//!
//! ```text
//! metadata_type:u8 | metadata_id:25|8 | modifications[size:u32, type:u8,
//!     key_size:u8, value_size:u16, key, value] (until the end of the body)
//! ```
//!
//! Removals carry the key only; their value is never encoded.

use bytes::BufMut;

use super::types::{EntityType, ModificationType};
use super::Body;
use crate::config::ADDRESS_SIZE;
use crate::error::SdkError;
use crate::model::{Address, MosaicId, NamespaceId};

const MODIFICATION_HEADER_SIZE: usize = 4 + 1 + 1 + 2;

/// What the metadata is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataTarget {
    Address(Address),
    Mosaic(MosaicId),
    Namespace(NamespaceId),
}

impl MetadataTarget {
    pub fn metadata_type(&self) -> u8 {
        match self {
            Self::Address(_) => 1,
            Self::Mosaic(_) => 2,
            Self::Namespace(_) => 3,
        }
    }

    fn id_size(&self) -> usize {
        match self {
            Self::Address(_) => ADDRESS_SIZE,
            Self::Mosaic(_) | Self::Namespace(_) => 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataModification {
    pub modification_type: ModificationType,
    pub key: String,
    pub value: String,
}

impl MetadataModification {
    pub fn add(key: &str, value: &str) -> Self {
        Self {
            modification_type: ModificationType::Add,
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn remove(key: &str) -> Self {
        Self {
            modification_type: ModificationType::Remove,
            key: key.to_string(),
            value: String::new(),
        }
    }

    fn encoded_value(&self) -> &[u8] {
        match self.modification_type {
            ModificationType::Add => self.value.as_bytes(),
            ModificationType::Remove => &[],
        }
    }

    fn size(&self) -> usize {
        MODIFICATION_HEADER_SIZE + self.key.len() + self.encoded_value().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyMetadataTransaction {
    pub target: MetadataTarget,
    pub modifications: Vec<MetadataModification>,
}

impl Body for ModifyMetadataTransaction {
    fn entity_type(&self) -> EntityType {
        match self.target {
            MetadataTarget::Address(_) => EntityType::ModifyMetadataAddress,
            MetadataTarget::Mosaic(_) => EntityType::ModifyMetadataMosaic,
            MetadataTarget::Namespace(_) => EntityType::ModifyMetadataNamespace,
        }
    }

    fn body_size(&self) -> usize {
        1 + self.target.id_size()
            + self
                .modifications
                .iter()
                .map(MetadataModification::size)
                .sum::<usize>()
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.modifications.is_empty() {
            return Err(SdkError::structural("modifications", "no modifications"));
        }
        for modification in &self.modifications {
            if modification.key.is_empty() {
                return Err(SdkError::structural("metadata key", "key is empty"));
            }
            if modification.key.len() > usize::from(u8::MAX) {
                return Err(SdkError::structural(
                    "metadata key",
                    format!("{} bytes does not fit a u8 size field", modification.key.len()),
                ));
            }
            if modification.encoded_value().len() > usize::from(u16::MAX) {
                return Err(SdkError::structural(
                    "metadata value",
                    format!(
                        "{} bytes does not fit a u16 size field",
                        modification.value.len()
                    ),
                ));
            }
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u8(self.target.metadata_type());
        match self.target {
            MetadataTarget::Address(address) => buf.put_slice(address.as_bytes()),
            MetadataTarget::Mosaic(id) => buf.put_u64_le(id.to_u64()),
            MetadataTarget::Namespace(id) => buf.put_u64_le(id.to_u64()),
        }
        for modification in &self.modifications {
            let value = modification.encoded_value();
            buf.put_u32_le(modification.size() as u32);
            buf.put_u8(modification.modification_type.as_u8());
            buf.put_u8(modification.key.len() as u8);
            buf.put_u16_le(value.len() as u16);
            buf.put_slice(modification.key.as_bytes());
            buf.put_slice(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_layout() {
        let tx = ModifyMetadataTransaction {
            target: MetadataTarget::Namespace(NamespaceId::new(0x8000_0000_0000_00AA)),
            modifications: vec![
                MetadataModification::add("k", "vv"),
                MetadataModification {
                    modification_type: ModificationType::Remove,
                    key: "gone".to_string(),
                    value: "ignored".to_string(),
                },
            ],
        };
        assert_eq!(tx.entity_type(), EntityType::ModifyMetadataNamespace);

        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf.len(), tx.body_size());
        assert_eq!(buf[0], 3);
        // first modification: size 11, add, key 1, value 2
        assert_eq!(&buf[9..17], &[11, 0, 0, 0, 0, 1, 2, 0]);
        assert_eq!(&buf[17..20], b"kvv");
        // second modification carries no value
        assert_eq!(&buf[20..28], &[12, 0, 0, 0, 1, 4, 0, 0]);
        assert_eq!(&buf[28..], b"gone");
    }

    #[test]
    fn address_target_uses_25_bytes() {
        let address = Address::from_raw("SDRDGFTDLLCB67D4HPGIMIHPNSRYRJRT7DOBGWZY").unwrap();
        let tx = ModifyMetadataTransaction {
            target: MetadataTarget::Address(address),
            modifications: vec![MetadataModification::remove("k")],
        };
        assert_eq!(tx.entity_type(), EntityType::ModifyMetadataAddress);
        assert_eq!(tx.body_size(), 1 + 25 + 8 + 1);
    }

    #[test]
    fn validation() {
        let empty = ModifyMetadataTransaction {
            target: MetadataTarget::Mosaic(MosaicId::new(1).unwrap()),
            modifications: vec![],
        };
        assert!(empty.validate().is_err());

        let long_key = ModifyMetadataTransaction {
            modifications: vec![MetadataModification::add(&"k".repeat(256), "v")],
            ..empty.clone()
        };
        assert!(long_key.validate().is_err());

        let empty_key = ModifyMetadataTransaction {
            modifications: vec![MetadataModification::add("", "v")],
            ..empty
        };
        assert!(empty_key.validate().is_err());
    }
}
