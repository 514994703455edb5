//! Namespace aliases and remote account links.

use bytes::BufMut;

use super::types::{EntityType, LinkAction};
use super::Body;
use crate::config::{ADDRESS_SIZE, PUBLIC_KEY_SIZE};
use crate::crypto::keys::PublicKey;
use crate::error::SdkError;
use crate::model::{Address, MosaicId, NamespaceId};

/// Points a namespace at an address: `action:u8 | namespace_id:u64 | address:25`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressAliasTransaction {
    pub action: LinkAction,
    pub namespace_id: NamespaceId,
    pub address: Address,
}

impl Body for AddressAliasTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::AddressAlias
    }

    fn body_size(&self) -> usize {
        1 + 8 + ADDRESS_SIZE
    }

    fn validate(&self) -> Result<(), SdkError> {
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u8(self.action.as_u8());
        buf.put_u64_le(self.namespace_id.to_u64());
        buf.put_slice(self.address.as_bytes());
    }
}

/// Points a namespace at a mosaic: `action:u8 | namespace_id:u64 | mosaic_id:u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicAliasTransaction {
    pub action: LinkAction,
    pub namespace_id: NamespaceId,
    pub mosaic_id: MosaicId,
}

impl Body for MosaicAliasTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::MosaicAlias
    }

    fn body_size(&self) -> usize {
        1 + 8 + 8
    }

    fn validate(&self) -> Result<(), SdkError> {
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u8(self.action.as_u8());
        buf.put_u64_le(self.namespace_id.to_u64());
        buf.put_u64_le(self.mosaic_id.to_u64());
    }
}

/// Delegates harvesting to a remote key: `remote_account_key:32 | action:u8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLinkTransaction {
    pub remote_account_key: PublicKey,
    pub action: LinkAction,
}

impl Body for AccountLinkTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::AccountLink
    }

    fn body_size(&self) -> usize {
        PUBLIC_KEY_SIZE + 1
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.remote_account_key.is_zero() {
            return Err(SdkError::structural("remote_account_key", "key is all zeros"));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_slice(self.remote_account_key.as_bytes());
        buf.put_u8(self.action.as_u8());
    }
}
