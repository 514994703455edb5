//! Multisig account modification.

use bytes::BufMut;

use super::types::{EntityType, ModificationType};
use super::Body;
use crate::config::PUBLIC_KEY_SIZE;
use crate::crypto::keys::PublicKey;
use crate::error::SdkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultisigCosignatoryModification {
    pub modification_type: ModificationType,
    pub cosignatory: PublicKey,
}

/// Converts an account to multisig or edits its cosignatories and quorum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyMultisigAccountTransaction {
    pub min_approval_delta: i8,
    pub min_removal_delta: i8,
    pub modifications: Vec<MultisigCosignatoryModification>,
}

impl Body for ModifyMultisigAccountTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::ModifyMultisig
    }

    fn body_size(&self) -> usize {
        3 + self.modifications.len() * (1 + PUBLIC_KEY_SIZE)
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.modifications.is_empty()
            && self.min_approval_delta == 0
            && self.min_removal_delta == 0
        {
            return Err(SdkError::structural(
                "modifications",
                "no cosignatory changes and no quorum deltas",
            ));
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
        buf.put_i8(self.min_removal_delta);
        buf.put_i8(self.min_approval_delta);
        buf.put_u8(self.modifications.len() as u8);
        for modification in &self.modifications {
            buf.put_u8(modification.modification_type.as_u8());
            buf.put_slice(modification.cosignatory.as_bytes());
        }
    }
}
