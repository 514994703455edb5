//! Namespace registration.
//!
//! ```text
//! namespace_type:u8 | duration_or_parent:u64 | namespace_id:u64 | name_size:u8 | name
//! ```

use bytes::BufMut;

use super::types::EntityType;
use super::Body;
use crate::error::SdkError;
use crate::model::namespace::validate_part;
use crate::model::{NamespaceId, NamespaceType};

/// A root namespace is rented for a duration; a child hangs off a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceRegistration {
    Root { duration: u64 },
    Sub { parent_id: NamespaceId },
}

impl NamespaceRegistration {
    pub fn namespace_type(&self) -> NamespaceType {
        match self {
            Self::Root { .. } => NamespaceType::Root,
            Self::Sub { .. } => NamespaceType::Sub,
        }
    }

    fn parent(&self) -> Option<NamespaceId> {
        match self {
            Self::Root { .. } => None,
            Self::Sub { parent_id } => Some(*parent_id),
        }
    }

    fn value(&self) -> u64 {
        match self {
            Self::Root { duration } => *duration,
            Self::Sub { parent_id } => parent_id.to_u64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNamespaceTransaction {
    pub name: String,
    pub namespace_id: NamespaceId,
    pub registration: NamespaceRegistration,
}

impl RegisterNamespaceTransaction {
    pub fn root(name: &str, duration: u64) -> Result<Self, SdkError> {
        Ok(Self {
            name: name.to_string(),
            namespace_id: NamespaceId::from_part(name, None)?,
            registration: NamespaceRegistration::Root { duration },
        })
    }

    /// A child of `parent_name`, which may itself be a dotted path.
    pub fn sub(name: &str, parent_name: &str) -> Result<Self, SdkError> {
        let parent_id = NamespaceId::from_name(parent_name)?;
        Self::sub_of(name, parent_id)
    }

    pub fn sub_of(name: &str, parent_id: NamespaceId) -> Result<Self, SdkError> {
        Ok(Self {
            name: name.to_string(),
            namespace_id: NamespaceId::from_part(name, Some(parent_id))?,
            registration: NamespaceRegistration::Sub { parent_id },
        })
    }
}

impl Body for RegisterNamespaceTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::RegisterNamespace
    }

    fn body_size(&self) -> usize {
        1 + 8 + 8 + 1 + self.name.len()
    }

    fn validate(&self) -> Result<(), SdkError> {
        validate_part(&self.name)?;
        let expected = NamespaceId::from_part(&self.name, self.registration.parent())?;
        if expected != self.namespace_id {
            return Err(SdkError::structural(
                "namespace_id",
                format!(
                    "{} does not match {} derived from {}",
                    self.namespace_id, expected, self.name
                ),
            ));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u8(self.registration.namespace_type().as_u8());
        buf.put_u64_le(self.registration.value());
        buf.put_u64_le(self.namespace_id.to_u64());
        buf.put_u8(self.name.len() as u8);
        buf.put_slice(self.name.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_registration_layout() {
        let tx = RegisterNamespaceTransaction::root("prx", 1000).unwrap();
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf.len(), tx.body_size());
        assert_eq!(buf[0], 0);
        assert_eq!(&buf[1..9], &1000u64.to_le_bytes());
        assert_eq!(&buf[9..17], &0xB16D_77FD_8B6F_B3BEu64.to_le_bytes());
        assert_eq!(buf[17], 3);
        assert_eq!(&buf[18..], b"prx");
    }

    #[test]
    fn sub_registration_uses_parent_id() {
        let tx = RegisterNamespaceTransaction::sub("xpx", "prx").unwrap();
        assert_eq!(tx.namespace_id.to_u64(), 0xBFFB_42A1_9116_BDF6);
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf[0], 1);
        assert_eq!(&buf[1..9], &0xB16D_77FD_8B6F_B3BEu64.to_le_bytes());
    }

    #[test]
    fn inconsistent_id_is_rejected() {
        let mut tx = RegisterNamespaceTransaction::root("prx", 10).unwrap();
        tx.namespace_id = NamespaceId::new(1);
        assert!(tx.validate().is_err());
        assert!(RegisterNamespaceTransaction::root("Bad Name", 10).is_err());
    }
}
