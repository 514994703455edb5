//! Namespace identifiers.
//!
//! A namespace id is derived per path segment:
//!
//! ```text
//! id(part, parent) = u64_le(SHA3-256(u64_le(parent) || part)[..8]) | 1 << 63
//! ```
//!
//! with `parent = 0` for root namespaces. The high bit distinguishes
//! namespace ids from mosaic ids wherever the two share a 64-bit slot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{MAX_NAMESPACE_DEPTH, MAX_NAMESPACE_NAME_LENGTH, NAMESPACE_BIT};
use crate::crypto::hash::sha3_256_multi;
use crate::error::SdkError;

/// A 64-bit namespace identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespaceId(u64);

impl NamespaceId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }

    /// Id of the last segment of a dotted path, e.g. `prx.xpx`.
    pub fn from_name(full_name: &str) -> Result<Self, SdkError> {
        let path = generate_namespace_path(full_name)?;
        path.last()
            .copied()
            .ok_or_else(|| SdkError::structural("namespace name", "empty name"))
    }

    /// Id of a single segment under `parent`.
    pub fn from_part(name: &str, parent: Option<NamespaceId>) -> Result<Self, SdkError> {
        validate_part(name)?;
        Ok(generate_id(name, parent.map(|p| p.0).unwrap_or(0)))
    }

    /// Upper-case, zero-padded hex.
    pub fn to_hex(&self) -> String {
        format!("{:016X}", self.0)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.to_hex())
    }
}

/// Root or child namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamespaceType {
    Root,
    Sub,
}

impl NamespaceType {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Root => 0,
            Self::Sub => 1,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, SdkError> {
        match value {
            0 => Ok(Self::Root),
            1 => Ok(Self::Sub),
            other => Err(SdkError::dto("namespaceType", format!("unknown value {other}"))),
        }
    }
}

/// Ids for every segment of `root.sub.leaf`, root first.
pub fn generate_namespace_path(full_name: &str) -> Result<Vec<NamespaceId>, SdkError> {
    let parts: Vec<&str> = full_name.split('.').collect();
    if parts.len() > MAX_NAMESPACE_DEPTH {
        return Err(SdkError::structural(
            "namespace name",
            format!("{full_name} has more than {MAX_NAMESPACE_DEPTH} levels"),
        ));
    }
    let mut path = Vec::with_capacity(parts.len());
    let mut parent = 0u64;
    for part in parts {
        validate_part(part)?;
        let id = generate_id(part, parent);
        path.push(id);
        parent = id.0;
    }
    Ok(path)
}

fn generate_id(name: &str, parent: u64) -> NamespaceId {
    let digest = sha3_256_multi(&[&parent.to_le_bytes(), name.as_bytes()]);
    let mut low = [0u8; 8];
    low.copy_from_slice(&digest[..8]);
    NamespaceId(u64::from_le_bytes(low) | NAMESPACE_BIT)
}

/// Segment names are `[a-z0-9][a-z0-9_-]*`, 1 to 64 characters.
pub(crate) fn validate_part(name: &str) -> Result<(), SdkError> {
    if name.is_empty() || name.len() > MAX_NAMESPACE_NAME_LENGTH {
        return Err(SdkError::structural(
            "namespace name",
            format!("segment length must be 1..={MAX_NAMESPACE_NAME_LENGTH}, got {}", name.len()),
        ));
    }
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .map(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .unwrap_or(false);
    let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !(first_ok && rest_ok) {
        return Err(SdkError::structural(
            "namespace name",
            format!("{name} contains invalid characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_root_ids() {
        assert_eq!(NamespaceId::from_name("nem").unwrap().to_u64(), 0x84B3_552D_375F_FA4B);
        assert_eq!(NamespaceId::from_name("prx").unwrap().to_u64(), 0xB16D_77FD_8B6F_B3BE);
    }

    #[test]
    fn child_id_depends_on_parent() {
        assert_eq!(
            NamespaceId::from_name("prx.xpx").unwrap().to_u64(),
            0xBFFB_42A1_9116_BDF6
        );
        let prx = NamespaceId::from_name("prx").unwrap();
        assert_eq!(
            NamespaceId::from_part("xpx", Some(prx)).unwrap(),
            NamespaceId::from_name("prx.xpx").unwrap()
        );
    }

    #[test]
    fn three_level_path() {
        let path = generate_namespace_path("a.b.c").unwrap();
        assert_eq!(
            path.iter().map(|id| id.to_u64()).collect::<Vec<_>>(),
            vec![0xA535_DA36_BC8C_7FA4, 0xA4B1_4473_1D78_FBDE, 0xA2F4_875D_7DBA_6D0F]
        );
        assert!(path.iter().all(|id| id.to_u64() & NAMESPACE_BIT != 0));
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(NamespaceId::from_name("a.b.c.d").is_err());
        assert!(NamespaceId::from_name("Upper").is_err());
        assert!(NamespaceId::from_name("-dash").is_err());
        assert!(NamespaceId::from_name("a..b").is_err());
        assert!(NamespaceId::from_name(&"x".repeat(65)).is_err());
        assert!(NamespaceId::from_name("ok_name-1").is_ok());
    }

    #[test]
    fn hex_display_is_padded() {
        assert_eq!(NamespaceId::new(0xFF).to_string(), "00000000000000FF");
    }
}
