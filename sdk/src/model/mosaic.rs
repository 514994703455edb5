//! Mosaic identifiers, amounts and definition properties.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::namespace::NamespaceId;
use crate::config::NAMESPACE_BIT;
use crate::crypto::hash::sha3_256_multi;
use crate::crypto::keys::PublicKey;
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// MosaicId / MosaicNonce
// ---------------------------------------------------------------------------

/// A 64-bit mosaic identifier. The namespace bit is always clear.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MosaicId(u64);

impl MosaicId {
    /// Wraps a raw id, rejecting values that look like namespace ids.
    pub fn new(id: u64) -> Result<Self, SdkError> {
        if id & NAMESPACE_BIT != 0 {
            return Err(SdkError::structural(
                "mosaic id",
                format!("{id:016X} has the namespace bit set"),
            ));
        }
        Ok(Self(id))
    }

    /// `u64_le(SHA3-256(nonce || owner)[..8])` with the namespace bit cleared.
    pub fn from_nonce_and_owner(nonce: MosaicNonce, owner: &PublicKey) -> Self {
        let digest = sha3_256_multi(&[nonce.as_bytes(), owner.as_bytes()]);
        let mut low = [0u8; 8];
        low.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(low) & !NAMESPACE_BIT)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn to_hex(&self) -> String {
        format!("{:016X}", self.0)
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicId({})", self.to_hex())
    }
}

/// Four-byte nonce mixed into mosaic id generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicNonce([u8; 4]);

impl MosaicNonce {
    pub fn from_u32(value: u32) -> Self {
        Self(value.to_le_bytes())
    }

    pub fn random() -> Self {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// AssetId / Mosaic
// ---------------------------------------------------------------------------

/// Either a concrete mosaic or a namespace alias pointing to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Mosaic(MosaicId),
    Namespace(NamespaceId),
}

impl AssetId {
    /// Classifies a raw 64-bit id by its namespace bit.
    pub fn from_u64(id: u64) -> Self {
        if id & NAMESPACE_BIT != 0 {
            Self::Namespace(NamespaceId::new(id))
        } else {
            Self::Mosaic(MosaicId(id))
        }
    }

    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Mosaic(id) => id.to_u64(),
            Self::Namespace(id) => id.to_u64(),
        }
    }
}

impl From<MosaicId> for AssetId {
    fn from(id: MosaicId) -> Self {
        Self::Mosaic(id)
    }
}

impl From<NamespaceId> for AssetId {
    fn from(id: NamespaceId) -> Self {
        Self::Namespace(id)
    }
}

/// An amount of some asset, in its smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mosaic {
    pub asset_id: AssetId,
    pub amount: u64,
}

impl Mosaic {
    pub fn new(asset_id: impl Into<AssetId>, amount: u64) -> Self {
        Self {
            asset_id: asset_id.into(),
            amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Definition properties
// ---------------------------------------------------------------------------

/// Flag bit: supply can be changed after creation.
pub const FLAG_SUPPLY_MUTABLE: u8 = 0x01;
/// Flag bit: holders other than the owner may transfer.
pub const FLAG_TRANSFERABLE: u8 = 0x02;

/// Optional property id for the mosaic duration.
pub const PROPERTY_DURATION: u8 = 0x02;

/// Properties of a mosaic definition.
///
/// A zero `duration` means "eternal" and is omitted from the wire as an
/// optional property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MosaicProperties {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub divisibility: u8,
    pub duration: u64,
}

impl MosaicProperties {
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.supply_mutable {
            flags |= FLAG_SUPPLY_MUTABLE;
        }
        if self.transferable {
            flags |= FLAG_TRANSFERABLE;
        }
        flags
    }

    /// Optional `(id, value)` properties in wire order.
    pub fn optional_properties(&self) -> Vec<(u8, u64)> {
        if self.duration == 0 {
            Vec::new()
        } else {
            vec![(PROPERTY_DURATION, self.duration)]
        }
    }
}

/// Direction of a supply change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MosaicSupplyType {
    Decrease,
    Increase,
}

impl MosaicSupplyType {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Decrease => 0,
            Self::Increase => 1,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, SdkError> {
        match value {
            0 => Ok(Self::Decrease),
            1 => Ok(Self::Increase),
            other => Err(SdkError::dto("direction", format!("unknown value {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "1026D70E1954775749C6811084D6450A3184D977383F0E4282CD47118AF37755";

    #[test]
    fn id_from_nonce_and_owner() {
        let owner = PublicKey::from_hex(OWNER).unwrap();
        let id = MosaicId::from_nonce_and_owner(MosaicNonce::from_u32(0), &owner);
        assert_eq!(id.to_u64(), 0x592B_41EE_ACC4_4068);
        let id = MosaicId::from_nonce_and_owner(MosaicNonce::from_u32(1), &owner);
        assert_eq!(id.to_u64(), 0x7C77_F64C_465C_ECA3);
    }

    #[test]
    fn mosaic_id_rejects_namespace_bit() {
        assert!(MosaicId::new(0x8000_0000_0000_0001).is_err());
        assert!(MosaicId::new(0x0000_0000_0000_0001).is_ok());
    }

    #[test]
    fn asset_id_classification() {
        assert!(matches!(
            AssetId::from_u64(0xBFFB_42A1_9116_BDF6),
            AssetId::Namespace(_)
        ));
        assert!(matches!(AssetId::from_u64(0x0DC6_7FBE_1CAD_29E3), AssetId::Mosaic(_)));
    }

    #[test]
    fn properties_flags_and_duration() {
        let props = MosaicProperties {
            supply_mutable: true,
            transferable: true,
            divisibility: 6,
            duration: 0,
        };
        assert_eq!(props.flags(), 0x03);
        assert!(props.optional_properties().is_empty());

        let props = MosaicProperties {
            duration: 1000,
            ..props
        };
        assert_eq!(props.optional_properties(), vec![(PROPERTY_DURATION, 1000)]);
    }
}
