//! The header every transaction variant carries, and the network-assigned
//! metadata attached after confirmation.

use serde::{Deserialize, Serialize};

use crate::crypto::hash::Hash;
use crate::crypto::keys::{DerivationScheme, Signature};
use crate::error::SdkError;
use crate::model::{Deadline, NetworkType, PublicAccount};

/// Fields shared by every transaction variant.
///
/// `signature` and `signer` stay `None` on freshly built transactions. The
/// encoder always writes zero placeholders for them; signing patches the
/// real values into the encoded buffer, never into this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractTransaction {
    pub network_type: NetworkType,
    /// Body version, the low 16 bits of the version field.
    pub version: u16,
    /// Written into bits 16..24 of the version field.
    pub derivation_scheme: DerivationScheme,
    pub deadline: Deadline,
    pub max_fee: u64,
    pub signature: Option<Signature>,
    /// Required before a transaction can be embedded in an aggregate.
    pub signer: Option<PublicAccount>,
    pub info: Option<TransactionInfo>,
}

impl AbstractTransaction {
    pub fn new(network_type: NetworkType, version: u16, deadline: Deadline, max_fee: u64) -> Self {
        Self {
            network_type,
            version,
            derivation_scheme: DerivationScheme::Unset,
            deadline,
            max_fee,
            signature: None,
            signer: None,
            info: None,
        }
    }

    /// `network << 24 | scheme << 16 | version` under `scheme`.
    pub fn version_field(&self, scheme: DerivationScheme) -> u32 {
        (u32::from(self.network_type.as_u8()) << 24)
            | (u32::from(scheme.as_u8()) << 16)
            | u32::from(self.version)
    }

    pub fn hash(&self) -> Option<&Hash> {
        self.info.as_ref().and_then(|info| info.hash.as_ref())
    }
}

/// The three parts of a wire version field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionField {
    pub network_type: NetworkType,
    pub derivation_scheme: DerivationScheme,
    pub version: u16,
}

impl VersionField {
    pub fn parse(raw: u32) -> Result<Self, SdkError> {
        Ok(Self {
            network_type: NetworkType::from_u8((raw >> 24) as u8)?,
            derivation_scheme: DerivationScheme::from_u8((raw >> 16) as u8)?,
            version: raw as u16,
        })
    }
}

/// Metadata the network attaches to a transaction once it is announced or
/// confirmed. Never part of the encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub height: u64,
    pub index: Option<u32>,
    pub id: Option<String>,
    pub hash: Option<Hash>,
    pub merkle_component_hash: Option<Hash>,
    pub aggregate_hash: Option<Hash>,
    pub aggregate_id: Option<String>,
    /// Hash identifying this transaction inside its aggregate.
    pub unique_aggregate_hash: Option<Hash>,
}

impl TransactionInfo {
    /// Included in a block.
    pub fn is_confirmed(&self) -> bool {
        self.height > 0
    }

    /// Announced but waiting for a block.
    pub fn is_unconfirmed(&self) -> bool {
        self.height == 0
            && self.hash.is_some()
            && self.hash == self.merkle_component_hash
    }

    /// Announced and waiting for cosignatures.
    pub fn has_missing_signatures(&self) -> bool {
        self.height == 0
            && self.hash.is_some()
            && self.merkle_component_hash.is_some()
            && self.hash != self.merkle_component_hash
    }

    pub fn is_inner(&self) -> bool {
        self.aggregate_hash.is_some() || self.aggregate_id.is_some()
    }
}
