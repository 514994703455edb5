//! Network discriminators.
//!
//! The network byte appears twice on the wire: as the first byte of every
//! raw address and as the top byte of every transaction version field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SdkError;

/// Known network deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    Mainnet,
    Testnet,
    Privatenet,
    PrivateTest,
    Mijin,
    MijinTest,
}

impl NetworkType {
    pub const ALL: [NetworkType; 6] = [
        Self::Mainnet,
        Self::Testnet,
        Self::Privatenet,
        Self::PrivateTest,
        Self::Mijin,
        Self::MijinTest,
    ];

    /// The on-wire network byte.
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Mainnet => 0xB8,
            Self::Testnet => 0xA8,
            Self::Privatenet => 0xC8,
            Self::PrivateTest => 0xB0,
            Self::Mijin => 0x60,
            Self::MijinTest => 0x90,
        }
    }

    pub fn from_u8(byte: u8) -> Result<Self, SdkError> {
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.as_u8() == byte)
            .ok_or(SdkError::UnknownNetworkType(byte))
    }

    /// First character of a base32 address on this network.
    pub fn address_prefix(&self) -> char {
        match self {
            Self::Mainnet => 'X',
            Self::Testnet => 'V',
            Self::Privatenet => 'Z',
            Self::PrivateTest => 'W',
            Self::Mijin => 'M',
            Self::MijinTest => 'S',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mainnet => "MAIN_NET",
            Self::Testnet => "TEST_NET",
            Self::Privatenet => "PRIVATE",
            Self::PrivateTest => "PRIVATE_TEST",
            Self::Mijin => "MIJIN",
            Self::MijinTest => "MIJIN_TEST",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the canonical names (`MIJIN_TEST`) as well as relaxed spellings
/// (`mijin-test`, `mijintest`).
impl FromStr for NetworkType {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.name().replace('_', "") == normalized)
            .ok_or_else(|| SdkError::structural("network_type", format!("unknown network {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_roundtrip() {
        for n in NetworkType::ALL {
            assert_eq!(NetworkType::from_u8(n.as_u8()).unwrap(), n);
        }
        assert!(matches!(
            NetworkType::from_u8(0x01),
            Err(SdkError::UnknownNetworkType(0x01))
        ));
    }

    #[test]
    fn parse_relaxed_names() {
        assert_eq!("MIJIN_TEST".parse::<NetworkType>().unwrap(), NetworkType::MijinTest);
        assert_eq!("mijin-test".parse::<NetworkType>().unwrap(), NetworkType::MijinTest);
        assert_eq!("private".parse::<NetworkType>().unwrap(), NetworkType::Privatenet);
        assert!("moonnet".parse::<NetworkType>().is_err());
    }
}
