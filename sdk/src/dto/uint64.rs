//! 64-bit integers as the REST API writes them: `[lower, higher]` pairs of
//! 32-bit words.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Uint64Dto(pub [u32; 2]);

impl Uint64Dto {
    pub fn to_u64(&self) -> u64 {
        (u64::from(self.0[1]) << 32) | u64::from(self.0[0])
    }
}

impl From<u64> for Uint64Dto {
    fn from(value: u64) -> Self {
        Self([value as u32, (value >> 32) as u32])
    }
}

impl From<Uint64Dto> for u64 {
    fn from(dto: Uint64Dto) -> Self {
        dto.to_u64()
    }
}

impl fmt::Display for Uint64Dto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u64())
    }
}
