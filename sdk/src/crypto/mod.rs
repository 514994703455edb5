//! # Cryptographic Primitives
//!
//! Hashing and Ed25519 signing for the transaction core.
//!
//! - **hash**: SHA3-256 (transaction ids, addresses, id generation) plus
//!   the SHA-256 / Keccak / RIPEMD-160 functions named by lock secrets.
//! - **keys**: keypairs bound to a [`DerivationScheme`], public keys,
//!   signatures and scheme-aware verification.
//!
//! Everything here wraps `ed25519-dalek`, `sha2`, `sha3` and `ripemd`. The
//! only non-default move is the SHA3-512 flavour of Ed25519, which goes
//! through `ed25519_dalek::hazmat` with a custom digest rather than any
//! hand-written curve arithmetic.

pub mod hash;
pub mod keys;

pub use hash::{hash160, keccak_256, sha256, sha3_256, sha3_256_multi, Hash};
pub use keys::{verify, DerivationScheme, KeyError, KeyPair, PublicKey, Signature};
