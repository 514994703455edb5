//! # Key Management
//!
//! Ed25519 keypairs under the two derivation schemes the chain accepts.
//!
//! The schemes differ only in the 512-bit hash used inside Ed25519: for
//! secret-key expansion, the nonce, and the challenge.
//!
//! | Scheme         | Tag | Inner hash | Selected by           |
//! |----------------|-----|------------|-----------------------|
//! | `Ed25519Sha3`  | 1   | SHA3-512   | account version != 2  |
//! | `Ed25519Sha2`  | 2   | SHA-512    | account version 2     |
//!
//! The same private key therefore yields two different public keys (and two
//! different addresses) depending on the scheme. The tag ends up in bits
//! 16..24 of every signed transaction's version field so the verifier knows
//! which hash to use.
//!
//! Key bytes are never logged and `KeyPair` has no `Serialize`.

use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha512;
use sha3::{Digest, Sha3_512};
use std::fmt;
use thiserror::Error;

use crate::config::{PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
use crate::error::SdkError;

/// Errors that can occur during key operations.
///
/// Messages never include key bytes.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid private key: expected 64 hex characters")]
    InvalidPrivateKey,

    #[error("invalid public key: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("derivation scheme is unset; pick Ed25519Sha3 or Ed25519Sha2")]
    UnsetScheme,
}

// ---------------------------------------------------------------------------
// DerivationScheme
// ---------------------------------------------------------------------------

/// Selects the hash paired with Ed25519 for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DerivationScheme {
    /// Not yet chosen. Freshly built transactions carry this until signed.
    #[default]
    Unset,
    /// Ed25519 with SHA3-512.
    Ed25519Sha3,
    /// Ed25519 with SHA-512 (RFC 8032).
    Ed25519Sha2,
}

impl DerivationScheme {
    /// Picks the scheme from an account's generation: version 2 accounts
    /// use SHA-512, every other version uses SHA3-512.
    pub fn from_account_version(version: u8) -> Self {
        if version == 2 {
            Self::Ed25519Sha2
        } else {
            Self::Ed25519Sha3
        }
    }

    /// Parses the on-wire tag.
    pub fn from_u8(tag: u8) -> Result<Self, SdkError> {
        match tag {
            0 => Ok(Self::Unset),
            1 => Ok(Self::Ed25519Sha3),
            2 => Ok(Self::Ed25519Sha2),
            other => Err(SdkError::UnsupportedScheme(other)),
        }
    }

    /// The on-wire tag.
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Unset => 0,
            Self::Ed25519Sha3 => 1,
            Self::Ed25519Sha2 => 2,
        }
    }

    fn expand(&self, seed: &[u8; PRIVATE_KEY_SIZE]) -> Result<ExpandedSecretKey, SdkError> {
        let mut expanded = [0u8; 64];
        match self {
            Self::Ed25519Sha3 => expanded.copy_from_slice(&Sha3_512::digest(seed)),
            Self::Ed25519Sha2 => expanded.copy_from_slice(&Sha512::digest(seed)),
            Self::Unset => return Err(KeyError::UnsetScheme.into()),
        }
        Ok(ExpandedSecretKey::from_bytes(&expanded))
    }
}

impl fmt::Display for DerivationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "Unset"),
            Self::Ed25519Sha3 => write!(f, "Ed25519Sha3"),
            Self::Ed25519Sha2 => write!(f, "Ed25519Sha2"),
        }
    }
}

// ---------------------------------------------------------------------------
// PublicKey / Signature
// ---------------------------------------------------------------------------

/// A 32-byte Ed25519 public key as it appears on the wire.
///
/// Not validated as a curve point on construction; [`verify`] rejects
/// invalid points.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    pub const fn new(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SdkError> {
        let arr: [u8; PUBLIC_KEY_SIZE] =
            bytes.try_into().map_err(|_| SdkError::InvalidLength {
                what: "public key",
                expected: PUBLIC_KEY_SIZE,
                got: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, SdkError> {
        Self::from_slice(&hex::decode(s)?)
    }

    /// Uppercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// An all-zero key is the placeholder the REST API reports for
    /// unsigned entities.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PUBLIC_KEY_SIZE]
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

/// A 64-byte Ed25519 signature, `R || S`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    pub const fn new(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SdkError> {
        let arr: [u8; SIGNATURE_SIZE] = bytes.try_into().map_err(|_| SdkError::InvalidLength {
            what: "signature",
            expected: SIGNATURE_SIZE,
            got: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, SdkError> {
        Self::from_slice(&hex::decode(s)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// The `R` half, mixed into the transaction hash.
    pub fn r_part(&self) -> &[u8] {
        &self.0[..32]
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

macro_rules! hex_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                <$ty>::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

hex_serde!(PublicKey);
hex_serde!(Signature);

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// An Ed25519 keypair bound to a derivation scheme.
///
/// # Examples
///
/// ```
/// use sirius_tx::crypto::keys::{DerivationScheme, KeyPair};
///
/// let kp = KeyPair::generate(DerivationScheme::Ed25519Sha3).unwrap();
/// let sig = kp.sign(b"payload").unwrap();
/// assert!(kp.verify(b"payload", &sig).is_ok());
/// ```
#[derive(Clone)]
pub struct KeyPair {
    secret: [u8; PRIVATE_KEY_SIZE],
    public_key: PublicKey,
    scheme: DerivationScheme,
}

impl KeyPair {
    /// Builds a keypair from a 32-byte private key seed.
    pub fn from_seed(seed: [u8; PRIVATE_KEY_SIZE], scheme: DerivationScheme) -> Result<Self, SdkError> {
        let expanded = scheme.expand(&seed)?;
        let public_key = PublicKey(VerifyingKey::from(&expanded).to_bytes());
        Ok(Self {
            secret: seed,
            public_key,
            scheme,
        })
    }

    /// Builds a keypair from a hex-encoded private key.
    pub fn from_private_key(hex_key: &str, scheme: DerivationScheme) -> Result<Self, SdkError> {
        let bytes = hex::decode(hex_key).map_err(|_| KeyError::InvalidPrivateKey)?;
        let seed: [u8; PRIVATE_KEY_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        Self::from_seed(seed, scheme)
    }

    /// Generates a fresh keypair from the OS RNG.
    pub fn generate(scheme: DerivationScheme) -> Result<Self, SdkError> {
        let mut seed = [0u8; PRIVATE_KEY_SIZE];
        OsRng.fill_bytes(&mut seed);
        Self::from_seed(seed, scheme)
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn scheme(&self) -> DerivationScheme {
        self.scheme
    }

    /// Hex-encoded private key. Handle with care.
    pub fn private_key_hex(&self) -> String {
        hex::encode_upper(self.secret)
    }

    /// Signs `message` under this keypair's scheme.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, SdkError> {
        let expanded = self.scheme.expand(&self.secret)?;
        let verifying_key = VerifyingKey::from(&expanded);
        let signature = match self.scheme {
            DerivationScheme::Ed25519Sha3 => {
                raw_sign::<Sha3_512>(&expanded, message, &verifying_key)
            }
            DerivationScheme::Ed25519Sha2 => raw_sign::<Sha512>(&expanded, message, &verifying_key),
            DerivationScheme::Unset => return Err(KeyError::UnsetScheme.into()),
        };
        Ok(Signature(signature.to_bytes()))
    }

    /// Verifies `signature` over `message` against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SdkError> {
        verify(&self.public_key, self.scheme, message, signature)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

/// Verifies an Ed25519 signature under the given derivation scheme.
///
/// Returns [`SdkError::VerificationFailed`] without saying why; an invalid
/// point and a wrong signature look the same to the caller.
pub fn verify(
    public_key: &PublicKey,
    scheme: DerivationScheme,
    message: &[u8],
    signature: &Signature,
) -> Result<(), SdkError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key.as_bytes()).map_err(|_| KeyError::InvalidPublicKey)?;
    let signature = DalekSignature::from_bytes(signature.as_bytes());
    let result = match scheme {
        DerivationScheme::Ed25519Sha3 => raw_verify::<Sha3_512>(&verifying_key, message, &signature),
        DerivationScheme::Ed25519Sha2 => raw_verify::<Sha512>(&verifying_key, message, &signature),
        DerivationScheme::Unset => return Err(KeyError::UnsetScheme.into()),
    };
    result.map_err(|_| SdkError::VerificationFailed)
}
