//! # Accounts
//!
//! An [`Account`] couples a keypair with everything the signing pipeline
//! needs to know about the network it lives on: the network type (through
//! its address) and the generation hash. A [`PublicAccount`] is the
//! key-less view used as a transaction signer or cosignatory.
//!
//! The account `version` selects the derivation scheme: version 2 accounts
//! sign with RFC 8032 Ed25519 (SHA-512), every other version with the
//! SHA3-512 variant.

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::network::NetworkType;
use crate::crypto::hash::Hash;
use crate::crypto::keys::{self, DerivationScheme, KeyPair, PublicKey, Signature};
use crate::error::SdkError;
use crate::transaction::signing::{
    self, CosignatureSignedTransaction, CosignatureTransaction, SignedTransaction,
};
use crate::transaction::Transaction;

/// Account version assigned when none is given.
pub const DEFAULT_ACCOUNT_VERSION: u8 = 1;

// ---------------------------------------------------------------------------
// PublicAccount
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicAccount {
    pub address: Address,
    pub public_key: PublicKey,
    pub version: u8,
}

impl PublicAccount {
    pub fn new(public_key: PublicKey, network_type: NetworkType, version: u8) -> Self {
        Self {
            address: Address::from_public_key(&public_key, network_type),
            public_key,
            version,
        }
    }

    pub fn from_public_key(
        hex_key: &str,
        network_type: NetworkType,
        version: u8,
    ) -> Result<Self, SdkError> {
        Ok(Self::new(PublicKey::from_hex(hex_key)?, network_type, version))
    }

    pub fn network_type(&self) -> NetworkType {
        self.address.network_type()
    }

    pub fn derivation_scheme(&self) -> DerivationScheme {
        DerivationScheme::from_account_version(self.version)
    }

    /// Verifies a signature made by this account over arbitrary data.
    pub fn verify_signature(&self, data: &[u8], signature: &Signature) -> Result<(), SdkError> {
        keys::verify(&self.public_key, self.derivation_scheme(), data, signature)
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A signing account bound to one network deployment.
#[derive(Debug, Clone)]
pub struct Account {
    key_pair: KeyPair,
    public_account: PublicAccount,
    generation_hash: Option<Hash>,
}

impl Account {
    pub fn from_key_pair(
        key_pair: KeyPair,
        network_type: NetworkType,
        version: u8,
        generation_hash: Option<Hash>,
    ) -> Self {
        let public_account = PublicAccount::new(key_pair.public_key(), network_type, version);
        Self {
            key_pair,
            public_account,
            generation_hash,
        }
    }

    pub fn from_private_key(
        hex_key: &str,
        network_type: NetworkType,
        version: u8,
        generation_hash: Option<Hash>,
    ) -> Result<Self, SdkError> {
        let scheme = DerivationScheme::from_account_version(version);
        let key_pair = KeyPair::from_private_key(hex_key, scheme)?;
        Ok(Self::from_key_pair(key_pair, network_type, version, generation_hash))
    }

    /// Creates an account with a random key.
    pub fn generate(
        network_type: NetworkType,
        version: u8,
        generation_hash: Option<Hash>,
    ) -> Result<Self, SdkError> {
        let key_pair = KeyPair::generate(DerivationScheme::from_account_version(version))?;
        Ok(Self::from_key_pair(key_pair, network_type, version, generation_hash))
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub fn public_account(&self) -> &PublicAccount {
        &self.public_account
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_account.public_key
    }

    pub fn address(&self) -> Address {
        self.public_account.address
    }

    pub fn network_type(&self) -> NetworkType {
        self.public_account.network_type()
    }

    pub fn generation_hash(&self) -> Option<&Hash> {
        self.generation_hash.as_ref()
    }

    pub fn derivation_scheme(&self) -> DerivationScheme {
        self.key_pair.scheme()
    }

    /// Signs arbitrary bytes under the account's scheme.
    pub fn sign_data(&self, data: &[u8]) -> Result<Signature, SdkError> {
        self.key_pair.sign(data)
    }

    pub fn sign(&self, tx: &Transaction) -> Result<SignedTransaction, SdkError> {
        signing::sign_transaction(tx, self)
    }

    pub fn sign_with_cosignatures(
        &self,
        tx: &Transaction,
        cosignatories: &[&Account],
    ) -> Result<SignedTransaction, SdkError> {
        signing::sign_with_cosignatures(tx, self, cosignatories)
    }

    pub fn sign_cosignature(
        &self,
        tx: &CosignatureTransaction,
    ) -> Result<CosignatureSignedTransaction, SdkError> {
        tx.sign(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "787225aaff3d2c71f4ffa32d4f19ec4922f3cd869747f267378f81f8e3fcb12d";

    #[test]
    fn account_version_selects_scheme() {
        let v1 = Account::from_private_key(PRIVATE_KEY, NetworkType::MijinTest, 1, None).unwrap();
        let v2 = Account::from_private_key(PRIVATE_KEY, NetworkType::MijinTest, 2, None).unwrap();
        assert_eq!(v1.derivation_scheme(), DerivationScheme::Ed25519Sha3);
        assert_eq!(v2.derivation_scheme(), DerivationScheme::Ed25519Sha2);
        assert_ne!(v1.public_key(), v2.public_key());
        assert_eq!(
            v1.public_account().derivation_scheme(),
            v1.derivation_scheme()
        );
    }

    #[test]
    fn address_follows_network() {
        let account =
            Account::from_private_key(PRIVATE_KEY, NetworkType::MijinTest, 1, None).unwrap();
        assert_eq!(
            account.address().to_raw(),
            "SDRDGFTDLLCB67D4HPGIMIHPNSRYRJRT7DOBGWZY"
        );
        assert_eq!(account.network_type(), NetworkType::MijinTest);
    }

    #[test]
    fn sign_data_verifies_against_public_account() {
        let account = Account::generate(NetworkType::Mijin, 2, None).unwrap();
        let sig = account.sign_data(b"data").unwrap();
        assert!(account.public_account().verify_signature(b"data", &sig).is_ok());
        assert!(account.public_account().verify_signature(b"other", &sig).is_err());
    }

    #[test]
    fn rejects_malformed_private_key() {
        assert!(Account::from_private_key("zz", NetworkType::Mijin, 1, None).is_err());
        assert!(Account::from_private_key("abcd", NetworkType::Mijin, 1, None).is_err());
    }
}
