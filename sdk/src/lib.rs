// Copyright (c) 2026 Sirius SDK Contributors. MIT License.
// See LICENSE for details.

//! # Sirius Transaction Core
//!
//! Client-side transaction handling for Sirius / Catapult style chains:
//! typed transaction bodies, their canonical little-endian encoding, Ed25519
//! signing under two hash schemes, transaction and unique aggregate hashes,
//! aggregate composition with cosignatures, and decoding of REST JSON.
//!
//! ## Architecture
//!
//! - **config**: wire sizes, offsets and fee strategies.
//! - **crypto**: hashes, keypairs and scheme-aware signatures.
//! - **model**: addresses, namespaces, mosaics, messages, accounts.
//! - **transaction**: bodies, encoder, schemas, signing, hashing, verification.
//! - **dto**: JSON decoding with a parallel batch mapper.
//! - **error**: the crate-wide [`SdkError`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sirius_tx::model::{Account, Address, Message, NetworkType};
//! use sirius_tx::transaction::{sign_transaction, TransactionBuilder, TransferTransaction};
//!
//! let account = Account::generate(NetworkType::MijinTest, 1, None).unwrap();
//! let recipient = Address::from_raw("SDRDGFTDLLCB67D4HPGIMIHPNSRYRJRT7DOBGWZY").unwrap();
//! let tx = TransactionBuilder::new(NetworkType::MijinTest)
//!     .build(TransferTransaction::new(recipient, vec![], Message::plain("hi")))
//!     .unwrap();
//! let signed = sign_transaction(&tx, &account).unwrap();
//! println!("{} {}", signed.hash, signed.payload);
//! ```

pub mod config;
pub mod crypto;
pub mod dto;
pub mod error;
pub mod model;
pub mod transaction;

pub use dto::{decode_transaction, map_transactions, DecodedBatch};
pub use error::{ErrorKind, SdkError};
pub use transaction::{
    sign_transaction, sign_with_cosignatures, SignedTransaction, Transaction, TransactionBuilder,
};
