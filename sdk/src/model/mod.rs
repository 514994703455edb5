//! # Domain Model
//!
//! Identifier and value types shared by every transaction variant:
//! networks, addresses, namespaces, mosaics, deadlines, messages and
//! accounts. None of these know about the wire layout of a whole
//! transaction; they only encode themselves.

pub mod account;
pub mod address;
pub mod deadline;
pub mod message;
pub mod mosaic;
pub mod namespace;
pub mod network;

pub use account::{Account, PublicAccount};
pub use address::{Address, Recipient};
pub use deadline::Deadline;
pub use message::{Message, MessageType};
pub use mosaic::{AssetId, Mosaic, MosaicId, MosaicNonce, MosaicProperties, MosaicSupplyType};
pub use namespace::{NamespaceId, NamespaceType};
pub use network::NetworkType;
