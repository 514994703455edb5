//! # Aggregate Transactions
//!
//! An aggregate bundles inner transactions that execute atomically. Each
//! inner transaction is written in its embedded form (no signature, max fee
//! or deadline), so
//!
//! ```text
//! size(aggregate) = 126 + Σ (size(inner) - 64 - 8 - 8)
//! ```
//!
//! Complete aggregates carry every required signature when announced.
//! Bonded aggregates are announced first and collect cosignatures on the
//! network, guarded by a hash lock.
//!
//! The encoded body never includes cosignatures. They are appended to a
//! signed payload by the cosignature protocol in [`super::signing`].

use bytes::BufMut;
use serde::{Deserialize, Serialize};

use super::types::EntityType;
use super::{read_u32_le, Body, Transaction};
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::SdkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateKind {
    Complete,
    Bonded,
}

/// A signature by a cosignatory over the aggregate's hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateCosignature {
    pub signer: PublicKey,
    pub signature: Signature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateTransaction {
    pub kind: AggregateKind,
    /// Every inner transaction must have its signer set.
    pub inner: Vec<Transaction>,
    /// Cosignatures known for this aggregate, e.g. from a REST response.
    pub cosignatures: Vec<AggregateCosignature>,
}

impl AggregateTransaction {
    pub fn complete(inner: Vec<Transaction>) -> Self {
        Self {
            kind: AggregateKind::Complete,
            inner,
            cosignatures: Vec::new(),
        }
    }

    pub fn bonded(inner: Vec<Transaction>) -> Self {
        Self {
            kind: AggregateKind::Bonded,
            inner,
            cosignatures: Vec::new(),
        }
    }

    pub fn is_bonded(&self) -> bool {
        self.kind == AggregateKind::Bonded
    }

    /// Walks each embedded record of an encoded aggregate body against the
    /// schema of the inner transaction it was written from.
    pub(crate) fn check_embedded(&self, body: &[u8]) -> Result<(), SdkError> {
        let mut offset = 4;
        for inner in &self.inner {
            let declared = inner.embedded_size();
            let size = read_u32_le(body, offset).map(|s| s as usize);
            if size != Some(declared) || offset + declared > body.len() {
                return Err(SdkError::SizeMismatch {
                    entity_type: inner.entity_type().value(),
                    declared,
                    actual: size.unwrap_or(0),
                });
            }
            inner
                .schema()
                .embedded_layout(&body[offset..offset + declared])?;
            offset += declared;
        }
        Ok(())
    }
}

impl Body for AggregateTransaction {
    fn entity_type(&self) -> EntityType {
        match self.kind {
            AggregateKind::Complete => EntityType::AggregateComplete,
            AggregateKind::Bonded => EntityType::AggregateBonded,
        }
    }

    fn body_size(&self) -> usize {
        4 + self
            .inner
            .iter()
            .map(Transaction::embedded_size)
            .sum::<usize>()
    }

    fn validate(&self) -> Result<(), SdkError> {
        for inner in &self.inner {
            let entity_type = inner.entity_type();
            if entity_type.is_aggregate() {
                return Err(SdkError::structural(
                    "inner transaction",
                    "aggregates cannot be nested",
                ));
            }
            if inner.header.signer.is_none() {
                return Err(SdkError::MissingSigner {
                    entity_type: entity_type.value(),
                });
            }
            inner.body.validate()?;
        }
        if u32::try_from(self.body_size() - 4).is_err() {
            return Err(SdkError::structural(
                "transactions",
                "payload size overflows u32",
            ));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u32_le((self.body_size() - 4) as u32);
        for inner in &self.inner {
            inner.write_embedded(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AGGREGATE_HEADER_SIZE, EMBEDDING_STRIPPED_SIZE};
    use crate::model::{
        Deadline, Message, Mosaic, MosaicId, MosaicSupplyType, NamespaceId, NetworkType,
        PublicAccount,
    };
    use crate::transaction::{
        AbstractTransaction, MosaicSupplyChangeTransaction, TransferTransaction,
    };

    fn header(version: u16) -> AbstractTransaction {
        AbstractTransaction::new(
            NetworkType::MijinTest,
            version,
            Deadline::from_network_timestamp(10),
            7,
        )
    }

    fn signer(byte: u8) -> PublicAccount {
        PublicAccount::new(PublicKey::new([byte; 32]), NetworkType::MijinTest, 1)
    }

    fn transfer(text: &str) -> Transaction {
        let body = TransferTransaction::new(
            NamespaceId::new(0x8000_0000_0000_0002),
            vec![Mosaic::new(MosaicId::new(9).unwrap(), 1)],
            Message::plain(text),
        );
        Transaction::new(header(3), body).to_aggregate(signer(1))
    }

    fn supply_change() -> Transaction {
        let body = MosaicSupplyChangeTransaction {
            asset_id: MosaicId::new(9).unwrap().into(),
            direction: MosaicSupplyType::Increase,
            delta: 1_000,
        };
        Transaction::new(header(2), body).to_aggregate(signer(2))
    }

    #[test]
    fn size_law() {
        let inner = vec![transfer("a"), supply_change(), transfer("longer message")];
        let expected = AGGREGATE_HEADER_SIZE
            + inner
                .iter()
                .map(|t| t.size() - EMBEDDING_STRIPPED_SIZE)
                .sum::<usize>();
        let aggregate = Transaction::new(header(2), AggregateTransaction::complete(inner));
        assert_eq!(aggregate.size(), expected);
        assert_eq!(aggregate.bytes().unwrap().len(), expected);
    }

    #[test]
    fn body_splices_embedded_bytes_in_order() {
        let inner = vec![transfer("x"), supply_change()];
        let aggregate = Transaction::new(header(2), AggregateTransaction::bonded(inner.clone()));
        assert_eq!(aggregate.entity_type(), EntityType::AggregateBonded);

        let bytes = aggregate.bytes().unwrap();
        let mut expected = Vec::new();
        for tx in &inner {
            expected.extend(tx.embedded_bytes().unwrap());
        }
        assert_eq!(read_u32_le(&bytes, 122), Some(expected.len() as u32));
        assert_eq!(&bytes[AGGREGATE_HEADER_SIZE..], expected.as_slice());
    }

    #[test]
    fn inner_without_signer_is_rejected() {
        let mut unsigned = transfer("x");
        unsigned.header.signer = None;
        let aggregate = Transaction::new(header(2), AggregateTransaction::complete(vec![unsigned]));
        assert!(matches!(
            aggregate.bytes(),
            Err(SdkError::MissingSigner { entity_type: 0x4154 })
        ));
    }

    #[test]
    fn nested_aggregates_are_rejected() {
        let nested = Transaction::new(header(2), AggregateTransaction::complete(vec![transfer("x")]))
            .to_aggregate(signer(3));
        let aggregate = Transaction::new(header(2), AggregateTransaction::complete(vec![nested]));
        assert!(matches!(
            aggregate.bytes(),
            Err(SdkError::Structural { field: "inner transaction", .. })
        ));
    }

    #[test]
    fn empty_aggregate_is_header_plus_payload_size() {
        let aggregate = Transaction::new(header(2), AggregateTransaction::complete(vec![]));
        let bytes = aggregate.bytes().unwrap();
        assert_eq!(bytes.len(), AGGREGATE_HEADER_SIZE);
        assert_eq!(read_u32_le(&bytes, 122), Some(0));
    }
}
