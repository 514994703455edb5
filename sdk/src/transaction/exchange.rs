//! # Exchange Offers
//!
//! On-chain order book: post offers, take (exchange against) existing
//! offers, and withdraw offers.
//!
//! ```text
//! add:     count:u8 | offers[mosaic_id:u64, mosaic_amount:u64, cost:u64, type:u8, duration:u64]
//! take:    count:u8 | offers[mosaic_id:u64, mosaic_amount:u64, cost:u64, type:u8, owner:32]
//! remove:  count:u8 | offers[mosaic_id:u64, type:u8]
//! ```

use bytes::BufMut;
use serde::{Deserialize, Serialize};

use super::types::EntityType;
use super::Body;
use crate::config::PUBLIC_KEY_SIZE;
use crate::crypto::keys::PublicKey;
use crate::error::SdkError;
use crate::model::{AssetId, Mosaic};

const OFFER_SIZE: usize = 8 + 8 + 8 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferType {
    Sell,
    Buy,
}

impl OfferType {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Sell => 0,
            Self::Buy => 1,
        }
    }

    pub fn from_u8(value: u8) -> Result<Self, SdkError> {
        match value {
            0 => Ok(Self::Sell),
            1 => Ok(Self::Buy),
            other => Err(SdkError::dto("offerType", format!("unknown value {other}"))),
        }
    }

    /// The type an offer must have to be taken by this one.
    pub fn counter(&self) -> Self {
        match self {
            Self::Sell => Self::Buy,
            Self::Buy => Self::Sell,
        }
    }
}

fn check_count(field: &'static str, count: usize) -> Result<(), SdkError> {
    if count == 0 {
        return Err(SdkError::structural(field, "no offers"));
    }
    if count > usize::from(u8::MAX) {
        return Err(SdkError::structural(
            field,
            format!("{count} offers exceeds the limit of 255"),
        ));
    }
    Ok(())
}

fn put_offer(buf: &mut Vec<u8>, mosaic: &Mosaic, cost: u64, offer_type: OfferType) {
    buf.put_u64_le(mosaic.asset_id.to_u64());
    buf.put_u64_le(mosaic.amount);
    buf.put_u64_le(cost);
    buf.put_u8(offer_type.as_u8());
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOffer {
    pub mosaic: Mosaic,
    pub cost: u64,
    pub offer_type: OfferType,
    /// Blocks the offer stays open.
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddExchangeOfferTransaction {
    pub offers: Vec<AddOffer>,
}

impl Body for AddExchangeOfferTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::AddExchangeOffer
    }

    fn body_size(&self) -> usize {
        1 + self.offers.len() * (OFFER_SIZE + 8)
    }

    fn validate(&self) -> Result<(), SdkError> {
        check_count("offers", self.offers.len())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u8(self.offers.len() as u8);
        for offer in &self.offers {
            put_offer(buf, &offer.mosaic, offer.cost, offer.offer_type);
            buf.put_u64_le(offer.duration);
        }
    }
}

// ---------------------------------------------------------------------------
// Exchange
// ---------------------------------------------------------------------------

/// Takes part of an existing offer posted by `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeConfirmation {
    pub mosaic: Mosaic,
    pub cost: u64,
    pub offer_type: OfferType,
    pub owner: PublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOfferTransaction {
    pub offers: Vec<ExchangeConfirmation>,
}

impl Body for ExchangeOfferTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::ExchangeOffer
    }

    fn body_size(&self) -> usize {
        1 + self.offers.len() * (OFFER_SIZE + PUBLIC_KEY_SIZE)
    }

    fn validate(&self) -> Result<(), SdkError> {
        check_count("offers", self.offers.len())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u8(self.offers.len() as u8);
        for offer in &self.offers {
            put_offer(buf, &offer.mosaic, offer.cost, offer.offer_type);
            buf.put_slice(offer.owner.as_bytes());
        }
    }
}

// ---------------------------------------------------------------------------
// Remove
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOffer {
    pub asset_id: AssetId,
    pub offer_type: OfferType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveExchangeOfferTransaction {
    pub offers: Vec<RemoveOffer>,
}

impl Body for RemoveExchangeOfferTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::RemoveExchangeOffer
    }

    fn body_size(&self) -> usize {
        1 + self.offers.len() * 9
    }

    fn validate(&self) -> Result<(), SdkError> {
        check_count("offers", self.offers.len())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_u8(self.offers.len() as u8);
        for offer in &self.offers {
            buf.put_u64_le(offer.asset_id.to_u64());
            buf.put_u8(offer.offer_type.as_u8());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MosaicId;

    fn storage() -> Mosaic {
        Mosaic::new(MosaicId::new(0x6C5D_6875_08AC_9D75).unwrap(), 2)
    }

    #[test]
    fn add_offer_layout() {
        let tx = AddExchangeOfferTransaction {
            offers: vec![AddOffer {
                mosaic: storage(),
                cost: 2,
                offer_type: OfferType::Sell,
                duration: 1,
            }],
        };
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf.len(), 34);
        assert_eq!(buf.len(), tx.body_size());
        assert_eq!(buf[0], 1);
        assert_eq!(&buf[9..17], &2u64.to_le_bytes());
        assert_eq!(&buf[17..25], &2u64.to_le_bytes());
        assert_eq!(buf[25], 0);
        assert_eq!(&buf[26..34], &1u64.to_le_bytes());
    }

    #[test]
    fn exchange_offer_carries_owner() {
        let tx = ExchangeOfferTransaction {
            offers: vec![ExchangeConfirmation {
                mosaic: storage(),
                cost: 5,
                offer_type: OfferType::Buy,
                owner: PublicKey::new([3; 32]),
            }],
        };
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf.len(), 1 + 57);
        assert_eq!(buf[25], 1);
        assert_eq!(&buf[26..], &[3u8; 32]);
    }

    #[test]
    fn remove_offer_layout() {
        let tx = RemoveExchangeOfferTransaction {
            offers: vec![
                RemoveOffer {
                    asset_id: storage().asset_id,
                    offer_type: OfferType::Sell,
                },
                RemoveOffer {
                    asset_id: storage().asset_id,
                    offer_type: OfferType::Buy,
                },
            ],
        };
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf.len(), 19);
        assert_eq!(buf[9], 0);
        assert_eq!(buf[18], 1);
    }

    #[test]
    fn empty_offer_lists_are_rejected() {
        assert!(AddExchangeOfferTransaction { offers: vec![] }.validate().is_err());
        assert!(ExchangeOfferTransaction { offers: vec![] }.validate().is_err());
        assert!(RemoveExchangeOfferTransaction { offers: vec![] }.validate().is_err());
    }

    #[test]
    fn counter_offer_type() {
        assert_eq!(OfferType::Sell.counter(), OfferType::Buy);
        assert_eq!(OfferType::from_u8(1).unwrap(), OfferType::Buy);
        assert!(OfferType::from_u8(2).is_err());
    }
}
