//! Transfer of mosaics and/or a message to a recipient.
//!
//! ```text
//! recipient:25 | message_size:u16 | mosaics_count:u8 | message | mosaics[id:u64, amount:u64]
//! ```

use bytes::BufMut;

use super::types::EntityType;
use super::Body;
use crate::config::ADDRESS_SIZE;
use crate::error::SdkError;
use crate::model::{Message, Mosaic, Recipient};

const MOSAIC_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTransaction {
    pub recipient: Recipient,
    pub message: Message,
    /// Encoded in the given order.
    pub mosaics: Vec<Mosaic>,
}

impl TransferTransaction {
    pub fn new(recipient: impl Into<Recipient>, mosaics: Vec<Mosaic>, message: Message) -> Self {
        Self {
            recipient: recipient.into(),
            message,
            mosaics,
        }
    }
}

impl Body for TransferTransaction {
    fn entity_type(&self) -> EntityType {
        EntityType::Transfer
    }

    fn body_size(&self) -> usize {
        ADDRESS_SIZE + 2 + 1 + self.message.size() + MOSAIC_SIZE * self.mosaics.len()
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.message.size() > usize::from(u16::MAX) {
            return Err(SdkError::structural(
                "message",
                format!("{} bytes does not fit a u16 size field", self.message.size()),
            ));
        }
        if self.mosaics.len() > usize::from(u8::MAX) {
            return Err(SdkError::structural(
                "mosaics",
                format!("{} mosaics exceeds the limit of 255", self.mosaics.len()),
            ));
        }
        Ok(())
    }

    fn write_body(&self, buf: &mut Vec<u8>) {
        buf.put_slice(&self.recipient.to_bytes());
        buf.put_u16_le(self.message.size() as u16);
        buf.put_u8(self.mosaics.len() as u8);
        buf.put_u8(self.message.message_type.as_u8());
        buf.put_slice(&self.message.payload);
        for mosaic in &self.mosaics {
            buf.put_u64_le(mosaic.asset_id.to_u64());
            buf.put_u64_le(mosaic.amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, MessageType, MosaicId, NamespaceId};

    fn recipient() -> Address {
        Address::from_raw("SDRDGFTDLLCB67D4HPGIMIHPNSRYRJRT7DOBGWZY").unwrap()
    }

    #[test]
    fn body_layout() {
        let tx = TransferTransaction::new(
            recipient(),
            vec![Mosaic::new(MosaicId::new(0x0102).unwrap(), 5)],
            Message::plain("hi"),
        );
        let mut buf = Vec::new();
        tx.write_body(&mut buf);

        assert_eq!(buf.len(), tx.body_size());
        assert_eq!(&buf[..25], recipient().as_bytes());
        assert_eq!(&buf[25..27], &3u16.to_le_bytes());
        assert_eq!(buf[27], 1);
        assert_eq!(&buf[28..31], &[0x00, b'h', b'i']);
        assert_eq!(&buf[31..39], &0x0102u64.to_le_bytes());
        assert_eq!(&buf[39..47], &5u64.to_le_bytes());
    }

    #[test]
    fn alias_recipient_and_namespace_mosaic() {
        let xpx = NamespaceId::from_name("prx.xpx").unwrap();
        let tx = TransferTransaction::new(xpx, vec![Mosaic::new(xpx, 1)], Message::empty());
        let mut buf = Vec::new();
        tx.write_body(&mut buf);
        assert_eq!(buf[0], 0x91);
        assert_eq!(&buf[29..37], &xpx.to_u64().to_le_bytes());
    }

    #[test]
    fn oversized_message_is_rejected() {
        let tx = TransferTransaction::new(
            recipient(),
            vec![],
            Message::raw(MessageType::Plain, vec![0u8; 70_000]),
        );
        assert!(matches!(
            tx.validate(),
            Err(SdkError::Structural { field: "message", .. })
        ));
    }

    #[test]
    fn too_many_mosaics_are_rejected() {
        let mosaics = (0..256u64)
            .map(|i| Mosaic::new(MosaicId::new(i).unwrap(), 1))
            .collect();
        let tx = TransferTransaction::new(recipient(), mosaics, Message::empty());
        assert!(tx.validate().is_err());
    }
}
