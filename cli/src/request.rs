//! JSON requests accepted by `sign`.
//!
//! ```json
//! {
//!   "kind": "transfer",
//!   "recipient": "SDRDGFTDLLCB67D4HPGIMIHPNSRYRJRT7DOBGWZY",
//!   "mosaics": [{ "id": "0DC67FBE1CAD29E3", "amount": 10 }],
//!   "message": "hello",
//!   "fee": "low"
//! }
//! ```
//!
//! A recipient starting with `@` is a namespace alias (`@sirius.tx`).
//! Aggregates list their inner requests under `transactions`; each inner
//! request may name its signer's public key and defaults to the initiator.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use sirius_tx::config::FeeCalculationStrategy;
use sirius_tx::crypto::keys::PublicKey;
use sirius_tx::model::{
    Address, AssetId, Deadline, Message, Mosaic, NamespaceId, NetworkType, PublicAccount,
    Recipient,
};
use sirius_tx::transaction::{
    AddExchangeOfferTransaction, AddOffer, AggregateTransaction, OfferType, Transaction,
    TransactionBody, TransactionBuilder, TransferTransaction,
};

/// A request file: one body plus optional header settings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    #[serde(flatten)]
    pub body: BodyRequest,
    #[serde(default)]
    pub fee: FeeArg,
    /// Overrides `fee` when set.
    pub max_fee: Option<u64>,
    /// Raw network timestamp in milliseconds. Defaults to one hour from now.
    pub deadline: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeArg {
    #[default]
    Zero,
    Low,
    Middle,
    High,
}

impl From<FeeArg> for FeeCalculationStrategy {
    fn from(arg: FeeArg) -> Self {
        match arg {
            FeeArg::Zero => FeeCalculationStrategy::Zero,
            FeeArg::Low => FeeCalculationStrategy::Low,
            FeeArg::Middle => FeeCalculationStrategy::Middle,
            FeeArg::High => FeeCalculationStrategy::High,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BodyRequest {
    Transfer(TransferRequest),
    ExchangeOffer(ExchangeOfferRequest),
    Aggregate(AggregateRequest),
}

#[derive(Debug, Deserialize)]
pub struct MosaicRequest {
    /// 16 hex digits, mosaic or namespace id.
    pub id: String,
    pub amount: u64,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub recipient: String,
    #[serde(default)]
    pub mosaics: Vec<MosaicRequest>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OfferTypeArg {
    Sell,
    Buy,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    pub mosaic_id: String,
    pub amount: u64,
    pub cost: u64,
    #[serde(rename = "type")]
    pub offer_type: OfferTypeArg,
    pub duration: u64,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeOfferRequest {
    pub offers: Vec<OfferRequest>,
}

#[derive(Debug, Deserialize)]
pub struct InnerRequest {
    /// Public key of the inner signer. Defaults to the initiator.
    pub signer: Option<String>,
    #[serde(flatten)]
    pub body: BodyRequest,
}

#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    #[serde(default)]
    pub bonded: bool,
    pub transactions: Vec<InnerRequest>,
}

fn parse_id(hex_id: &str) -> Result<AssetId> {
    let id = u64::from_str_radix(hex_id, 16).with_context(|| format!("bad id {hex_id}"))?;
    Ok(AssetId::from_u64(id))
}

fn parse_recipient(value: &str) -> Result<Recipient> {
    match value.strip_prefix('@') {
        Some(name) => Ok(NamespaceId::from_name(name)?.into()),
        None => Ok(Address::from_raw(value)?.into()),
    }
}

impl BodyRequest {
    fn into_body(self, network: NetworkType, initiator: &PublicAccount) -> Result<TransactionBody> {
        let body = match self {
            Self::Transfer(transfer) => {
                let mosaics = transfer
                    .mosaics
                    .iter()
                    .map(|m| Ok(Mosaic::new(parse_id(&m.id)?, m.amount)))
                    .collect::<Result<Vec<_>>>()?;
                let message = if transfer.message.is_empty() {
                    Message::empty()
                } else {
                    Message::plain(&transfer.message)
                };
                TransferTransaction::new(parse_recipient(&transfer.recipient)?, mosaics, message)
                    .into()
            }
            Self::ExchangeOffer(exchange) => {
                let offers = exchange
                    .offers
                    .iter()
                    .map(|o| {
                        Ok(AddOffer {
                            mosaic: Mosaic::new(parse_id(&o.mosaic_id)?, o.amount),
                            cost: o.cost,
                            offer_type: match o.offer_type {
                                OfferTypeArg::Sell => OfferType::Sell,
                                OfferTypeArg::Buy => OfferType::Buy,
                            },
                            duration: o.duration,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                AddExchangeOfferTransaction { offers }.into()
            }
            Self::Aggregate(aggregate) => {
                let inner = aggregate
                    .transactions
                    .into_iter()
                    .map(|request| request.build(network, initiator))
                    .collect::<Result<Vec<_>>>()?;
                if aggregate.bonded {
                    AggregateTransaction::bonded(inner).into()
                } else {
                    AggregateTransaction::complete(inner).into()
                }
            }
        };
        Ok(body)
    }
}

impl InnerRequest {
    fn build(self, network: NetworkType, initiator: &PublicAccount) -> Result<Transaction> {
        if matches!(self.body, BodyRequest::Aggregate(_)) {
            bail!("aggregates cannot contain aggregates");
        }
        let signer = match &self.signer {
            Some(key) => PublicAccount::new(PublicKey::from_hex(key)?, network, initiator.version),
            None => *initiator,
        };
        let body = self.body.into_body(network, initiator)?;
        Ok(TransactionBuilder::new(network).signer(signer).build(body)?)
    }
}

impl SignRequest {
    /// Builds the unsigned transaction for `initiator` on `network`.
    pub fn build(self, network: NetworkType, initiator: &PublicAccount) -> Result<Transaction> {
        let mut builder = TransactionBuilder::new(network).fee_strategy(self.fee.into());
        if let Some(max_fee) = self.max_fee {
            builder = builder.max_fee(max_fee);
        }
        if let Some(deadline) = self.deadline {
            builder = builder.deadline(Deadline::from_network_timestamp(deadline));
        }
        let body = self.body.into_body(network, initiator)?;
        Ok(builder.build(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sirius_tx::transaction::EntityType;

    const PUBLIC_KEY: &str = "1026D70E1954775749C6811084D6450A3184D977383F0E4282CD47118AF37755";

    fn initiator() -> PublicAccount {
        PublicAccount::from_public_key(PUBLIC_KEY, NetworkType::MijinTest, 1).unwrap()
    }

    #[test]
    fn transfer_request_builds_with_fee() {
        let request: SignRequest = serde_json::from_str(
            r#"{
                "kind": "transfer",
                "recipient": "SDRDGFTDLLCB67D4HPGIMIHPNSRYRJRT7DOBGWZY",
                "mosaics": [{ "id": "0DC67FBE1CAD29E3", "amount": 10 }],
                "message": "hello",
                "fee": "low",
                "deadline": 1000
            }"#,
        )
        .unwrap();
        let tx = request.build(NetworkType::MijinTest, &initiator()).unwrap();
        assert_eq!(tx.entity_type(), EntityType::Transfer);
        assert_eq!(tx.header.max_fee, tx.size() as u64 * 250);
        assert_eq!(tx.header.deadline.to_network_timestamp(), 1000);
    }

    #[test]
    fn alias_recipient() {
        assert!(matches!(
            parse_recipient("@sirius").unwrap(),
            Recipient::Alias(_)
        ));
        assert!(parse_recipient("not-an-address").is_err());
    }

    #[test]
    fn aggregate_request_defaults_inner_signer() {
        let request: SignRequest = serde_json::from_str(
            r#"{
                "kind": "aggregate",
                "bonded": true,
                "transactions": [
                    { "kind": "exchangeOffer", "offers": [
                        { "mosaicId": "0DC67FBE1CAD29E3", "amount": 2, "cost": 2, "type": "sell", "duration": 1 }
                    ]},
                    { "kind": "transfer", "recipient": "@sirius", "signer": "0000000000000000000000000000000000000000000000000000000000000001" }
                ]
            }"#,
        )
        .unwrap();
        let tx = request.build(NetworkType::MijinTest, &initiator()).unwrap();
        let aggregate = tx.as_aggregate().unwrap();
        assert!(aggregate.is_bonded());
        assert_eq!(aggregate.inner[0].header.signer, Some(initiator()));
        assert_ne!(aggregate.inner[1].header.signer, Some(initiator()));
    }

    #[test]
    fn nested_aggregate_request_is_rejected() {
        let request: SignRequest = serde_json::from_str(
            r#"{ "kind": "aggregate", "transactions": [
                { "kind": "aggregate", "transactions": [] }
            ]}"#,
        )
        .unwrap();
        assert!(request.build(NetworkType::MijinTest, &initiator()).is_err());
    }
}
