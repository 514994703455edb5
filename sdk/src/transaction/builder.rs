//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] carries everything a header needs that the body
//! does not: network, deadline, fee and optional signer. `build` takes the
//! body, validates it, picks the body version from its entity type and fills
//! in the max fee from the selected [`FeeCalculationStrategy`].
//!
//! The builder does not sign; that happens in [`super::signing`].

use chrono::Duration;

use super::header::AbstractTransaction;
use super::{Body, Transaction, TransactionBody};
use crate::config::FeeCalculationStrategy;
use crate::error::SdkError;
use crate::model::{Deadline, NetworkType, PublicAccount};

/// Deadline applied when none is set: one hour from `build()`.
pub const DEFAULT_DEADLINE_HOURS: i64 = 1;

/// Fluent builder for unsigned [`Transaction`]s.
///
/// # Usage
///
/// ```rust,no_run
/// use sirius_tx::model::{Address, Message, NetworkType};
/// use sirius_tx::transaction::{TransactionBuilder, TransferTransaction};
/// use sirius_tx::config::FeeCalculationStrategy;
///
/// let recipient = Address::from_raw("SDRDGFTDLLCB67D4HPGIMIHPNSRYRJRT7DOBGWZY").unwrap();
/// let tx = TransactionBuilder::new(NetworkType::MijinTest)
///     .fee_strategy(FeeCalculationStrategy::Low)
///     .build(TransferTransaction::new(recipient, vec![], Message::plain("hello")))
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    network_type: NetworkType,
    deadline: Option<Deadline>,
    max_fee: Option<u64>,
    fee_strategy: FeeCalculationStrategy,
    signer: Option<PublicAccount>,
    version: Option<u16>,
}

impl TransactionBuilder {
    /// Creates a builder for `network_type`.
    ///
    /// Defaults:
    /// - `deadline`: one hour after `build()`
    /// - `max_fee`: computed by the fee strategy, [`FeeCalculationStrategy::Zero`]
    /// - `version`: the current version of the body's entity type
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            network_type,
            deadline: None,
            max_fee: None,
            fee_strategy: FeeCalculationStrategy::default(),
            signer: None,
            version: None,
        }
    }

    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the max fee explicitly, overriding the fee strategy.
    pub fn max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = Some(max_fee);
        self
    }

    pub fn fee_strategy(mut self, strategy: FeeCalculationStrategy) -> Self {
        self.fee_strategy = strategy;
        self
    }

    /// Sets the signer, required for transactions that go into an aggregate.
    pub fn signer(mut self, signer: PublicAccount) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Overrides the body version. Only needed against older nodes.
    pub fn version(mut self, version: u16) -> Self {
        self.version = Some(version);
        self
    }

    /// Consumes the builder and produces an unsigned [`Transaction`].
    pub fn build(self, body: impl Into<TransactionBody>) -> Result<Transaction, SdkError> {
        let body = body.into();
        body.validate()?;

        let deadline = match self.deadline {
            Some(deadline) => deadline,
            None => Deadline::after(Duration::hours(DEFAULT_DEADLINE_HOURS))?,
        };
        let version = self
            .version
            .unwrap_or_else(|| body.entity_type().version());

        let mut header = AbstractTransaction::new(self.network_type, version, deadline, 0);
        header.signer = self.signer;
        let mut tx = Transaction::new(header, body);
        tx.header.max_fee = match self.max_fee {
            Some(max_fee) => max_fee,
            None => self.fee_strategy.max_fee_for(tx.size()),
        };
        Ok(tx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
