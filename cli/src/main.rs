// Copyright (c) 2026 Sirius SDK Contributors. MIT License.
// See LICENSE for details.

//! # Sirius Transaction CLI
//!
//! Entry point for the `sirius-tx-cli` binary. Parses CLI arguments,
//! initializes logging, and runs one of:
//!
//! - `sign`    build and sign a transaction from a JSON request
//! - `cosign`  cosign an aggregate bonded hash
//! - `decode`  decode a REST transaction array through the batch decoder
//! - `version` print build version information
//!
//! Results go to stdout as JSON; logs go to stderr.

mod cli;
mod logging;
mod request;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;

use sirius_tx::crypto::hash::Hash;
use sirius_tx::model::{Account, NetworkType};
use sirius_tx::transaction::{
    cosign_hash, sign_transaction, sign_with_cosignatures, CosignatureSignedTransaction,
    SignedTransaction,
};
use sirius_tx::{map_transactions, DecodedBatch};

use cli::{AccountArgs, Commands, CosignArgs, DecodeArgs, SignArgs, SiriusCli};
use request::SignRequest;

fn main() -> Result<()> {
    let cli = SiriusCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Sign(args) => print_json(&sign(&args)?),
        Commands::Cosign(args) => print_json(&cosign(&args)?),
        Commands::Decode(args) => {
            let json = read_file(&args.file)?;
            let batch = decode(&json, &args)?;
            print_json(&summarize(&batch))?;
            match batch.first_error {
                Some(err) => Err(anyhow!(err)).context("batch did not decode completely"),
                None => Ok(()),
            }
        }
        Commands::Version => {
            println!("sirius-tx-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// What `sign` prints.
#[derive(Debug, Serialize)]
struct SignedOutput {
    #[serde(rename = "type")]
    entity_type: u16,
    payload: String,
    hash: Hash,
}

impl From<SignedTransaction> for SignedOutput {
    fn from(signed: SignedTransaction) -> Self {
        Self {
            entity_type: signed.entity_type.value(),
            payload: signed.payload,
            hash: signed.hash,
        }
    }
}

/// One line of the `decode` summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DecodedSummary {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<Hash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inner: Option<usize>,
    decoded: bool,
}

fn parse_generation_hash(value: Option<&str>) -> Result<Option<Hash>> {
    value
        .map(|hex| Hash::from_hex(hex).context("invalid generation hash"))
        .transpose()
}

fn account(args: &AccountArgs, private_key: &str) -> Result<Account> {
    let generation_hash = parse_generation_hash(args.generation_hash.as_deref())?;
    Account::from_private_key(
        private_key,
        NetworkType::from(args.network),
        args.account_version,
        generation_hash,
    )
    .context("invalid private key")
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn sign(args: &SignArgs) -> Result<SignedOutput> {
    let initiator = account(&args.account, &args.account.private_key)?;
    let cosigners = args
        .cosigners
        .iter()
        .map(|key| account(&args.account, key))
        .collect::<Result<Vec<_>>>()?;

    let request: SignRequest = serde_json::from_str(&read_file(&args.file)?)
        .with_context(|| format!("invalid request in {}", args.file.display()))?;
    let tx = request.build(initiator.network_type(), initiator.public_account())?;

    let signed = if cosigners.is_empty() {
        sign_transaction(&tx, &initiator)?
    } else {
        let refs: Vec<&Account> = cosigners.iter().collect();
        sign_with_cosignatures(&tx, &initiator, &refs)?
    };
    tracing::info!(
        entity_type = %signed.entity_type,
        hash = %signed.hash,
        cosigners = cosigners.len(),
        "transaction signed"
    );
    Ok(signed.into())
}

fn cosign(args: &CosignArgs) -> Result<CosignatureSignedTransaction> {
    let signer = account(&args.account, &args.account.private_key)?;
    let parent_hash = Hash::from_hex(&args.hash).context("invalid aggregate hash")?;
    let cosignature = cosign_hash(parent_hash, &signer)?;
    tracing::info!(parent_hash = %parent_hash, "aggregate cosigned");
    Ok(cosignature)
}

fn decode(json: &str, args: &DecodeArgs) -> Result<DecodedBatch> {
    let generation_hash = parse_generation_hash(args.generation_hash.as_deref())?;
    let batch = map_transactions(json, generation_hash.as_ref())?;
    tracing::info!(
        total = batch.transactions.len(),
        complete = batch.is_complete(),
        "batch decoded"
    );
    Ok(batch)
}

fn summarize(batch: &DecodedBatch) -> Vec<DecodedSummary> {
    batch
        .transactions
        .iter()
        .enumerate()
        .map(|(index, tx)| match tx {
            Some(tx) => DecodedSummary {
                index,
                entity_type: Some(tx.entity_type().to_string()),
                hash: tx.header.hash().copied(),
                inner: tx.as_aggregate().map(|aggregate| aggregate.inner.len()),
                decoded: true,
            },
            None => DecodedSummary {
                index,
                entity_type: None,
                hash: None,
                inner: None,
                decoded: false,
            },
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
