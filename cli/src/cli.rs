//! # CLI Interface
//!
//! Defines the command-line argument structure for `sirius-tx-cli` using
//! `clap` derive. Supports four subcommands: `sign`, `cosign`, `decode`,
//! and `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sirius_tx::model::NetworkType;

use crate::logging::LogFormat;

/// Offline signer and decoder for Sirius chain transactions.
///
/// Builds and signs transactions described in JSON, cosigns aggregate
/// bonded hashes, and decodes transaction arrays returned by a node's REST
/// API. Nothing is sent over the network.
#[derive(Parser, Debug)]
#[command(
    name = "sirius-tx-cli",
    about = "Offline signer and decoder for Sirius chain transactions",
    version,
    propagate_version = true
)]
pub struct SiriusCli {
    /// Default log filter. `RUST_LOG` takes precedence when set.
    #[arg(long, global = true, env = "SIRIUS_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and sign the transaction described in a JSON request file.
    Sign(SignArgs),
    /// Cosign an aggregate bonded transaction hash.
    Cosign(CosignArgs),
    /// Decode a JSON array of transactions as returned by a node.
    Decode(DecodeArgs),
    /// Print version information and exit.
    Version,
}

/// Networks selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
    Mainnet,
    Testnet,
    Privatenet,
    PrivateTest,
    Mijin,
    MijinTest,
}

impl From<NetworkArg> for NetworkType {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mainnet => NetworkType::Mainnet,
            NetworkArg::Testnet => NetworkType::Testnet,
            NetworkArg::Privatenet => NetworkType::Privatenet,
            NetworkArg::PrivateTest => NetworkType::PrivateTest,
            NetworkArg::Mijin => NetworkType::Mijin,
            NetworkArg::MijinTest => NetworkType::MijinTest,
        }
    }
}

/// The signing account and the chain it signs for.
#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
    /// Hex-encoded Ed25519 private key.
    ///
    /// **Prefer the environment variable** so the key stays out of shell
    /// history.
    #[arg(long, env = "SIRIUS_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Network the transaction is built for.
    #[arg(long, value_enum, env = "SIRIUS_NETWORK", default_value_t = NetworkArg::MijinTest)]
    pub network: NetworkArg,

    /// Account version. Version 2 signs with Ed25519/SHA-512, anything else
    /// with Ed25519/SHA3-512.
    #[arg(long, env = "SIRIUS_ACCOUNT_VERSION", default_value_t = 1)]
    pub account_version: u8,

    /// Hex-encoded generation hash of the target chain.
    #[arg(long, env = "SIRIUS_GENERATION_HASH")]
    pub generation_hash: Option<String>,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Path to the JSON request describing the transaction.
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Private key of an aggregate cosigner. Repeat for each cosigner.
    #[arg(long = "cosigner")]
    pub cosigners: Vec<String>,
}

/// Arguments for the `cosign` subcommand.
#[derive(Parser, Debug)]
pub struct CosignArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Hex-encoded hash of the aggregate bonded transaction.
    #[arg(long)]
    pub hash: String,
}

/// Arguments for the `decode` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Path to the JSON array of transactions.
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Hex-encoded generation hash, used for unique aggregate hashes.
    #[arg(long, env = "SIRIUS_GENERATION_HASH")]
    pub generation_hash: Option<String>,
}
