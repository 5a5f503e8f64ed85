//! Cosmos Transaction Signer
//!
//! Offline signing for Crypto.org Chain and other Cosmos SDK chains.
//!
//! # Architecture
//!
//! This crate provides:
//! - **msg**: Typed chain messages with amino JSON and protobuf encodings
//! - **signing**: Canonical sign documents (legacy amino JSON, SIGN_MODE_DIRECT)
//! - **signer**: Deterministic secp256k1 signing
//! - **multisig**: Threshold multisig keys and signature aggregation
//! - **tx**: Transaction builders producing broadcast-ready bytes
//! - **config**: Chain presets and assembler settings
//!
//! Nothing here touches the network; account number and sequence are
//! supplied by the caller.
//!
//! # Security
//!
//! Private keys are held in [`Secp256k1Signer`], which erases its scalar
//! on drop and never prints it.
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmos_tx_signer::{Coin, MsgSend, Secp256k1Signer, TransactionBuilder, TxConfig};
//!
//! let signer = Secp256k1Signer::from_hex(private_key_hex)?;
//! let mut builder = TransactionBuilder::for_signer(TxConfig::new("test"), 11335, 0, &signer);
//! builder.add_msg(MsgSend::new(from, to, vec![Coin::basecro(288000)]));
//! builder.sign(&signer)?;
//! let body = builder.build()?.to_bytes()?;
//! ```

pub mod config;
pub mod error;
pub mod msg;
pub mod multisig;
pub mod serde_helpers;
pub mod signer;
pub mod signing;
pub mod tx;
pub mod types;
pub mod utils;

pub use config::{BroadcastMode, ChainConfig, ConfigError};
pub use error::{ChainError, ChainResult, ErrorCode};
pub use msg::{CosmosMsg, Msg, MsgSend};
pub use multisig::{CompactBitArray, LegacyAminoPubKey, MultiSignatureData, SingleSignature};
pub use signer::{Secp256k1Signer, PUBLIC_KEY_LEN, SIGNATURE_LEN};
pub use signing::SignMode;
pub use tx::{
    AccountInfo, MultisigTransactionBuilder, SignedTx, SigningContext, TransactionBuilder,
    TxConfig,
};
pub use types::*;
