//! Legacy amino JSON documents
//!
//! `StdSignDoc` is what gets signed; `StdTx` wrapped in a
//! [`BroadcastTxBody`] is what gets pushed to the REST `POST /txs`
//! endpoint.

use super::canonical_json::canonical_json_bytes;
use crate::config::BroadcastMode;
use crate::error::ChainResult;
use crate::msg::Msg;
use crate::serde_helpers::{base64_bytes, u64_string};
use crate::types::StdFee;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use serde_json::{Map, Value};

/// Amino name of a single secp256k1 public key
pub const SECP256K1_PUBKEY_AMINO_TYPE: &str = "tendermint/PubKeySecp256k1";

/// The legacy sign document
#[derive(Debug, Clone, Copy)]
pub struct StdSignDoc<'a> {
    pub chain_id: &'a str,
    pub account_number: u64,
    pub sequence: u64,
    pub fee: &'a StdFee,
    pub msgs: &'a [Msg],
    pub memo: &'a str,
    /// Only rendered when non-zero
    pub timeout_height: u64,
}

impl StdSignDoc<'_> {
    pub fn to_json(&self) -> ChainResult<Value> {
        let mut doc = Map::new();
        doc.insert("account_number".into(), Value::String(self.account_number.to_string()));
        doc.insert("sequence".into(), Value::String(self.sequence.to_string()));
        doc.insert("chain_id".into(), Value::String(self.chain_id.to_string()));
        doc.insert("memo".into(), Value::String(self.memo.to_string()));
        doc.insert("fee".into(), serde_json::to_value(self.fee)?);
        doc.insert("msgs".into(), serde_json::to_value(self.msgs)?);
        if self.timeout_height != 0 {
            doc.insert(
                "timeout_height".into(),
                Value::String(self.timeout_height.to_string()),
            );
        }
        Ok(Value::Object(doc))
    }

    /// Canonical JSON bytes handed to the signer
    pub fn sign_bytes(&self) -> ChainResult<Vec<u8>> {
        Ok(canonical_json_bytes(&self.to_json()?))
    }
}

/// `{"type": "tendermint/PubKeySecp256k1", "value": <base64>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AminoPubKey {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl AminoPubKey {
    pub fn secp256k1(public_key: &[u8]) -> Self {
        Self {
            kind: SECP256K1_PUBKEY_AMINO_TYPE.to_string(),
            value: STANDARD.encode(public_key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StdSignature {
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
    pub pub_key: AminoPubKey,
    #[serde(with = "u64_string")]
    pub account_number: u64,
    #[serde(with = "u64_string")]
    pub sequence: u64,
}

/// Signed legacy transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StdTx {
    pub msg: Vec<Msg>,
    pub fee: StdFee,
    pub memo: String,
    /// Always rendered, `"0"` when unset
    #[serde(with = "u64_string")]
    pub timeout_height: u64,
    pub signatures: Vec<StdSignature>,
}

/// Request body of the REST `POST /txs` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastTxBody {
    pub tx: StdTx,
    pub mode: BroadcastMode,
}

impl BroadcastTxBody {
    pub fn to_json(&self) -> ChainResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialized in declaration order
    pub fn to_bytes(&self) -> ChainResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
