//! Transaction Assembly
//!
//! Builders that collect messages, fee and memo, produce the bytes to
//! sign for the configured sign mode, and emit a broadcastable
//! transaction once signed:
//! - [`TransactionBuilder`] for a single secp256k1 signer
//! - [`MultisigTransactionBuilder`] for a threshold multisig account

mod builder;
mod multisig;

pub use builder::TransactionBuilder;
pub use multisig::MultisigTransactionBuilder;

use crate::config::{BroadcastMode, ChainConfig};
use crate::error::{ChainError, ChainResult};
use crate::msg::Msg;
use crate::signer::sha256;
use crate::signing::amino::{BroadcastTxBody, StdSignDoc};
use crate::signing::direct::{AuthInfo, SignDoc, SignerInfo, TxBody, TxRaw};
use crate::signing::SignMode;
use crate::types::StdFee;
use crate::utils::get_json_u64;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

/// Settings shared by every transaction sent to one chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxConfig {
    pub chain_id: String,
    pub sign_mode: SignMode,
    /// Used when a builder is not given an explicit fee
    pub default_fee: StdFee,
    pub broadcast_mode: BroadcastMode,
}

impl TxConfig {
    /// Legacy amino signing, default gas and no fee coins, sync broadcast
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            sign_mode: SignMode::LegacyAminoJson,
            default_fee: StdFee::default(),
            broadcast_mode: BroadcastMode::Sync,
        }
    }

    pub fn from_chain_config(config: &ChainConfig) -> Self {
        Self {
            chain_id: config.chain_id.clone(),
            sign_mode: SignMode::LegacyAminoJson,
            default_fee: config.default_fee(),
            broadcast_mode: BroadcastMode::Sync,
        }
    }

    pub fn with_sign_mode(mut self, sign_mode: SignMode) -> Self {
        self.sign_mode = sign_mode;
        self
    }

    pub fn with_default_fee(mut self, fee: StdFee) -> Self {
        self.default_fee = fee;
        self
    }

    pub fn with_broadcast_mode(mut self, mode: BroadcastMode) -> Self {
        self.broadcast_mode = mode;
        self
    }
}

/// Account number and sequence as returned by an account query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountInfo {
    pub account_number: u64,
    pub sequence: u64,
}

impl AccountInfo {
    /// Accepts either the account object itself or a response wrapping it
    /// under `"account"`; numbers may be JSON numbers or decimal strings.
    /// A missing sequence means the account never sent a transaction.
    pub fn from_json(value: &Value) -> ChainResult<Self> {
        let account = value.get("account").unwrap_or(value);
        let account_number = get_json_u64(account, "account_number")
            .ok_or_else(|| ChainError::invalid_input("account response has no account_number"))?;
        let sequence = get_json_u64(account, "sequence").unwrap_or(0);
        Ok(Self {
            account_number,
            sequence,
        })
    }
}

/// Everything that goes into the signed document
///
/// Built by the transaction builders; the sequence must be the signer's
/// current on-chain nonce, which is not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    chain_id: String,
    account_number: u64,
    sequence: u64,
    msgs: Vec<Msg>,
    fee: StdFee,
    memo: String,
    timeout_height: Option<u64>,
}

impl SigningContext {
    pub fn new(
        chain_id: impl Into<String>,
        account_number: u64,
        sequence: u64,
        msgs: Vec<Msg>,
        fee: StdFee,
        memo: impl Into<String>,
        timeout_height: Option<u64>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            account_number,
            sequence,
            msgs,
            fee,
            memo: memo.into(),
            timeout_height,
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn msgs(&self) -> &[Msg] {
        &self.msgs
    }

    pub fn fee(&self) -> &StdFee {
        &self.fee
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Zero and `None` both mean no timeout
    pub fn timeout_height(&self) -> u64 {
        self.timeout_height.unwrap_or(0)
    }

    pub fn std_sign_doc(&self) -> StdSignDoc<'_> {
        StdSignDoc {
            chain_id: &self.chain_id,
            account_number: self.account_number,
            sequence: self.sequence,
            fee: &self.fee,
            msgs: &self.msgs,
            memo: &self.memo,
            timeout_height: self.timeout_height(),
        }
    }

    pub fn tx_body(&self) -> ChainResult<TxBody> {
        let messages = self
            .msgs
            .iter()
            .map(Msg::to_any)
            .collect::<ChainResult<Vec<_>>>()?;
        Ok(TxBody {
            messages,
            memo: self.memo.clone(),
            timeout_height: self.timeout_height(),
        })
    }

    pub fn auth_info(&self, signer_info: SignerInfo) -> AuthInfo {
        AuthInfo {
            signer_infos: vec![signer_info],
            fee: self.fee.clone(),
        }
    }

    /// Bytes a single secp256k1 signer signs in `mode`
    pub fn sign_bytes(&self, mode: SignMode, public_key: &[u8]) -> ChainResult<Vec<u8>> {
        match mode {
            SignMode::LegacyAminoJson => self.std_sign_doc().sign_bytes(),
            SignMode::Direct => {
                let body = self.tx_body()?;
                let auth_info = self.auth_info(SignerInfo::single(public_key, mode, self.sequence));
                let doc = SignDoc::new(&body, &auth_info, &self.chain_id, self.account_number);
                Ok(doc.sign_bytes())
            }
        }
    }
}

/// A fully signed transaction, ready to hand to a broadcaster verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignedTx {
    /// Legacy REST `POST /txs` body
    Amino(BroadcastTxBody),
    /// Protobuf transaction for `POST /cosmos/tx/v1beta1/txs`
    Raw { tx: TxRaw, mode: BroadcastMode },
}

impl SignedTx {
    /// Opaque bytes: JSON for amino, protobuf for raw
    pub fn to_bytes(&self) -> ChainResult<Vec<u8>> {
        match self {
            SignedTx::Amino(body) => body.to_bytes(),
            SignedTx::Raw { tx, .. } => Ok(tx.to_bytes()),
        }
    }

    /// Request body for the matching broadcast endpoint
    pub fn to_broadcast_json(&self) -> ChainResult<Value> {
        match self {
            SignedTx::Amino(body) => body.to_json(),
            SignedTx::Raw { tx, mode } => Ok(json!({
                "tx_bytes": STANDARD.encode(tx.to_bytes()),
                "mode": mode.as_proto_name(),
            })),
        }
    }

    /// Uppercase hex SHA-256 of the raw transaction, as indexed by nodes
    ///
    /// Legacy transactions are hashed over their amino binary form, which
    /// is not produced here, so they have no hash.
    pub fn tx_hash(&self) -> Option<String> {
        match self {
            SignedTx::Amino(_) => None,
            SignedTx::Raw { tx, .. } => Some(hex::encode_upper(sha256(&tx.to_bytes()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::MsgSend;
    use crate::types::Coin;

    fn context(timeout_height: Option<u64>) -> SigningContext {
        SigningContext::new(
            "test",
            11335,
            0,
            vec![MsgSend::new("a", "b", vec![Coin::basecro(1)]).into()],
            StdFee::new(30000, vec![Coin::basecro(100000)]),
            "",
            timeout_height,
        )
    }

    #[test]
    fn test_tx_config_from_chain_config() {
        let mut chain = ChainConfig::mainnet();
        chain.default_fee_amount = 5000;
        let config = TxConfig::from_chain_config(&chain)
            .with_sign_mode(SignMode::Direct)
            .with_broadcast_mode(BroadcastMode::Block);
        assert_eq!(config.chain_id, "crypto-org-chain-mainnet-1");
        assert_eq!(config.default_fee.amount, vec![Coin::basecro(5000)]);
        assert_eq!(config.sign_mode, SignMode::Direct);
        assert_eq!(config.broadcast_mode, BroadcastMode::Block);
    }

    #[test]
    fn test_account_info_from_json() {
        let wrapped = json!({"account": {"account_number": "11335", "sequence": "4"}});
        assert_eq!(
            AccountInfo::from_json(&wrapped).unwrap(),
            AccountInfo { account_number: 11335, sequence: 4 }
        );

        let fresh = json!({"account_number": 7});
        assert_eq!(AccountInfo::from_json(&fresh).unwrap().sequence, 0);

        assert!(AccountInfo::from_json(&json!({})).is_err());
    }

    #[test]
    fn test_timeout_height_none_and_zero_match() {
        let none = context(None).sign_bytes(SignMode::LegacyAminoJson, &[]).unwrap();
        let zero = context(Some(0)).sign_bytes(SignMode::LegacyAminoJson, &[]).unwrap();
        assert_eq!(none, zero);

        let set = context(Some(10)).sign_bytes(SignMode::LegacyAminoJson, &[]).unwrap();
        assert!(String::from_utf8(set).unwrap().contains(r#""timeout_height":"10""#));
    }

    #[test]
    fn test_direct_sign_bytes_depend_on_pubkey() {
        let ctx = context(None);
        let a = ctx.sign_bytes(SignMode::Direct, &[2u8; 33]).unwrap();
        let b = ctx.sign_bytes(SignMode::Direct, &[3u8; 33]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, ctx.sign_bytes(SignMode::Direct, &[2u8; 33]).unwrap());
    }

    #[test]
    fn test_signed_raw_tx_hash_and_body() {
        let signed = SignedTx::Raw {
            tx: TxRaw {
                body_bytes: vec![1],
                auth_info_bytes: vec![2],
                signatures: vec![vec![3]],
            },
            mode: BroadcastMode::Sync,
        };
        let bytes = signed.to_bytes().unwrap();
        assert_eq!(
            signed.tx_hash().unwrap(),
            hex::encode_upper(sha256(&bytes))
        );
        let body = signed.to_broadcast_json().unwrap();
        assert_eq!(body["mode"], "BROADCAST_MODE_SYNC");
        assert_eq!(body["tx_bytes"], STANDARD.encode(&bytes));
    }
}
