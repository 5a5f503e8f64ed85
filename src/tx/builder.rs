//! Single-signer transaction builder

use super::{SignedTx, SigningContext, TxConfig};
use crate::error::{ChainError, ChainResult};
use crate::msg::Msg;
use crate::signer::{Secp256k1Signer, PUBLIC_KEY_LEN, SIGNATURE_LEN};
use crate::signing::amino::{AminoPubKey, BroadcastTxBody, StdSignature, StdTx};
use crate::signing::direct::{SignerInfo, TxRaw};
use crate::signing::proto::ProtoMessage;
use crate::signing::SignMode;
use crate::types::StdFee;
use crate::{log_debug, log_warn};

/// Assembles and signs a transaction for one secp256k1 account
///
/// Any change to the content after a signature is attached drops that
/// signature, since it no longer covers the document.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    config: TxConfig,
    account_number: u64,
    sequence: u64,
    public_key: Vec<u8>,
    msgs: Vec<Msg>,
    fee: Option<StdFee>,
    memo: String,
    timeout_height: Option<u64>,
    signature: Option<Vec<u8>>,
}

impl TransactionBuilder {
    pub fn new(
        config: TxConfig,
        account_number: u64,
        sequence: u64,
        public_key: impl Into<Vec<u8>>,
    ) -> ChainResult<Self> {
        let public_key = public_key.into();
        if public_key.len() != PUBLIC_KEY_LEN {
            return Err(ChainError::invalid_key(format!(
                "public key must be {} bytes, got {}",
                PUBLIC_KEY_LEN,
                public_key.len()
            )));
        }
        Ok(Self {
            config,
            account_number,
            sequence,
            public_key,
            msgs: Vec::new(),
            fee: None,
            memo: String::new(),
            timeout_height: None,
            signature: None,
        })
    }

    /// Builder for the signer's own account
    pub fn for_signer(
        config: TxConfig,
        account_number: u64,
        sequence: u64,
        signer: &Secp256k1Signer,
    ) -> Self {
        Self {
            config,
            account_number,
            sequence,
            public_key: signer.public_key().to_vec(),
            msgs: Vec::new(),
            fee: None,
            memo: String::new(),
            timeout_height: None,
            signature: None,
        }
    }

    pub fn add_msg(&mut self, msg: impl Into<Msg>) -> &mut Self {
        self.invalidate("add_msg");
        self.msgs.push(msg.into());
        self
    }

    pub fn set_fee(&mut self, fee: StdFee) -> &mut Self {
        self.invalidate("set_fee");
        self.fee = Some(fee);
        self
    }

    pub fn set_memo(&mut self, memo: impl Into<String>) -> &mut Self {
        self.invalidate("set_memo");
        self.memo = memo.into();
        self
    }

    /// Zero means no timeout
    pub fn set_timeout_height(&mut self, height: u64) -> &mut Self {
        self.invalidate("set_timeout_height");
        self.timeout_height = Some(height);
        self
    }

    pub fn config(&self) -> &TxConfig {
        &self.config
    }

    pub fn msgs(&self) -> &[Msg] {
        &self.msgs
    }

    /// The explicit fee, or the configured default
    pub fn fee(&self) -> &StdFee {
        self.fee.as_ref().unwrap_or(&self.config.default_fee)
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    pub fn context(&self) -> SigningContext {
        SigningContext::new(
            self.config.chain_id.clone(),
            self.account_number,
            self.sequence,
            self.msgs.clone(),
            self.fee().clone(),
            self.memo.clone(),
            self.timeout_height,
        )
    }

    /// Bytes to sign under the configured sign mode
    pub fn sign_bytes(&self) -> ChainResult<Vec<u8>> {
        if self.msgs.is_empty() {
            return Err(ChainError::invalid_input("transaction has no messages"));
        }
        self.context().sign_bytes(self.config.sign_mode, &self.public_key)
    }

    /// Sign with a key that must match the builder's public key
    pub fn sign(&mut self, signer: &Secp256k1Signer) -> ChainResult<&mut Self> {
        if signer.public_key()[..] != self.public_key[..] {
            return Err(ChainError::invalid_key(
                "signer key does not match the transaction public key",
            ));
        }
        let sign_bytes = self.sign_bytes()?;
        let signature = signer.sign(&sign_bytes);
        log_debug!(
            "tx",
            "signed transaction",
            mode = self.config.sign_mode,
            msgs = self.msgs.len(),
            sequence = self.sequence
        );
        self.signature = Some(signature.to_vec());
        Ok(self)
    }

    /// Attach a compact signature produced elsewhere over [`Self::sign_bytes`]
    ///
    /// The signature is not verified here.
    pub fn attach_signature(&mut self, signature: &[u8]) -> ChainResult<&mut Self> {
        if signature.len() != SIGNATURE_LEN {
            return Err(ChainError::invalid_signature(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_LEN,
                signature.len()
            )));
        }
        self.signature = Some(signature.to_vec());
        Ok(self)
    }

    pub fn build(&self) -> ChainResult<SignedTx> {
        let signature = self
            .signature
            .clone()
            .ok_or_else(|| ChainError::no_signature("transaction has not been signed"))?;
        let ctx = self.context();

        let signed = match self.config.sign_mode {
            SignMode::LegacyAminoJson => SignedTx::Amino(BroadcastTxBody {
                tx: StdTx {
                    msg: ctx.msgs().to_vec(),
                    fee: ctx.fee().clone(),
                    memo: ctx.memo().to_string(),
                    timeout_height: ctx.timeout_height(),
                    signatures: vec![StdSignature {
                        signature,
                        pub_key: AminoPubKey::secp256k1(&self.public_key),
                        account_number: self.account_number,
                        sequence: self.sequence,
                    }],
                },
                mode: self.config.broadcast_mode,
            }),
            SignMode::Direct => {
                let body = ctx.tx_body()?;
                let auth_info = ctx.auth_info(SignerInfo::single(
                    &self.public_key,
                    SignMode::Direct,
                    self.sequence,
                ));
                SignedTx::Raw {
                    tx: TxRaw {
                        body_bytes: body.to_proto_bytes(),
                        auth_info_bytes: auth_info.to_proto_bytes(),
                        signatures: vec![signature],
                    },
                    mode: self.config.broadcast_mode,
                }
            }
        };
        log_debug!("tx", "built transaction", mode = self.config.sign_mode);
        Ok(signed)
    }

    fn invalidate(&mut self, op: &str) {
        if self.signature.take().is_some() {
            log_warn!("tx", "transaction changed after signing, signature dropped", op = op);
        }
    }
}
