//! Multisig transaction builder
//!
//! Every member signs the same legacy amino document for the multisig
//! account. Signatures are verified on arrival, folded into a
//! [`MultiSignatureData`] and emitted as a single `TxRaw` signature.

use super::{SignedTx, SigningContext, TxConfig};
use crate::error::{ChainError, ChainResult};
use crate::msg::Msg;
use crate::multisig::{LegacyAminoPubKey, MultiSignatureData, SingleSignature};
use crate::signer::{verify, Secp256k1Signer};
use crate::signing::direct::TxRaw;
use crate::signing::proto::ProtoMessage;
use crate::signing::SignMode;
use crate::types::StdFee;
use crate::{log_debug, log_info, log_warn};

#[derive(Debug, Clone)]
pub struct MultisigTransactionBuilder {
    config: TxConfig,
    multisig_key: LegacyAminoPubKey,
    account_number: u64,
    sequence: u64,
    msgs: Vec<Msg>,
    fee: Option<StdFee>,
    memo: String,
    timeout_height: Option<u64>,
    signatures: MultiSignatureData,
}

impl MultisigTransactionBuilder {
    /// Fails with `InvalidInput` unless `config` uses legacy amino JSON
    pub fn new(
        config: TxConfig,
        multisig_key: LegacyAminoPubKey,
        account_number: u64,
        sequence: u64,
    ) -> ChainResult<Self> {
        if config.sign_mode != SignMode::LegacyAminoJson {
            return Err(ChainError::invalid_input(format!(
                "multisig transactions must use legacy_amino_json, got {}",
                config.sign_mode
            )));
        }
        let signatures = multisig_key.new_signature_data()?;
        Ok(Self {
            config,
            multisig_key,
            account_number,
            sequence,
            msgs: Vec::new(),
            fee: None,
            memo: String::new(),
            timeout_height: None,
            signatures,
        })
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

    pub fn set_timeout_height(&mut self, height: u64) -> &mut Self {
        self.invalidate("set_timeout_height");
        self.timeout_height = Some(height);
        self
    }

    pub fn multisig_key(&self) -> &LegacyAminoPubKey {
        &self.multisig_key
    }

    pub fn fee(&self) -> &StdFee {
        self.fee.as_ref().unwrap_or(&self.config.default_fee)
    }

    /// Aggregate collected so far
    pub fn signatures(&self) -> &MultiSignatureData {
        &self.signatures
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

    /// Amino bytes each member signs
    pub fn sign_bytes(&self) -> ChainResult<Vec<u8>> {
        if self.msgs.is_empty() {
            return Err(ChainError::invalid_input("transaction has no messages"));
        }
        self.context().std_sign_doc().sign_bytes()
    }

    /// Sign as the member owning `signer`
    pub fn sign_with(&mut self, signer: &Secp256k1Signer) -> ChainResult<&mut Self> {
        let signature = signer.sign(&self.sign_bytes()?);
        let single = SingleSignature::new(signer.public_key().to_vec(), signature.to_vec(), self.sequence);
        self.add_signature(&single)
    }

    /// Accept a member signature produced elsewhere
    ///
    /// The signature must be for this account's sequence and verify against
    /// the current sign bytes.
    pub fn add_signature(&mut self, single: &SingleSignature) -> ChainResult<&mut Self> {
        if single.sequence != self.sequence {
            return Err(ChainError::invalid_input(format!(
                "member signed sequence {}, transaction uses {}",
                single.sequence, self.sequence
            )));
        }
        let sign_bytes = self.sign_bytes()?;
        if !verify(&single.public_key, &sign_bytes, &single.signature)? {
            return Err(ChainError::invalid_signature(
                "member signature does not verify against the sign bytes",
            ));
        }
        self.signatures
            .add_single_signature(single, self.multisig_key.public_keys())?;
        log_debug!(
            "tx",
            "collected multisig member signature",
            collected = self.signatures.count_set_bits(),
            threshold = self.multisig_key.threshold()
        );
        Ok(self)
    }

    pub fn build(&self) -> ChainResult<SignedTx> {
        if self.signatures.count_set_bits() == 0 {
            return Err(ChainError::no_signature("no member has signed"));
        }
        self.signatures
            .check_threshold(self.multisig_key.threshold() as usize)?;

        let ctx = self.context();
        let body = ctx.tx_body()?;
        let auth_info = ctx.auth_info(self.multisig_key.signer_info(&self.signatures, self.sequence));
        let tx = TxRaw {
            body_bytes: body.to_proto_bytes(),
            auth_info_bytes: auth_info.to_proto_bytes(),
            signatures: vec![self.signatures.to_multi_signature_bytes()],
        };
        log_info!(
            "tx",
            "built multisig transaction",
            signers = self.signatures.count_set_bits(),
            members = self.multisig_key.len()
        );
        Ok(SignedTx::Raw {
            tx,
            mode: self.config.broadcast_mode,
        })
    }

    fn invalidate(&mut self, op: &str) {
        if self.signatures.count_set_bits() > 0 {
            log_warn!("tx", "multisig transaction changed, member signatures dropped", op = op);
            self.signatures.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::msg::MsgSend;
    use crate::types::Coin;

    fn members() -> Vec<Secp256k1Signer> {
        (1u8..=3)
            .map(|i| Secp256k1Signer::from_bytes(&[i; 32]).unwrap())
            .collect()
    }

    fn builder(members: &[Secp256k1Signer], threshold: u32) -> MultisigTransactionBuilder {
        let keys = members.iter().map(|m| m.public_key().to_vec()).collect();
        let key = LegacyAminoPubKey::new(threshold, keys).unwrap();
        let mut b = MultisigTransactionBuilder::new(TxConfig::new("test"), key, 5, 2).unwrap();
        b.add_msg(MsgSend::new("cro1from", "cro1to", vec![Coin::basecro(10)]));
        b
    }

    #[test]
    fn test_direct_config_rejected() {
        let m = members();
        let keys = m.iter().map(|s| s.public_key().to_vec()).collect();
        let key = LegacyAminoPubKey::new(2, keys).unwrap();
        let config = TxConfig::new("test").with_sign_mode(SignMode::Direct);
        assert_eq!(
            MultisigTransactionBuilder::new(config, key, 0, 0).unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }

    #[test]
    fn test_build_requires_signatures_and_threshold() {
        let m = members();
        let mut b = builder(&m, 2);
        assert_eq!(b.build().unwrap_err().code, ErrorCode::NoSignature);

        b.sign_with(&m[2]).unwrap();
        assert_eq!(b.build().unwrap_err().code, ErrorCode::ThresholdNotMet);

        b.sign_with(&m[0]).unwrap();
        let signed = b.build().unwrap();
        assert!(signed.tx_hash().is_some());
        assert_eq!(b.signatures().bit_array().elems(), &[0b1010_0000]);
    }

    #[test]
    fn test_bad_member_signature_rejected() {
        let m = members();
        let mut b = builder(&m, 2);
        let forged = SingleSignature::new(m[0].public_key().to_vec(), vec![1u8; 64], 2);
        assert_eq!(
            b.add_signature(&forged).unwrap_err().code,
            ErrorCode::InvalidSignature
        );

        let stale = SingleSignature::new(
            m[0].public_key().to_vec(),
            m[0].sign(&b.sign_bytes().unwrap()).to_vec(),
            1,
        );
        assert_eq!(b.add_signature(&stale).unwrap_err().code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_outsider_rejected() {
        let m = members();
        let mut b = builder(&m, 1);
        let outsider = Secp256k1Signer::from_bytes(&[9u8; 32]).unwrap();
        assert_eq!(b.sign_with(&outsider).unwrap_err().code, ErrorCode::UnknownSigner);
    }

    #[test]
    fn test_mutation_clears_aggregate() {
        let m = members();
        let mut b = builder(&m, 1);
        b.sign_with(&m[1]).unwrap();
        b.set_memo("later");
        assert_eq!(b.signatures().count_set_bits(), 0);
        assert_eq!(b.build().unwrap_err().code, ErrorCode::NoSignature);
    }
}
