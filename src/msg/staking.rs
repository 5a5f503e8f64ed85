//! Staking module messages

use super::CosmosMsg;
use crate::error::{ChainError, ChainResult};
use crate::signing::proto::{Any, ProtoWriter};
use crate::types::{Coin, CommissionRates, Description};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Type URL of a validator consensus key
pub const ED25519_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.ed25519.PubKey";

const ED25519_PUBKEY_LEN: usize = 32;

/// Register a new validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateValidator {
    pub description: Description,
    pub commission: CommissionRates,
    pub min_self_delegation: String,
    pub delegator_address: String,
    pub validator_address: String,
    /// Base64 of the validator's ed25519 consensus public key
    pub pubkey: String,
    pub value: Coin,
}

impl MsgCreateValidator {
    fn consensus_pubkey_any(&self) -> ChainResult<Any> {
        let key = STANDARD
            .decode(&self.pubkey)
            .map_err(|e| ChainError::encoding(format!("consensus pubkey is not base64: {}", e)))?;
        if key.len() != ED25519_PUBKEY_LEN {
            return Err(ChainError::invalid_key(format!(
                "consensus pubkey must be {} bytes, got {}",
                ED25519_PUBKEY_LEN,
                key.len()
            )));
        }
        let mut w = ProtoWriter::new();
        w.bytes(1, &key);
        Ok(Any::new(ED25519_PUBKEY_TYPE_URL, w.into_bytes()))
    }
}

impl CosmosMsg for MsgCreateValidator {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgCreateValidator";
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgCreateValidator";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        let pubkey = self.consensus_pubkey_any()?;
        w.message(1, &self.description)
            .message(2, &self.commission)
            .string(3, &self.min_self_delegation)
            .string(4, &self.delegator_address)
            .string(5, &self.validator_address)
            .message(6, &pubkey)
            .message(7, &self.value);
        Ok(())
    }
}

/// Update an existing validator's description or commission rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEditValidator {
    pub description: Description,
    pub validator_address: String,
    /// New commission rate as a decimal string; `None` leaves it unchanged
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub commission_rate: Option<String>,
    pub min_self_delegation: String,
}

impl CosmosMsg for MsgEditValidator {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgEditValidator";
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgEditValidator";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.message(1, &self.description)
            .string(2, &self.validator_address)
            .string(3, self.commission_rate.as_deref().unwrap_or_default())
            .string(4, &self.min_self_delegation);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelegate {
    pub delegator_address: String,
    pub validator_address: String,
    pub amount: Coin,
}

impl CosmosMsg for MsgDelegate {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgDelegate";
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgDelegate";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.delegator_address)
            .string(2, &self.validator_address)
            .message(3, &self.amount);
        Ok(())
    }
}

/// Move a delegation from one validator to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBeginRedelegate {
    pub delegator_address: String,
    pub validator_src_address: String,
    pub validator_dst_address: String,
    pub amount: Coin,
}

impl CosmosMsg for MsgBeginRedelegate {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgBeginRedelegate";
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgBeginRedelegate";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.delegator_address)
            .string(2, &self.validator_src_address)
            .string(3, &self.validator_dst_address)
            .message(4, &self.amount);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUndelegate {
    pub delegator_address: String,
    pub validator_address: String,
    pub amount: Coin,
}

impl CosmosMsg for MsgUndelegate {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgUndelegate";
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgUndelegate";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.delegator_address)
            .string(2, &self.validator_address)
            .message(3, &self.amount);
        Ok(())
    }
}
