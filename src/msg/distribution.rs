//! Distribution module messages

use super::CosmosMsg;
use crate::error::ChainResult;
use crate::signing::proto::ProtoWriter;
use crate::types::Coin;
use serde::{Deserialize, Serialize};

/// Change the address that receives a delegator's rewards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetWithdrawAddress {
    pub delegator_address: String,
    pub withdraw_address: String,
}

impl CosmosMsg for MsgSetWithdrawAddress {
    // Registered under its pre-protobuf name
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgModifyWithdrawAddress";
    const TYPE_URL: &'static str = "/cosmos.distribution.v1beta1.MsgSetWithdrawAddress";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.delegator_address)
            .string(2, &self.withdraw_address);
        Ok(())
    }
}

/// Withdraw rewards earned from a single validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgWithdrawDelegatorReward {
    pub delegator_address: String,
    pub validator_address: String,
}

impl CosmosMsg for MsgWithdrawDelegatorReward {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgWithdrawDelegationReward";
    const TYPE_URL: &'static str = "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.delegator_address)
            .string(2, &self.validator_address);
        Ok(())
    }
}

/// Withdraw a validator's accumulated commission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgWithdrawValidatorCommission {
    pub validator_address: String,
}

impl CosmosMsg for MsgWithdrawValidatorCommission {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgWithdrawValidatorCommission";
    const TYPE_URL: &'static str = "/cosmos.distribution.v1beta1.MsgWithdrawValidatorCommission";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.validator_address);
        Ok(())
    }
}

/// Fund the community pool directly from an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgFundCommunityPool {
    pub amount: Vec<Coin>,
    pub depositor: String,
}

impl CosmosMsg for MsgFundCommunityPool {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgFundCommunityPool";
    const TYPE_URL: &'static str = "/cosmos.distribution.v1beta1.MsgFundCommunityPool";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.repeated(1, &self.amount).string(2, &self.depositor);
        Ok(())
    }
}
