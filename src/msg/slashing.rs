//! Slashing module messages

use super::CosmosMsg;
use crate::error::ChainResult;
use crate::signing::proto::ProtoWriter;
use serde::{Deserialize, Serialize};

/// Bring a jailed validator back into the active set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUnjail {
    pub validator_addr: String,
}

impl CosmosMsg for MsgUnjail {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgUnjail";
    const TYPE_URL: &'static str = "/cosmos.slashing.v1beta1.MsgUnjail";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.validator_addr);
        Ok(())
    }
}
