//! IBC fungible token transfer

use super::CosmosMsg;
use crate::error::ChainResult;
use crate::serde_helpers::{is_zero, u64_string};
use crate::signing::proto::ProtoWriter;
use crate::types::{Coin, TimeoutHeight};
use serde::{Deserialize, Serialize};

/// Send tokens to a counterparty chain over an IBC channel
///
/// At least one of `timeout_height` and `timeout_timestamp` (nanoseconds
/// since the epoch) should be non-zero, otherwise the relayer rejects the
/// packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTransfer {
    pub source_port: String,
    pub source_channel: String,
    pub token: Coin,
    pub sender: String,
    pub receiver: String,
    pub timeout_height: TimeoutHeight,
    #[serde(with = "u64_string", skip_serializing_if = "is_zero", default)]
    pub timeout_timestamp: u64,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub memo: String,
}

impl MsgTransfer {
    /// Transfer over the standard `transfer` port
    pub fn new(
        source_channel: impl Into<String>,
        token: Coin,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        timeout_height: TimeoutHeight,
    ) -> Self {
        Self {
            source_port: "transfer".to_string(),
            source_channel: source_channel.into(),
            token,
            sender: sender.into(),
            receiver: receiver.into(),
            timeout_height,
            timeout_timestamp: 0,
            memo: String::new(),
        }
    }
}

impl CosmosMsg for MsgTransfer {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgTransfer";
    const TYPE_URL: &'static str = "/ibc.applications.transfer.v1.MsgTransfer";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.source_port)
            .string(2, &self.source_channel)
            .message(3, &self.token)
            .string(4, &self.sender)
            .string(5, &self.receiver)
            .message(6, &self.timeout_height)
            .uint64(7, self.timeout_timestamp)
            .string(8, &self.memo);
        Ok(())
    }
}
