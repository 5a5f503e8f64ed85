//! Crisis module messages

use super::CosmosMsg;
use crate::error::ChainResult;
use crate::signing::proto::ProtoWriter;
use serde::{Deserialize, Serialize};

/// Ask the chain to check a registered invariant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgVerifyInvariant {
    pub sender: String,
    pub invariant_module_name: String,
    pub invariant_route: String,
}

impl CosmosMsg for MsgVerifyInvariant {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgVerifyInvariant";
    const TYPE_URL: &'static str = "/cosmos.crisis.v1beta1.MsgVerifyInvariant";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.sender)
            .string(2, &self.invariant_module_name)
            .string(3, &self.invariant_route);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verify_invariant_amino() {
        let msg = MsgVerifyInvariant {
            sender: "sender_address".to_string(),
            invariant_module_name: "invariant_module_name".to_string(),
            invariant_route: "invariant_route".to_string(),
        };
        assert_eq!(
            msg.to_amino_json().unwrap(),
            json!({
                "type": "cosmos-sdk/MsgVerifyInvariant",
                "value": {
                    "sender": "sender_address",
                    "invariant_module_name": "invariant_module_name",
                    "invariant_route": "invariant_route",
                },
            })
        );
    }
}
