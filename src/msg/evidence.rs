//! Evidence module messages

use super::CosmosMsg;
use crate::error::ChainResult;
use crate::signing::proto::ProtoWriter;
use crate::types::Content;
use serde::{Deserialize, Serialize};

/// Submit evidence of validator misbehaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSubmitEvidence {
    pub submitter: String,
    pub evidence: Content,
}

impl CosmosMsg for MsgSubmitEvidence {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgSubmitEvidence";
    const TYPE_URL: &'static str = "/cosmos.evidence.v1beta1.MsgSubmitEvidence";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.submitter)
            .message(2, &self.evidence.to_any());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submit_evidence_amino() {
        let msg = MsgSubmitEvidence {
            submitter: "submitter".to_string(),
            evidence: Content::new("type_url", b"evidence content details".to_vec()),
        };
        assert_eq!(
            msg.to_amino_json().unwrap(),
            json!({
                "type": "cosmos-sdk/MsgSubmitEvidence",
                "value": {
                    "submitter": "submitter",
                    "evidence": {"type_url": "type_url", "value": "ZXZpZGVuY2UgY29udGVudCBkZXRhaWxz"},
                },
            })
        );
    }
}
