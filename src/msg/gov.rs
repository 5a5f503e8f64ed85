//! Governance module messages

use super::CosmosMsg;
use crate::error::ChainResult;
use crate::serde_helpers::u64_string;
use crate::signing::proto::ProtoWriter;
use crate::types::{Coin, Content, VoteOption};
use serde::{Deserialize, Serialize};

/// Submit a governance proposal with an initial deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSubmitProposal {
    pub content: Content,
    pub initial_deposit: Vec<Coin>,
    pub proposer: String,
}

impl CosmosMsg for MsgSubmitProposal {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgSubmitProposal";
    const TYPE_URL: &'static str = "/cosmos.gov.v1beta1.MsgSubmitProposal";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.message(1, &self.content.to_any())
            .repeated(2, &self.initial_deposit)
            .string(3, &self.proposer);
        Ok(())
    }
}

/// Cast a vote on an active proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgVote {
    #[serde(with = "u64_string")]
    pub proposal_id: u64,
    pub voter: String,
    pub option: VoteOption,
}

impl CosmosMsg for MsgVote {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgVote";
    const TYPE_URL: &'static str = "/cosmos.gov.v1beta1.MsgVote";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.uint64(1, self.proposal_id)
            .string(2, &self.voter)
            .uint64(3, self.option.as_i32() as u64);
        Ok(())
    }
}

/// Add to a proposal's deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDeposit {
    #[serde(with = "u64_string")]
    pub proposal_id: u64,
    pub depositor: String,
    pub amount: Vec<Coin>,
}

impl CosmosMsg for MsgDeposit {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgDeposit";
    const TYPE_URL: &'static str = "/cosmos.gov.v1beta1.MsgDeposit";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.uint64(1, self.proposal_id)
            .string(2, &self.depositor)
            .repeated(3, &self.amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vote_amino() {
        let msg = MsgVote {
            proposal_id: 1,
            voter: "voter_address".to_string(),
            option: VoteOption::Yes,
        };
        assert_eq!(
            msg.to_amino_json().unwrap(),
            json!({
                "type": "cosmos-sdk/MsgVote",
                "value": {"proposal_id": "1", "voter": "voter_address", "option": 1},
            })
        );
    }

    #[test]
    fn test_vote_proto() {
        let msg = MsgVote {
            proposal_id: 3,
            voter: "v".to_string(),
            option: VoteOption::NoWithVeto,
        };
        assert_eq!(
            msg.to_any().unwrap().value,
            vec![0x08, 0x03, 0x12, 0x01, b'v', 0x18, 0x04]
        );
    }

    #[test]
    fn test_deposit_amino() {
        let msg = MsgDeposit {
            proposal_id: 1,
            depositor: "depositor_address".to_string(),
            amount: vec![Coin::basecro(0)],
        };
        assert_eq!(
            msg.to_amino_json().unwrap()["value"],
            json!({
                "proposal_id": "1",
                "depositor": "depositor_address",
                "amount": [{"amount": "0", "denom": "basecro"}],
            })
        );
    }

    #[test]
    fn test_submit_proposal_amino() {
        let msg = MsgSubmitProposal {
            content: Content::new("type_url", b"content details".to_vec()),
            initial_deposit: vec![Coin::basecro(0)],
            proposer: "proposer".to_string(),
        };
        assert_eq!(
            msg.to_amino_json().unwrap(),
            json!({
                "type": "cosmos-sdk/MsgSubmitProposal",
                "value": {
                    "content": {"type_url": "type_url", "value": "Y29udGVudCBkZXRhaWxz"},
                    "initial_deposit": [{"amount": "0", "denom": "basecro"}],
                    "proposer": "proposer",
                },
            })
        );
    }

    #[test]
    fn test_submit_proposal_proto_packs_content() {
        let msg = MsgSubmitProposal {
            content: Content::new("/t", vec![0xff]),
            initial_deposit: vec![],
            proposer: String::new(),
        };
        assert_eq!(
            msg.to_any().unwrap().value,
            vec![0x0a, 0x07, 0x0a, 0x02, b'/', b't', 0x12, 0x01, 0xff]
        );
    }
}
