//! Bank module messages

use super::CosmosMsg;
use crate::error::ChainResult;
use crate::signing::proto::ProtoWriter;
use crate::types::{Coin, Input, Output};
use serde::{Deserialize, Serialize};

/// Send coins from one account to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from_address: String,
    pub to_address: String,
    pub amount: Vec<Coin>,
}

impl MsgSend {
    pub fn new(from_address: impl Into<String>, to_address: impl Into<String>, amount: Vec<Coin>) -> Self {
        Self {
            from_address: from_address.into(),
            to_address: to_address.into(),
            amount,
        }
    }
}

impl CosmosMsg for MsgSend {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgSend";
    const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgSend";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.from_address)
            .string(2, &self.to_address)
            .repeated(3, &self.amount);
        Ok(())
    }
}

/// Arbitrary multi-input, multi-output send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgMultiSend {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
}

impl CosmosMsg for MsgMultiSend {
    const AMINO_TYPE: &'static str = "cosmos-sdk/MsgMultiSend";
    const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgMultiSend";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.repeated(1, &self.inputs).repeated(2, &self.outputs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_msg_send_amino() {
        let msg = MsgSend::new("from_address", "to_address", vec![Coin::basecro(0)]);
        assert_eq!(
            msg.to_amino_json().unwrap(),
            json!({
                "type": "cosmos-sdk/MsgSend",
                "value": {
                    "from_address": "from_address",
                    "to_address": "to_address",
                    "amount": [{"amount": "0", "denom": "basecro"}],
                },
            })
        );
    }

    #[test]
    fn test_msg_send_proto() {
        let msg = MsgSend::new("a", "b", vec![Coin::from_base_units(1, "c")]);
        let any = msg.to_any().unwrap();
        assert_eq!(any.type_url, "/cosmos.bank.v1beta1.MsgSend");
        assert_eq!(
            any.value,
            vec![
                0x0a, 0x01, b'a', // from_address
                0x12, 0x01, b'b', // to_address
                0x1a, 0x06, 0x0a, 0x01, b'c', 0x12, 0x01, b'1', // amount
            ]
        );
    }

    #[test]
    fn test_msg_multi_send_amino() {
        let msg = MsgMultiSend {
            inputs: vec![Input {
                address: "input_address".to_string(),
                coins: vec![Coin::basecro(0)],
            }],
            outputs: vec![Output {
                address: "output_address".to_string(),
                coins: vec![Coin::basecro(0)],
            }],
        };
        assert_eq!(
            msg.to_amino_json().unwrap(),
            json!({
                "type": "cosmos-sdk/MsgMultiSend",
                "value": {
                    "inputs": [{"address": "input_address", "coins": [{"amount": "0", "denom": "basecro"}]}],
                    "outputs": [{"address": "output_address", "coins": [{"amount": "0", "denom": "basecro"}]}],
                },
            })
        );
    }
}
