//! Transaction Messages
//!
//! Every message a transaction can carry, grouped by SDK module. Each
//! message type knows its amino discriminator, its protobuf type URL, and
//! how to encode itself in both signing modes. [`Msg`] is the closed set
//! of variants the assemblers accept.

pub mod bank;
pub mod crisis;
pub mod distribution;
pub mod evidence;
pub mod gov;
pub mod ibc;
pub mod nft;
pub mod slashing;
pub mod staking;

pub use bank::*;
pub use crisis::*;
pub use distribution::*;
pub use evidence::*;
pub use gov::*;
pub use ibc::*;
pub use nft::*;
pub use slashing::*;
pub use staking::*;

use crate::error::ChainResult;
use crate::signing::proto::{Any, ProtoWriter};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// `{"type": ..., "value": ...}` wrapper used by amino JSON
#[derive(Serialize)]
struct AminoMsg<'a, T: Serialize + ?Sized> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a T,
}

/// A single message type
///
/// The amino JSON `value` object is the type's `Serialize` output, so the
/// field set and naming live on the struct definition.
pub trait CosmosMsg: Serialize {
    /// Legacy amino type discriminator, e.g. `cosmos-sdk/MsgSend`
    const AMINO_TYPE: &'static str;
    /// Protobuf `Any` type URL, e.g. `/cosmos.bank.v1beta1.MsgSend`
    const TYPE_URL: &'static str;

    /// Write the protobuf message body
    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()>;

    /// Amino JSON form: `{"type": <discriminator>, "value": {...}}`
    fn to_amino_json(&self) -> ChainResult<Value> {
        let wrapped = AminoMsg {
            kind: Self::AMINO_TYPE,
            value: self,
        };
        Ok(serde_json::to_value(wrapped)?)
    }

    /// Protobuf form packed as `Any`
    fn to_any(&self) -> ChainResult<Any> {
        let mut w = ProtoWriter::new();
        self.encode_proto(&mut w)?;
        Ok(Any::new(Self::TYPE_URL, w.into_bytes()))
    }
}

macro_rules! define_msgs {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Any message that can be placed in a transaction
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Msg {
            $($variant($ty),)*
        }

        impl Msg {
            pub fn amino_type(&self) -> &'static str {
                match self {
                    $(Msg::$variant(_) => <$ty as CosmosMsg>::AMINO_TYPE,)*
                }
            }

            pub fn type_url(&self) -> &'static str {
                match self {
                    $(Msg::$variant(_) => <$ty as CosmosMsg>::TYPE_URL,)*
                }
            }

            pub fn to_amino_json(&self) -> ChainResult<Value> {
                match self {
                    $(Msg::$variant(m) => m.to_amino_json(),)*
                }
            }

            pub fn to_any(&self) -> ChainResult<Any> {
                match self {
                    $(Msg::$variant(m) => m.to_any(),)*
                }
            }
        }

        /// Serializes as the amino `{"type", "value"}` object, keeping the
        /// declared field order
        impl Serialize for Msg {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(Msg::$variant(m) => AminoMsg {
                        kind: <$ty as CosmosMsg>::AMINO_TYPE,
                        value: m,
                    }
                    .serialize(serializer),)*
                }
            }
        }

        $(
            impl From<$ty> for Msg {
                fn from(msg: $ty) -> Self {
                    Msg::$variant(msg)
                }
            }
        )*
    };
}

define_msgs! {
    Send(MsgSend),
    MultiSend(MsgMultiSend),
    VerifyInvariant(MsgVerifyInvariant),
    SetWithdrawAddress(MsgSetWithdrawAddress),
    WithdrawDelegatorReward(MsgWithdrawDelegatorReward),
    WithdrawValidatorCommission(MsgWithdrawValidatorCommission),
    FundCommunityPool(MsgFundCommunityPool),
    SubmitEvidence(MsgSubmitEvidence),
    SubmitProposal(MsgSubmitProposal),
    Vote(MsgVote),
    Deposit(MsgDeposit),
    Unjail(MsgUnjail),
    CreateValidator(MsgCreateValidator),
    EditValidator(MsgEditValidator),
    Delegate(MsgDelegate),
    BeginRedelegate(MsgBeginRedelegate),
    Undelegate(MsgUndelegate),
    IssueDenom(MsgIssueDenom),
    MintNft(MsgMintNft),
    EditNft(MsgEditNft),
    TransferNft(MsgTransferNft),
    BurnNft(MsgBurnNft),
    IbcTransfer(MsgTransfer),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coin;

    #[test]
    fn test_enum_dispatch_matches_inner_type() {
        let inner = MsgSend {
            from_address: "from_address".to_string(),
            to_address: "to_address".to_string(),
            amount: vec![Coin::basecro(0)],
        };
        let msg: Msg = inner.clone().into();

        assert_eq!(msg.amino_type(), "cosmos-sdk/MsgSend");
        assert_eq!(msg.type_url(), "/cosmos.bank.v1beta1.MsgSend");
        assert_eq!(msg.to_amino_json().unwrap(), inner.to_amino_json().unwrap());
        assert_eq!(msg.to_any().unwrap(), inner.to_any().unwrap());
    }

    #[test]
    fn test_serialize_keeps_declared_order() {
        let msg: Msg = MsgSend {
            from_address: "a".to_string(),
            to_address: "b".to_string(),
            amount: vec![],
        }
        .into();
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"type":"cosmos-sdk/MsgSend","value":{"from_address":"a","to_address":"b","amount":[]}}"#
        );
    }

    #[test]
    fn test_serialization_is_pure() {
        let msg: Msg = MsgDelegate {
            delegator_address: "d".to_string(),
            validator_address: "v".to_string(),
            amount: Coin::basecro(7),
        }
        .into();
        assert_eq!(msg.to_any().unwrap(), msg.to_any().unwrap());
        assert_eq!(msg.to_amino_json().unwrap(), msg.to_amino_json().unwrap());
    }
}
