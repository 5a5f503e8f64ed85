//! Crypto.org chain NFT module messages
//!
//! Free-form text fields (name, schema, uri, data) are omitted from amino
//! JSON when empty, matching the chain's `omitempty` tags.

use super::CosmosMsg;
use crate::error::ChainResult;
use crate::signing::proto::ProtoWriter;
use serde::{Deserialize, Serialize};

/// Create a new NFT denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgIssueDenom {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub schema: String,
    pub sender: String,
}

impl CosmosMsg for MsgIssueDenom {
    const AMINO_TYPE: &'static str = "chainmain/nft/MsgIssueDenom";
    const TYPE_URL: &'static str = "/chainmain.nft.v1.MsgIssueDenom";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.id)
            .string(2, &self.name)
            .string(3, &self.schema)
            .string(4, &self.sender);
        Ok(())
    }
}

/// Mint a token under an existing denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgMintNft {
    pub id: String,
    pub denom_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub uri: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub data: String,
    pub sender: String,
    pub recipient: String,
}

impl CosmosMsg for MsgMintNft {
    const AMINO_TYPE: &'static str = "chainmain/nft/MsgMintNFT";
    const TYPE_URL: &'static str = "/chainmain.nft.v1.MsgMintNFT";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.id)
            .string(2, &self.denom_id)
            .string(3, &self.name)
            .string(4, &self.uri)
            .string(5, &self.data)
            .string(6, &self.sender)
            .string(7, &self.recipient);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEditNft {
    pub id: String,
    pub denom_id: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub uri: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub data: String,
    pub sender: String,
}

impl CosmosMsg for MsgEditNft {
    const AMINO_TYPE: &'static str = "chainmain/nft/MsgEditNFT";
    const TYPE_URL: &'static str = "/chainmain.nft.v1.MsgEditNFT";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.id)
            .string(2, &self.denom_id)
            .string(3, &self.name)
            .string(4, &self.uri)
            .string(5, &self.data)
            .string(6, &self.sender);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTransferNft {
    pub id: String,
    pub denom_id: String,
    pub sender: String,
    pub recipient: String,
}

impl CosmosMsg for MsgTransferNft {
    const AMINO_TYPE: &'static str = "chainmain/nft/MsgTransferNFT";
    const TYPE_URL: &'static str = "/chainmain.nft.v1.MsgTransferNFT";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.id)
            .string(2, &self.denom_id)
            .string(3, &self.sender)
            .string(4, &self.recipient);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBurnNft {
    pub id: String,
    pub denom_id: String,
    pub sender: String,
}

impl CosmosMsg for MsgBurnNft {
    const AMINO_TYPE: &'static str = "chainmain/nft/MsgBurnNFT";
    const TYPE_URL: &'static str = "/chainmain.nft.v1.MsgBurnNFT";

    fn encode_proto(&self, w: &mut ProtoWriter) -> ChainResult<()> {
        w.string(1, &self.id)
            .string(2, &self.denom_id)
            .string(3, &self.sender);
        Ok(())
    }
}
