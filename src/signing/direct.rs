//! SIGN_MODE_DIRECT documents
//!
//! `TxBody` and `AuthInfo` are serialized on their own and embedded into
//! `SignDoc` and `TxRaw` as opaque byte blobs, so the bytes that were
//! signed are exactly the bytes that get broadcast.

use super::proto::{Any, ProtoMessage, ProtoWriter};
use super::SignMode;
use crate::multisig::CompactBitArray;
use crate::types::StdFee;

pub const SECP256K1_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

/// Pack a compressed secp256k1 key as `cosmos.crypto.secp256k1.PubKey`
pub fn secp256k1_pubkey_any(public_key: &[u8]) -> Any {
    let mut w = ProtoWriter::new();
    w.bytes(1, public_key);
    Any::new(SECP256K1_PUBKEY_TYPE_URL, w.into_bytes())
}

/// `cosmos.tx.v1beta1.TxBody`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxBody {
    pub messages: Vec<Any>,
    pub memo: String,
    pub timeout_height: u64,
}

impl ProtoMessage for TxBody {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.repeated(1, &self.messages)
            .string(2, &self.memo)
            .uint64(3, self.timeout_height);
    }
}

/// `cosmos.tx.v1beta1.ModeInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeInfo {
    Single(SignMode),
    Multi {
        bitarray: CompactBitArray,
        mode_infos: Vec<ModeInfo>,
    },
}

struct SingleMode(SignMode);

impl ProtoMessage for SingleMode {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.uint32(1, self.0.as_u32());
    }
}

struct MultiMode<'a> {
    bitarray: &'a CompactBitArray,
    mode_infos: &'a [ModeInfo],
}

impl ProtoMessage for MultiMode<'_> {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.message(1, self.bitarray).repeated(2, self.mode_infos);
    }
}

impl ProtoMessage for ModeInfo {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        match self {
            ModeInfo::Single(mode) => {
                w.message(1, &SingleMode(*mode));
            }
            ModeInfo::Multi { bitarray, mode_infos } => {
                w.message(2, &MultiMode { bitarray, mode_infos });
            }
        }
    }
}

/// `cosmos.tx.v1beta1.SignerInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerInfo {
    pub public_key: Option<Any>,
    pub mode_info: ModeInfo,
    pub sequence: u64,
}

impl SignerInfo {
    pub fn single(public_key: &[u8], mode: SignMode, sequence: u64) -> Self {
        Self {
            public_key: Some(secp256k1_pubkey_any(public_key)),
            mode_info: ModeInfo::Single(mode),
            sequence,
        }
    }
}

impl ProtoMessage for SignerInfo {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        if let Some(pk) = &self.public_key {
            w.message(1, pk);
        }
        w.message(2, &self.mode_info).uint64(3, self.sequence);
    }
}

/// `cosmos.tx.v1beta1.AuthInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthInfo {
    pub signer_infos: Vec<SignerInfo>,
    pub fee: StdFee,
}

impl ProtoMessage for AuthInfo {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.repeated(1, &self.signer_infos).message(2, &self.fee);
    }
}

/// `cosmos.tx.v1beta1.SignDoc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignDoc {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub chain_id: String,
    pub account_number: u64,
}

impl SignDoc {
    pub fn new(body: &TxBody, auth_info: &AuthInfo, chain_id: &str, account_number: u64) -> Self {
        Self {
            body_bytes: body.to_proto_bytes(),
            auth_info_bytes: auth_info.to_proto_bytes(),
            chain_id: chain_id.to_string(),
            account_number,
        }
    }

    /// The bytes handed to the signer
    pub fn sign_bytes(&self) -> Vec<u8> {
        self.to_proto_bytes()
    }
}

impl ProtoMessage for SignDoc {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.bytes(1, &self.body_bytes)
            .bytes(2, &self.auth_info_bytes)
            .string(3, &self.chain_id)
            .uint64(4, self.account_number);
    }
}

/// `cosmos.tx.v1beta1.TxRaw`, the broadcastable protobuf transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRaw {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub signatures: Vec<Vec<u8>>,
}

impl TxRaw {
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_proto_bytes()
    }
}

impl ProtoMessage for TxRaw {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.bytes(1, &self.body_bytes).bytes(2, &self.auth_info_bytes);
        for sig in &self.signatures {
            w.repeated_bytes(3, sig);
        }
    }
}
