//! Multi-Signature Aggregation
//!
//! Collects member signatures for a threshold multisig account. The
//! signature list is kept ordered by each member's position in the
//! multisig key set: a signature for member `i` lives at index
//! `num_true_bits_before(i)` of the list, so the `k`-th signature always
//! belongs to the `k`-th set bit.

pub mod bitarray;

pub use bitarray::CompactBitArray;

use crate::error::{ChainError, ChainResult};
use crate::signing::amino::SECP256K1_PUBKEY_AMINO_TYPE;
use crate::signing::direct::{secp256k1_pubkey_any, ModeInfo, SignerInfo};
use crate::signing::proto::{Any, ProtoMessage, ProtoWriter};
use crate::signing::SignMode;
use crate::signer::PUBLIC_KEY_LEN;
use crate::{log_debug, log_warn};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use std::fmt;

pub const LEGACY_AMINO_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.multisig.LegacyAminoPubKey";

/// Amino name of a threshold multisig key
pub const MULTISIG_PUBKEY_AMINO_TYPE: &str = "tendermint/PubKeyMultisigThreshold";

/// One member's signature over the shared sign document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSignature {
    /// Compressed secp256k1 key of the member
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
    /// Sequence of the multisig account the member signed for
    pub sequence: u64,
    pub sign_mode: SignMode,
}

impl SingleSignature {
    /// A legacy amino JSON signature, the only mode members may use
    pub fn new(public_key: impl Into<Vec<u8>>, signature: impl Into<Vec<u8>>, sequence: u64) -> Self {
        Self {
            public_key: public_key.into(),
            signature: signature.into(),
            sequence,
            sign_mode: SignMode::LegacyAminoJson,
        }
    }
}

/// Bit array of contributing members plus their signatures in member order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSignatureData {
    bit_array: CompactBitArray,
    signatures: Vec<Vec<u8>>,
}

impl MultiSignatureData {
    /// Empty aggregate for a key set of `n` members
    pub fn new(n: usize) -> ChainResult<Self> {
        Ok(Self {
            bit_array: CompactBitArray::new(n)?,
            signatures: Vec::new(),
        })
    }

    /// Record `signature` for the member whose key equals `signer`
    ///
    /// A member that already signed has its signature replaced in place.
    pub fn add_signature(
        &mut self,
        signature: Vec<u8>,
        signer: &[u8],
        all_pub_keys: &[Vec<u8>],
    ) -> ChainResult<()> {
        if all_pub_keys.len() != self.bit_array.count() {
            return Err(ChainError::invalid_size(format!(
                "key set has {} members, bit array has {} bits",
                all_pub_keys.len(),
                self.bit_array.count()
            )));
        }
        let index = all_pub_keys
            .iter()
            .position(|k| k.as_slice() == signer)
            .ok_or_else(|| {
                ChainError::unknown_signer(format!(
                    "public key {} is not a member of the multisig",
                    hex::encode(signer)
                ))
            })?;

        let rank = self.bit_array.num_true_bits_before(index);

        if self.bit_array.get(index) {
            log_warn!("multisig", "replacing existing member signature", index = index);
            self.signatures[rank] = signature;
            return Ok(());
        }

        if !self.bit_array.set(index, true) {
            return Err(ChainError::invalid_size(format!(
                "member index {} is outside the bit array",
                index
            )));
        }
        if rank == self.signatures.len() {
            self.signatures.push(signature);
        } else {
            self.signatures.insert(rank, signature);
        }
        log_debug!(
            "multisig",
            "added member signature",
            index = index,
            rank = rank,
            collected = self.signatures.len()
        );
        Ok(())
    }

    pub fn add_single_signature(
        &mut self,
        single: &SingleSignature,
        all_pub_keys: &[Vec<u8>],
    ) -> ChainResult<()> {
        if single.sign_mode != SignMode::LegacyAminoJson {
            return Err(ChainError::invalid_input(
                "multisig members must sign in legacy amino JSON mode",
            ));
        }
        self.add_signature(single.signature.clone(), &single.public_key, all_pub_keys)
    }

    /// Drop every collected signature
    pub fn clear(&mut self) {
        self.bit_array.clear();
        self.signatures.clear();
    }

    pub fn bit_array(&self) -> &CompactBitArray {
        &self.bit_array
    }

    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.signatures
    }

    pub fn count_set_bits(&self) -> usize {
        self.bit_array.count_set_bits()
    }

    /// Fails with `ThresholdNotMet` when fewer than `threshold` members signed
    pub fn check_threshold(&self, threshold: usize) -> ChainResult<()> {
        let have = self.count_set_bits();
        if have < threshold {
            return Err(ChainError::threshold_not_met(have, threshold));
        }
        Ok(())
    }

    /// `cosmos.crypto.multisig.v1beta1.MultiSignature` bytes, the single
    /// signature entry of the multisig signer in `TxRaw`
    pub fn to_multi_signature_bytes(&self) -> Vec<u8> {
        self.to_proto_bytes()
    }

    /// `ModeInfo.Multi` with one legacy amino entry per collected signature
    pub fn mode_info(&self) -> ModeInfo {
        ModeInfo::Multi {
            bitarray: self.bit_array.clone(),
            mode_infos: vec![ModeInfo::Single(SignMode::LegacyAminoJson); self.signatures.len()],
        }
    }
}

impl ProtoMessage for MultiSignatureData {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        for sig in &self.signatures {
            w.repeated_bytes(1, sig);
        }
    }
}

impl fmt::Display for MultiSignatureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sigs: Vec<String> = self.signatures.iter().map(|s| STANDARD.encode(s)).collect();
        write!(f, "signatures: {:?}, bit_array: {}", sigs, self.bit_array)
    }
}

/// Threshold multisig public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyAminoPubKey {
    threshold: u32,
    public_keys: Vec<Vec<u8>>,
}

impl LegacyAminoPubKey {
    /// Member keys must be compressed secp256k1 keys; the order is the
    /// member order used by the bit array
    pub fn new(threshold: u32, public_keys: Vec<Vec<u8>>) -> ChainResult<Self> {
        if public_keys.is_empty() {
            return Err(ChainError::invalid_input("multisig needs at least one member key"));
        }
        if threshold == 0 || threshold as usize > public_keys.len() {
            return Err(ChainError::invalid_input(format!(
                "threshold {} is outside 1..={}",
                threshold,
                public_keys.len()
            )));
        }
        if let Some(bad) = public_keys.iter().find(|k| k.len() != PUBLIC_KEY_LEN) {
            return Err(ChainError::invalid_key(format!(
                "member key must be {} bytes, got {}",
                PUBLIC_KEY_LEN,
                bad.len()
            )));
        }
        Ok(Self {
            threshold,
            public_keys,
        })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn public_keys(&self) -> &[Vec<u8>] {
        &self.public_keys
    }

    pub fn len(&self) -> usize {
        self.public_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.public_keys.is_empty()
    }

    /// Empty aggregate sized for this key set
    pub fn new_signature_data(&self) -> ChainResult<MultiSignatureData> {
        MultiSignatureData::new(self.public_keys.len())
    }

    pub fn to_any(&self) -> Any {
        Any::pack(LEGACY_AMINO_PUBKEY_TYPE_URL, self)
    }

    /// `SignerInfo` of the multisig account for a finished aggregate
    pub fn signer_info(&self, data: &MultiSignatureData, sequence: u64) -> SignerInfo {
        SignerInfo {
            public_key: Some(self.to_any()),
            mode_info: data.mode_info(),
            sequence,
        }
    }

    /// Amino JSON form, as shown by `query account`
    pub fn to_amino_json(&self) -> Value {
        let pubkeys: Vec<Value> = self
            .public_keys
            .iter()
            .map(|k| json!({"type": SECP256K1_PUBKEY_AMINO_TYPE, "value": STANDARD.encode(k)}))
            .collect();
        json!({
            "type": MULTISIG_PUBKEY_AMINO_TYPE,
            "value": {
                "threshold": self.threshold.to_string(),
                "pubkeys": pubkeys,
            },
        })
    }
}

impl ProtoMessage for LegacyAminoPubKey {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.uint32(1, self.threshold);
        for key in &self.public_keys {
            w.message(2, &secp256k1_pubkey_any(key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn keys() -> Vec<Vec<u8>> {
        (1u8..=3).map(|i| vec![i; 33]).collect()
    }

    #[test]
    fn test_out_of_order_signatures_are_sorted_by_member() {
        let keys = keys();
        let mut data = MultiSignatureData::new(3).unwrap();
        data.add_signature(b"sig2".to_vec(), &keys[2], &keys).unwrap();
        data.add_signature(b"sig0".to_vec(), &keys[0], &keys).unwrap();
        data.add_signature(b"sig1".to_vec(), &keys[1], &keys).unwrap();

        assert_eq!(
            data.signatures(),
            &[b"sig0".to_vec(), b"sig1".to_vec(), b"sig2".to_vec()]
        );
        assert_eq!(data.count_set_bits(), 3);
    }

    #[test]
    fn test_resign_replaces_in_place() {
        let keys = keys();
        let mut data = MultiSignatureData::new(3).unwrap();
        data.add_signature(b"a".to_vec(), &keys[0], &keys).unwrap();
        data.add_signature(b"c".to_vec(), &keys[2], &keys).unwrap();
        let bits_before = data.bit_array().clone();

        data.add_signature(b"c2".to_vec(), &keys[2], &keys).unwrap();
        assert_eq!(data.signatures(), &[b"a".to_vec(), b"c2".to_vec()]);
        assert_eq!(data.bit_array(), &bits_before);
    }

    #[test]
    fn test_unknown_signer() {
        let keys = keys();
        let mut data = MultiSignatureData::new(3).unwrap();
        let err = data.add_signature(vec![0], &[9u8; 33], &keys).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownSigner);
        assert!(data.signatures().is_empty());
        assert_eq!(data.count_set_bits(), 0);
    }

    #[test]
    fn test_key_set_must_match_bit_array() {
        let keys: Vec<Vec<u8>> = (1u8..=4).map(|i| vec![i; 33]).collect();
        let mut data = MultiSignatureData::new(2).unwrap();

        let err = data.add_signature(b"s".to_vec(), &keys[3], &keys).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSize);
        let err = data.add_signature(b"s".to_vec(), &keys[0], &keys).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSize);
        assert!(data.signatures().is_empty());
        assert_eq!(data.count_set_bits(), 0);

        let err = data.add_signature(b"s".to_vec(), &keys[0], &keys[..1]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSize);
        assert!(data.signatures().is_empty());
    }

    #[test]
    fn test_threshold() {
        let keys = keys();
        let mut data = MultiSignatureData::new(3).unwrap();
        data.add_signature(b"x".to_vec(), &keys[1], &keys).unwrap();
        assert_eq!(
            data.check_threshold(2).unwrap_err().code,
            ErrorCode::ThresholdNotMet
        );
        data.add_signature(b"y".to_vec(), &keys[0], &keys).unwrap();
        assert!(data.check_threshold(2).is_ok());
    }

    #[test]
    fn test_single_signature_must_be_amino() {
        let keys = keys();
        let mut data = MultiSignatureData::new(3).unwrap();
        let mut single = SingleSignature::new(keys[0].clone(), vec![1u8], 0);
        single.sign_mode = SignMode::Direct;
        assert_eq!(
            data.add_single_signature(&single, &keys).unwrap_err().code,
            ErrorCode::InvalidInput
        );

        single.sign_mode = SignMode::LegacyAminoJson;
        data.add_single_signature(&single, &keys).unwrap();
        assert_eq!(data.signatures(), &[vec![1u8]]);
    }

    #[test]
    fn test_multi_signature_bytes_and_mode_info() {
        let keys = keys();
        let mut data = MultiSignatureData::new(3).unwrap();
        data.add_signature(vec![0xaa], &keys[2], &keys).unwrap();
        data.add_signature(vec![0xbb], &keys[0], &keys).unwrap();

        assert_eq!(
            data.to_multi_signature_bytes(),
            vec![0x0a, 0x01, 0xbb, 0x0a, 0x01, 0xaa]
        );
        match data.mode_info() {
            ModeInfo::Multi { bitarray, mode_infos } => {
                assert_eq!(bitarray.elems(), &[0b1010_0000]);
                assert_eq!(mode_infos.len(), 2);
            }
            other => panic!("unexpected mode info {:?}", other),
        }
        assert_eq!(data.to_string(), "signatures: [\"uw==\", \"qg==\"], bit_array: extra_bits_stored:3, elems:oA==");
    }

    #[test]
    fn test_legacy_amino_pubkey_validation() {
        assert!(LegacyAminoPubKey::new(2, keys()).is_ok());
        assert_eq!(
            LegacyAminoPubKey::new(0, keys()).unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            LegacyAminoPubKey::new(4, keys()).unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            LegacyAminoPubKey::new(1, vec![vec![1; 32]]).unwrap_err().code,
            ErrorCode::InvalidKey
        );
    }

    #[test]
    fn test_legacy_amino_pubkey_encoding() {
        let pk = LegacyAminoPubKey::new(2, keys()).unwrap();
        let any = pk.to_any();
        assert_eq!(any.type_url, "/cosmos.crypto.multisig.LegacyAminoPubKey");
        assert_eq!(&any.value[..2], &[0x08, 0x02]);

        let json = pk.to_amino_json();
        assert_eq!(json["type"], "tendermint/PubKeyMultisigThreshold");
        assert_eq!(json["value"]["threshold"], "2");
        assert_eq!(json["value"]["pubkeys"].as_array().unwrap().len(), 3);
    }
}
