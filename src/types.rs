//! Shared value types
//!
//! Coins, fees and the small structs that several message families embed.
//! Field declaration order follows the amino JSON layout; the canonical
//! serializer sorts keys anyway, but pushable (non-signed) JSON keeps it.

use crate::error::{ChainError, ChainResult};
use crate::serde_helpers::{base64_bytes, is_zero, u64_string};
use crate::signing::proto::{Any, ProtoMessage, ProtoWriter};
use serde::{Deserialize, Serialize, Serializer};

/// Base denomination of the Crypto.org chain
pub const DEFAULT_BASE_DENOM: &str = "basecro";

/// Default gas limit used when a fee is not given explicitly
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

// =============================================================================
// Coin
// =============================================================================

/// `cosmos.base.v1beta1.Coin`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCoin")]
pub struct Coin {
    pub amount: String,
    pub denom: String,
}

/// Unchecked wire form; deserialized coins go through [`Coin::new`]
#[derive(Deserialize)]
struct RawCoin {
    amount: String,
    denom: String,
}

impl TryFrom<RawCoin> for Coin {
    type Error = ChainError;

    fn try_from(raw: RawCoin) -> ChainResult<Self> {
        Coin::new(raw.amount, raw.denom)
    }
}

impl Coin {
    /// Build a coin, rejecting signed, fractional or zero-padded amounts
    pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> ChainResult<Self> {
        let amount = amount.into();
        let denom = denom.into();
        validate_amount(&amount)?;
        if denom.is_empty() {
            return Err(ChainError::invalid_input("coin denom must not be empty"));
        }
        Ok(Self { amount, denom })
    }

    /// Coin from an integer amount of base units
    pub fn from_base_units(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            amount: amount.to_string(),
            denom: denom.into(),
        }
    }

    /// Coin in the chain's default base denomination
    pub fn basecro(amount: u128) -> Self {
        Self::from_base_units(amount, DEFAULT_BASE_DENOM)
    }
}

fn validate_amount(amount: &str) -> ChainResult<()> {
    if amount.is_empty() {
        return Err(ChainError::invalid_input("coin amount must not be empty"));
    }
    if !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChainError::invalid_input(format!(
            "coin amount must be a non-negative integer: {:?}",
            amount
        )));
    }
    if amount.len() > 1 && amount.starts_with('0') {
        return Err(ChainError::invalid_input(format!(
            "coin amount has a leading zero: {:?}",
            amount
        )));
    }
    Ok(())
}

impl ProtoMessage for Coin {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.string(1, &self.denom).string(2, &self.amount);
    }
}

// =============================================================================
// Fee
// =============================================================================

/// Transaction fee: gas limit plus the coins paid for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    #[serde(with = "u64_string")]
    pub gas: u64,
    pub amount: Vec<Coin>,
}

impl StdFee {
    pub fn new(gas: u64, amount: Vec<Coin>) -> Self {
        Self { gas, amount }
    }
}

impl Default for StdFee {
    fn default() -> Self {
        Self::new(DEFAULT_GAS_LIMIT, Vec::new())
    }
}

/// `cosmos.tx.v1beta1.Fee` (payer and granter are never set)
impl ProtoMessage for StdFee {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.repeated(1, &self.amount).uint64(2, self.gas);
    }
}

// =============================================================================
// IBC height
// =============================================================================

/// `ibc.core.client.v1.Height`; zero components are omitted in amino JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutHeight {
    #[serde(with = "u64_string", skip_serializing_if = "is_zero", default)]
    pub revision_number: u64,
    #[serde(with = "u64_string", skip_serializing_if = "is_zero", default)]
    pub revision_height: u64,
}

impl TimeoutHeight {
    pub fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

impl ProtoMessage for TimeoutHeight {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.uint64(1, self.revision_number).uint64(2, self.revision_height);
    }
}

// =============================================================================
// Bank
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub address: String,
    pub coins: Vec<Coin>,
}

impl ProtoMessage for Input {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.string(1, &self.address).repeated(2, &self.coins);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub address: String,
    pub coins: Vec<Coin>,
}

impl ProtoMessage for Output {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.string(1, &self.address).repeated(2, &self.coins);
    }
}

// =============================================================================
// Governance / evidence content
// =============================================================================

/// Opaque packed content (proposal content, evidence)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub type_url: String,
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
}

impl Content {
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    pub fn to_any(&self) -> Any {
        Any::new(self.type_url.clone(), self.value.clone())
    }
}

/// Vote options, encoded as their integer value in both encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum VoteOption {
    Unspecified = 0,
    Yes = 1,
    Abstain = 2,
    No = 3,
    NoWithVeto = 4,
}

impl VoteOption {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl Serialize for VoteOption {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.as_i32())
    }
}

impl TryFrom<i32> for VoteOption {
    type Error = ChainError;

    fn try_from(value: i32) -> ChainResult<Self> {
        match value {
            0 => Ok(VoteOption::Unspecified),
            1 => Ok(VoteOption::Yes),
            2 => Ok(VoteOption::Abstain),
            3 => Ok(VoteOption::No),
            4 => Ok(VoteOption::NoWithVeto),
            other => Err(ChainError::invalid_input(format!("unknown vote option {}", other))),
        }
    }
}

impl<'de> Deserialize<'de> for VoteOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        VoteOption::try_from(value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Staking
// =============================================================================

/// Initial commission parameters of a validator (decimal strings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub rate: String,
    pub max_rate: String,
    pub max_change_rate: String,
}

impl ProtoMessage for CommissionRates {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.string(1, &self.rate)
            .string(2, &self.max_rate)
            .string(3, &self.max_change_rate);
    }
}

/// Validator description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub moniker: String,
    pub identity: String,
    pub website: String,
    pub security_contact: String,
    pub details: String,
}

impl ProtoMessage for Description {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.string(1, &self.moniker)
            .string(2, &self.identity)
            .string(3, &self.website)
            .string(4, &self.security_contact)
            .string(5, &self.details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_amount_validation() {
        assert!(Coin::new("0", "basecro").is_ok());
        assert!(Coin::new("288000", "basecro").is_ok());
        assert!(Coin::new("", "basecro").is_err());
        assert!(Coin::new("-5", "basecro").is_err());
        assert!(Coin::new("+5", "basecro").is_err());
        assert!(Coin::new("1.5", "basecro").is_err());
        assert!(Coin::new("007", "basecro").is_err());
        assert!(Coin::new("5", "").is_err());
    }

    #[test]
    fn test_coin_deserialize_validates() {
        let coin: Coin = serde_json::from_str(r#"{"amount":"288000","denom":"basecro"}"#).unwrap();
        assert_eq!(coin, Coin::basecro(288000));

        assert!(serde_json::from_str::<Coin>(r#"{"amount":"-007","denom":"basecro"}"#).is_err());
        assert!(serde_json::from_str::<Coin>(r#"{"amount":"007","denom":"basecro"}"#).is_err());
        assert!(serde_json::from_str::<Coin>(r#"{"amount":"5","denom":""}"#).is_err());
        assert!(serde_json::from_str::<StdFee>(
            r#"{"gas":"1","amount":[{"amount":"1.5","denom":"basecro"}]}"#
        )
        .is_err());
    }

    #[test]
    fn test_coin_json_field_order() {
        let json = serde_json::to_string(&Coin::basecro(100000)).unwrap();
        assert_eq!(json, r#"{"amount":"100000","denom":"basecro"}"#);
    }

    #[test]
    fn test_coin_proto() {
        let coin = Coin::from_base_units(5, "a");
        assert_eq!(coin.to_proto_bytes(), vec![0x0a, 0x01, b'a', 0x12, 0x01, b'5']);
    }

    #[test]
    fn test_fee_gas_as_string() {
        let fee = StdFee::new(30000, vec![Coin::basecro(100000)]);
        let json = serde_json::to_value(&fee).unwrap();
        assert_eq!(json["gas"], "30000");
        assert_eq!(json["amount"][0]["amount"], "100000");
    }

    #[test]
    fn test_default_fee() {
        let fee = StdFee::default();
        assert_eq!(fee.gas, 200_000);
        assert!(fee.amount.is_empty());
    }

    #[test]
    fn test_timeout_height_omits_zero_fields() {
        let json = serde_json::to_string(&TimeoutHeight::zero()).unwrap();
        assert_eq!(json, "{}");

        let json = serde_json::to_string(&TimeoutHeight::new(0, 42)).unwrap();
        assert_eq!(json, r#"{"revision_height":"42"}"#);
    }

    #[test]
    fn test_vote_option_is_numeric() {
        assert_eq!(serde_json::to_string(&VoteOption::NoWithVeto).unwrap(), "4");
        let parsed: VoteOption = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, VoteOption::Abstain);
        assert!(serde_json::from_str::<VoteOption>("9").is_err());
    }

    #[test]
    fn test_content_value_base64() {
        let content = Content::new("type_url", b"content details".to_vec());
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["value"], "Y29udGVudCBkZXRhaWxz");
    }
}
