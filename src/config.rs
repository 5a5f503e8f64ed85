//! Chain Configuration
//!
//! Static parameters of a Crypto.org chain network. Nothing here is looked
//! up at runtime: callers pick a preset or load one from JSON and pass the
//! values into the transaction builders.

use crate::error::{ChainError, ChainResult, ErrorCode};
use crate::types::{Coin, StdFee, DEFAULT_GAS_LIMIT};
use crate::utils::parse_json;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a node should handle a submitted legacy transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    #[default]
    Sync,
    Async,
    Block,
}

impl BroadcastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadcastMode::Sync => "sync",
            BroadcastMode::Async => "async",
            BroadcastMode::Block => "block",
        }
    }

    /// `cosmos.tx.v1beta1.BroadcastMode` value for the gRPC/REST `txs` endpoint
    pub fn as_proto_name(&self) -> &'static str {
        match self {
            BroadcastMode::Sync => "BROADCAST_MODE_SYNC",
            BroadcastMode::Async => "BROADCAST_MODE_ASYNC",
            BroadcastMode::Block => "BROADCAST_MODE_BLOCK",
        }
    }
}

impl fmt::Display for BroadcastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for a loaded configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("chain id must not be empty")]
    EmptyChainId,
    #[error("address prefix must not be empty")]
    EmptyAddressPrefix,
    #[error("base denom must not be empty")]
    EmptyBaseDenom,
    #[error("denom exponent {0} is too large")]
    ExponentTooLarge(u32),
    #[error("default gas must be positive")]
    ZeroGas,
    #[error("derivation path {0:?} must start with \"m/\"")]
    BadDerivationPath(String),
}

impl From<ConfigError> for ChainError {
    fn from(e: ConfigError) -> Self {
        ChainError::new(ErrorCode::InvalidInput, e.to_string())
    }
}

/// Parameters of one chain network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: String,
    /// Bech32 human-readable prefix of account addresses
    pub address_prefix: String,
    /// Denomination shown to users, e.g. `cro`
    pub display_denom: String,
    /// Smallest on-chain unit, e.g. `basecro`
    pub base_denom: String,
    /// `1 display_denom == 10^exponent base_denom`
    pub exponent: u32,
    /// BIP-44 path used by wallets for this network
    pub derivation_path: String,
    #[serde(default = "default_gas")]
    pub default_gas: u64,
    /// Default fee in base units
    #[serde(default)]
    pub default_fee_amount: u128,
}

fn default_gas() -> u64 {
    DEFAULT_GAS_LIMIT
}

impl ChainConfig {
    /// Crypto.org Chain mainnet
    pub fn mainnet() -> Self {
        Self {
            chain_id: "crypto-org-chain-mainnet-1".to_string(),
            address_prefix: "cro".to_string(),
            display_denom: "cro".to_string(),
            base_denom: "basecro".to_string(),
            exponent: 8,
            derivation_path: "m/44'/394'/0'/0/0".to_string(),
            default_gas: DEFAULT_GAS_LIMIT,
            default_fee_amount: 0,
        }
    }

    /// Croeseid public testnet
    pub fn testnet_croeseid() -> Self {
        Self {
            chain_id: "testnet-croeseid-4".to_string(),
            address_prefix: "tcro".to_string(),
            display_denom: "tcro".to_string(),
            base_denom: "basetcro".to_string(),
            exponent: 8,
            derivation_path: "m/44'/1'/0'/0/0".to_string(),
            default_gas: DEFAULT_GAS_LIMIT,
            default_fee_amount: 0,
        }
    }

    pub fn from_json(json: &str) -> ChainResult<Self> {
        let config: ChainConfig = parse_json(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_id.is_empty() {
            return Err(ConfigError::EmptyChainId);
        }
        if self.address_prefix.is_empty() {
            return Err(ConfigError::EmptyAddressPrefix);
        }
        if self.base_denom.is_empty() {
            return Err(ConfigError::EmptyBaseDenom);
        }
        // 10^exponent has to fit in u128 for unit math
        if self.exponent > 38 {
            return Err(ConfigError::ExponentTooLarge(self.exponent));
        }
        if self.default_gas == 0 {
            return Err(ConfigError::ZeroGas);
        }
        if !self.derivation_path.starts_with("m/") {
            return Err(ConfigError::BadDerivationPath(self.derivation_path.clone()));
        }
        Ok(())
    }

    /// Fee built from the configured defaults
    pub fn default_fee(&self) -> StdFee {
        let amount = if self.default_fee_amount == 0 {
            Vec::new()
        } else {
            vec![Coin::from_base_units(self.default_fee_amount, self.base_denom.clone())]
        };
        StdFee::new(self.default_gas, amount)
    }

    /// Coin of `amount` base units in this chain's base denom
    pub fn coin(&self, amount: u128) -> Coin {
        Coin::from_base_units(amount, self.base_denom.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        let main = ChainConfig::mainnet();
        assert!(main.validate().is_ok());
        assert_eq!(main.chain_id, "crypto-org-chain-mainnet-1");
        assert_eq!(main.coin(1).denom, "basecro");

        let test = ChainConfig::testnet_croeseid();
        assert!(test.validate().is_ok());
        assert_eq!(test.address_prefix, "tcro");
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let json = r#"{
            "chain_id": "test",
            "address_prefix": "cro",
            "display_denom": "cro",
            "base_denom": "basecro",
            "exponent": 8,
            "derivation_path": "m/44'/394'/0'/0/0"
        }"#;
        let config = ChainConfig::from_json(json).unwrap();
        assert_eq!(config.default_gas, 200_000);
        assert_eq!(config.default_fee(), StdFee::default());
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let json = r#"{
            "chain_id": "",
            "address_prefix": "cro",
            "display_denom": "cro",
            "base_denom": "basecro",
            "exponent": 8,
            "derivation_path": "m/44'/394'/0'/0/0"
        }"#;
        let err = ChainConfig::from_json(json).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("chain id"));

        assert_eq!(
            ChainConfig::from_json("{").unwrap_err().code,
            ErrorCode::JsonError
        );
    }

    #[test]
    fn test_default_fee_with_amount() {
        let mut config = ChainConfig::mainnet();
        config.default_fee_amount = 100_000;
        config.default_gas = 30_000;
        let fee = config.default_fee();
        assert_eq!(fee.gas, 30_000);
        assert_eq!(fee.amount, vec![Coin::basecro(100_000)]);
    }

    #[test]
    fn test_broadcast_mode_names() {
        assert_eq!(BroadcastMode::default(), BroadcastMode::Sync);
        assert_eq!(serde_json::to_string(&BroadcastMode::Block).unwrap(), "\"block\"");
        assert_eq!(BroadcastMode::Async.as_proto_name(), "BROADCAST_MODE_ASYNC");
    }
}
