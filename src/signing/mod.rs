//! Canonical Signing Documents
//!
//! The bytes that get hashed and signed for a transaction, in either of
//! the two sign modes the chain accepts:
//! - Legacy amino JSON (sorted-key canonical JSON)
//! - SIGN_MODE_DIRECT (protobuf `SignDoc`)

pub mod amino;
pub mod canonical_json;
pub mod direct;
pub mod proto;

pub use amino::*;
pub use canonical_json::*;
pub use direct::*;
pub use proto::{Any, ProtoMessage, ProtoWriter};

use serde::{Deserialize, Serialize};
use std::fmt;

/// `cosmos.tx.signing.v1beta1.SignMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignMode {
    Direct,
    #[default]
    LegacyAminoJson,
}

impl SignMode {
    /// Protobuf enum value
    pub fn as_u32(self) -> u32 {
        match self {
            SignMode::Direct => 1,
            SignMode::LegacyAminoJson => 127,
        }
    }
}

impl fmt::Display for SignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignMode::Direct => f.write_str("direct"),
            SignMode::LegacyAminoJson => f.write_str("legacy_amino_json"),
        }
    }
}
