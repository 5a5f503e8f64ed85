//! Unified error types for the signing core
//!
//! Every failure in this crate is local, synchronous and non-retryable:
//! it reports bad input or misuse, never a transient condition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all signing operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl ChainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_size(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSize, msg)
    }

    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidKey, msg)
    }

    pub fn unknown_signer(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnknownSigner, msg)
    }

    pub fn threshold_not_met(have: usize, threshold: usize) -> Self {
        Self::new(
            ErrorCode::ThresholdNotMet,
            format!("{} signature(s) collected, threshold is {}", have, threshold),
        )
    }

    pub fn no_signature(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoSignature, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn invalid_signature(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSignature, msg)
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::EncodingError, msg)
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ChainError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Bit array
    InvalidSize,

    // Keys and signatures
    InvalidKey,
    InvalidSignature,

    // Multisig
    UnknownSigner,
    ThresholdNotMet,

    // Assembly
    NoSignature,
    InvalidInput,

    // Encoding
    EncodingError,
    JsonError,
    HexError,
}

/// Result type alias for signing operations
pub type ChainResult<T> = Result<T, ChainError>;

// Conversions from common error types

impl From<serde_json::Error> for ChainError {
    fn from(e: serde_json::Error) -> Self {
        ChainError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for ChainError {
    fn from(e: hex::FromHexError) -> Self {
        ChainError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<base64::DecodeError> for ChainError {
    fn from(e: base64::DecodeError) -> Self {
        ChainError::new(ErrorCode::EncodingError, format!("Base64 error: {}", e))
    }
}

impl From<secp256k1::Error> for ChainError {
    fn from(e: secp256k1::Error) -> Self {
        match e {
            secp256k1::Error::InvalidSecretKey => {
                ChainError::new(ErrorCode::InvalidKey, "private key is not in [1, n-1]")
            }
            secp256k1::Error::InvalidPublicKey => {
                ChainError::new(ErrorCode::InvalidKey, "malformed secp256k1 public key")
            }
            secp256k1::Error::InvalidSignature | secp256k1::Error::IncorrectSignature => {
                ChainError::new(ErrorCode::InvalidSignature, e.to_string())
            }
            other => ChainError::new(ErrorCode::InvalidInput, format!("Secp256k1 error: {}", other)),
        }
    }
}
