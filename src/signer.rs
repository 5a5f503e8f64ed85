//! Deterministic secp256k1 Signer
//!
//! ECDSA over secp256k1 with RFC 6979 nonces. The message is hashed with
//! SHA-256 and the signature is returned as 64 bytes `r || s` with low-S
//! normalization, which is the form Cosmos SDK chains accept.

use crate::error::{ChainError, ChainResult};
use crate::log_debug;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use secp256k1::ecdsa::Signature;
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::Zeroizing;

/// Length of a compressed secp256k1 public key
pub const PUBLIC_KEY_LEN: usize = 33;

/// Length of a compact `r || s` signature
pub const SIGNATURE_LEN: usize = 64;

/// Holds a private scalar and produces deterministic signatures
pub struct Secp256k1Signer {
    secp: Secp256k1<All>,
    secret: SecretKey,
    public: PublicKey,
}

impl Secp256k1Signer {
    /// Fails with `InvalidKey` unless the bytes are a scalar in `[1, n-1]`
    pub fn from_bytes(private_key: &[u8]) -> ChainResult<Self> {
        if private_key.len() != 32 {
            return Err(ChainError::invalid_key(format!(
                "private key must be 32 bytes, got {}",
                private_key.len()
            )));
        }
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(private_key)?;
        let public = PublicKey::from_secret_key(&secp, &secret);
        Ok(Self { secp, secret, public })
    }

    /// Accepts an optional `0x` prefix
    pub fn from_hex(private_key_hex: &str) -> ChainResult<Self> {
        let trimmed = private_key_hex.trim_start_matches("0x");
        let bytes = Zeroizing::new(
            hex::decode(trimmed).map_err(|e| ChainError::invalid_key(format!("invalid hex: {}", e)))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Compressed SEC1 public key
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.public.serialize()
    }

    pub fn public_key_base64(&self) -> String {
        STANDARD.encode(self.public_key())
    }

    /// Sign SHA-256(message)
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        let digest = sha256(message);
        let msg = Message::from_digest(digest);
        let mut sig = self.secp.sign_ecdsa(&msg, &self.secret);
        sig.normalize_s();
        let signature = sig.serialize_compact();
        log_debug!(
            "signer",
            "signed message",
            message_len = message.len(),
            digest_hash = hex::encode(digest),
            signature = hex::encode(signature)
        );
        signature
    }

    pub fn sign_base64(&self, message: &[u8]) -> String {
        STANDARD.encode(self.sign(message))
    }
}

impl Drop for Secp256k1Signer {
    fn drop(&mut self) {
        self.secret.non_secure_erase();
    }
}

impl fmt::Debug for Secp256k1Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1Signer")
            .field("public_key", &hex::encode(self.public_key()))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Check a compact signature over SHA-256(message)
///
/// Returns `Ok(false)` for a well-formed signature that does not verify,
/// including high-S signatures.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> ChainResult<bool> {
    if signature.len() != SIGNATURE_LEN {
        return Err(ChainError::invalid_signature(format!(
            "signature must be {} bytes, got {}",
            SIGNATURE_LEN,
            signature.len()
        )));
    }
    let secp = Secp256k1::verification_only();
    let pk = PublicKey::from_slice(public_key)?;
    let sig = Signature::from_compact(signature)?;
    let msg = Message::from_digest(sha256(message));
    Ok(secp.verify_ecdsa(&msg, &sig, &pk).is_ok())
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const KEY_HEX: &str = "d49a797db63b61c148d1767e616ff15c3dd9c83b63cba61c218ea172f238622a";

    #[test]
    fn test_public_key_from_known_private_key() {
        let signer = Secp256k1Signer::from_hex(KEY_HEX).unwrap();
        assert_eq!(
            signer.public_key_base64(),
            "AntL+UxMyJ9NZ9DGLp2v7a3dlSxiNXMaItyOXSRw8iYi"
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = Secp256k1Signer::from_hex(KEY_HEX).unwrap();
        let a = signer.sign(b"hello cosmos");
        let b = signer.sign(b"hello cosmos");
        assert_eq!(a, b);
        assert_ne!(a, signer.sign(b"hello cosmos!"));
    }

    #[test]
    fn test_signature_is_low_s() {
        // n / 2 for secp256k1
        let half_order =
            hex::decode("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0").unwrap();
        let signer = Secp256k1Signer::from_hex(KEY_HEX).unwrap();
        for i in 0u8..16 {
            let sig = signer.sign(&[i; 40]);
            assert!(sig[32..] <= half_order[..]);
        }
    }

    #[test]
    fn test_verify_roundtrip() {
        let signer = Secp256k1Signer::from_hex(KEY_HEX).unwrap();
        let sig = signer.sign(b"payload");
        assert!(verify(&signer.public_key(), b"payload", &sig).unwrap());
        assert!(!verify(&signer.public_key(), b"other", &sig).unwrap());
        assert!(verify(&signer.public_key(), b"payload", &sig[..63]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_scalars() {
        let zero = [0u8; 32];
        assert_eq!(
            Secp256k1Signer::from_bytes(&zero).unwrap_err().code,
            ErrorCode::InvalidKey
        );

        // Curve order n
        let n = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").unwrap();
        assert_eq!(
            Secp256k1Signer::from_bytes(&n).unwrap_err().code,
            ErrorCode::InvalidKey
        );

        assert_eq!(
            Secp256k1Signer::from_bytes(&[1u8; 31]).unwrap_err().code,
            ErrorCode::InvalidKey
        );
        assert_eq!(
            Secp256k1Signer::from_hex("zz").unwrap_err().code,
            ErrorCode::InvalidKey
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let signer = Secp256k1Signer::from_hex(KEY_HEX).unwrap();
        let debug = format!("{:?}", signer);
        assert!(!debug.contains(KEY_HEX));
        assert!(debug.contains("REDACTED"));
    }
}
