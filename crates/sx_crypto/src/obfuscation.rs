//! Build-wide exchange obfuscation key.
//!
//! The key ships inside every client build and is therefore known to any
//! peer, honest or not. It hides payload contents from casual inspection and
//! detects corruption; it never establishes where a payload came from.

use std::fmt;

use base64::{engine::general_purpose, Engine as _};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;
use crate::KEY_SIZE;

/// 32-byte XChaCha20-Poly1305 key. Cleared on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ObfuscationKey([u8; KEY_SIZE]);

impl ObfuscationKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Decode a standard-base64 key and check it is exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, CryptoError> {
        let mut bytes = general_purpose::STANDARD.decode(encoded.trim())?;
        if bytes.len() != KEY_SIZE {
            let len = bytes.len();
            bytes.zeroize();
            return Err(CryptoError::InvalidKey(format!(
                "obfuscation key must be {KEY_SIZE} bytes, got {len}"
            )));
        }
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self(key))
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for ObfuscationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ObfuscationKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_roundtrip() {
        let key = ObfuscationKey::from_bytes([9u8; KEY_SIZE]);
        let decoded = ObfuscationKey::from_base64(&key.to_base64()).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn rejects_wrong_length() {
        let short = general_purpose::STANDARD.encode([1u8; 31]);
        assert!(matches!(
            ObfuscationKey::from_base64(&short),
            Err(CryptoError::InvalidKey(_))
        ));
        let long = general_purpose::STANDARD.encode([1u8; 33]);
        assert!(ObfuscationKey::from_base64(&long).is_err());
        assert!(ObfuscationKey::from_base64("").is_err());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            ObfuscationKey::from_base64("not base64!!"),
            Err(CryptoError::Base64Decode(_))
        ));
    }

    #[test]
    fn debug_is_redacted() {
        let key = ObfuscationKey::from_bytes([0xAB; KEY_SIZE]);
        assert_eq!(format!("{key:?}"), "ObfuscationKey(<redacted>)");
    }
}
