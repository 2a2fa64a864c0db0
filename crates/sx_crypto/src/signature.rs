//! Server entry origin signatures (Ed25519).
//!
//! The network operator signs the authoritative fields of every server entry;
//! clients embed the matching public key. A valid signature is the only
//! thing that makes an exchanged server entry trustworthy.

use base64::{engine::general_purpose, Engine as _};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use crate::error::CryptoError;

/// Embedded server entry signature public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntryVerifier {
    key: VerifyingKey,
}

impl ServerEntryVerifier {
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Parse a standard-base64 32-byte Ed25519 public key.
    pub fn from_base64(encoded: &str) -> Result<Self, CryptoError> {
        let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            CryptoError::InvalidKey(format!(
                "signature public key must be 32 bytes, got {}",
                b.len()
            ))
        })?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| CryptoError::InvalidKey(format!("signature public key: {e}")))?;
        Ok(Self { key })
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.key.to_bytes())
    }

    /// Verify a base64 signature over `message`.
    pub fn verify(&self, message: &[u8], signature_b64: &str) -> Result<(), CryptoError> {
        let signature = decode_signature(signature_b64)?;
        self.key
            .verify_strict(message, &signature)
            .map_err(|_| CryptoError::SignatureVerification)
    }
}

impl From<&SigningKey> for ServerEntryVerifier {
    fn from(signing: &SigningKey) -> Self {
        Self::new(signing.verifying_key())
    }
}

/// Sign `message`, returning the standard-base64 signature.
pub fn sign_base64(key: &SigningKey, message: &[u8]) -> String {
    let signature = key.sign(message);
    general_purpose::STANDARD.encode(signature.to_bytes())
}

pub fn generate_signing_key() -> SigningKey {
    SigningKey::generate(&mut OsRng)
}

fn decode_signature(b64: &str) -> Result<Signature, CryptoError> {
    let bytes = general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| CryptoError::MalformedSignature(format!("decode: {e}")))?;
    let arr: [u8; 64] = bytes
        .try_into()
        .map_err(|_| CryptoError::MalformedSignature("signature length".into()))?;
    Ok(Signature::from_bytes(&arr))
}
