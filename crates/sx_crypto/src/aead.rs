//! Authenticated encryption for exchange payloads
//!
//! Uses XChaCha20-Poly1305 (192-bit nonce).
//! Key size: 32 bytes.  Nonce: 24 bytes (random).  Tag: 16 bytes.
//!
//! Sealed box wire format:
//!   [ nonce (24 bytes) | ciphertext + tag ]

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};

use crate::error::CryptoError;
use crate::obfuscation::ObfuscationKey;
use crate::random::generate_nonce;
use crate::NONCE_SIZE;

/// Encrypt `plaintext` under an explicit nonce. Returns ciphertext || tag.
pub fn seal(
    key: &ObfuscationKey,
    nonce: &[u8; NONCE_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| CryptoError::AeadEncrypt)?;
    cipher
        .encrypt(XNonce::from_slice(nonce), plaintext)
        .map_err(|_| CryptoError::AeadEncrypt)
}

/// Authenticate and decrypt ciphertext || tag under an explicit nonce.
pub fn open(
    key: &ObfuscationKey,
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| CryptoError::AeadDecrypt)?;
    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::AeadDecrypt)
}

/// Seal with a freshly drawn nonce and prepend it.
///
/// The obfuscation key is not single-use, so a new nonce is drawn on every
/// call and never cached.
pub fn seal_box(key: &ObfuscationKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let nonce = generate_nonce();
    let sealed = seal(key, &nonce, plaintext)?;

    let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Open wire-format bytes (nonce || ciphertext+tag).
///
/// Anything not strictly longer than the nonce is rejected before any
/// decryption is attempted.
pub fn open_box(key: &ObfuscationKey, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() <= NONCE_SIZE {
        return Err(CryptoError::BoxTooShort(data.len()));
    }
    let (nonce_bytes, sealed) = data.split_at(NONCE_SIZE);
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(nonce_bytes);
    open(key, &nonce, sealed)
}
