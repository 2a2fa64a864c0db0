use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("AEAD encryption failed")]
    AeadEncrypt,

    #[error("AEAD decryption failed (authentication tag mismatch)")]
    AeadDecrypt,

    #[error("Sealed box too short: {0} bytes")]
    BoxTooShort(usize),

    #[error("Signature verification failed")]
    SignatureVerification,

    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}
