//! Nonces from the operating system's entropy source.

use rand_core::{OsRng, RngCore};

use crate::NONCE_SIZE;

/// Draw a new 24-byte XChaCha20 nonce.
pub fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);
    nonce
}
