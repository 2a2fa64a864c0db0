//! sx_crypto — cryptographic primitives for the server entry exchange
//!
//! # Two independent trust layers
//! - `obfuscation` — the build-wide 32-byte XChaCha20-Poly1305 key. Every
//!   installation carries the same key, so opening a payload proves nothing
//!   about who produced it. It only keeps server entries from being trivially
//!   dumped or published.
//! - `signature`   — the embedded Ed25519 public key of the network operator.
//!   A server entry is trusted only once its signature verifies here.
//!
//! The two are distinct types and neither is derived from the other.
//!
//! # Module layout
//! - `aead`        — seal/open helpers, wire format `nonce ‖ ct+tag`
//! - `obfuscation` — `ObfuscationKey` newtype, base64 loading + length check
//! - `signature`   — `ServerEntryVerifier` and signing helpers
//! - `random`      — OS CSPRNG helpers (nonces)
//! - `error`       — unified error type

pub mod aead;
pub mod error;
pub mod obfuscation;
pub mod random;
pub mod signature;

pub use error::CryptoError;
pub use obfuscation::ObfuscationKey;
pub use signature::ServerEntryVerifier;

/// Obfuscation key length in bytes.
pub const KEY_SIZE: usize = 32;

/// XChaCha20-Poly1305 nonce length in bytes.
pub const NONCE_SIZE: usize = 24;

/// Poly1305 tag length in bytes.
pub const TAG_SIZE: usize = 16;
