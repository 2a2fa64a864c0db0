//! Payload codec and trust stages.
//!
//! Wire format (opaque text):
//!   base64_std( nonce (24) | xchacha20poly1305(json(ExchangePayload)) )
//!
//! Import runs two independent stages:
//!   1. [`open_payload`]  — base64 → length check → open → JSON. Proves only
//!      that the sender holds the build-wide key, which everyone does.
//!   2. [`authenticate`]  — strip local fields → verify the server entry
//!      signature → typed view. The only way to get a [`TrustedEntry`].

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use sx_crypto::aead::{open_box, seal_box};
use sx_crypto::{CryptoError, ObfuscationKey, ServerEntryVerifier, NONCE_SIZE};
use sx_proto::server_entry::truncate_to_hour;
use sx_proto::{ExchangePayload, ExchangedDialParameters, ServerEntry, ServerEntryFields, ServerEntrySource};

use crate::error::ExchangeError;

/// Serialize and seal a payload under a fresh nonce.
pub fn seal_payload(key: &ObfuscationKey, payload: &ExchangePayload) -> Result<String, ExchangeError> {
    let json = payload.to_json().map_err(ExchangeError::malformed)?;
    let boxed = seal_box(key, &json).map_err(ExchangeError::InvalidKeyConfiguration)?;
    Ok(general_purpose::STANDARD.encode(boxed))
}

/// Decode and open a payload. The result is still untrusted.
pub fn open_payload(key: &ObfuscationKey, encoded: &str) -> Result<ExchangePayload, ExchangeError> {
    let boxed = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(ExchangeError::malformed)?;

    if boxed.len() <= NONCE_SIZE {
        return Err(ExchangeError::PayloadTooShort(boxed.len()));
    }

    let json = open_box(key, &boxed).map_err(|e| match e {
        CryptoError::BoxTooShort(len) => ExchangeError::PayloadTooShort(len),
        _ => ExchangeError::AuthenticationFailed,
    })?;

    ExchangePayload::from_json(&json).map_err(ExchangeError::malformed)
}

/// A server entry whose origin signature verified against the embedded
/// public key.
#[derive(Debug, Clone)]
pub struct TrustedEntry {
    fields: ServerEntryFields,
    entry: ServerEntry,
}

impl TrustedEntry {
    pub fn fields(&self) -> &ServerEntryFields {
        &self.fields
    }

    pub fn server_entry(&self) -> &ServerEntry {
        &self.entry
    }

    pub fn server_ip(&self) -> &str {
        &self.entry.ip_address
    }

    /// Record local provenance. The import time is kept only to the hour.
    pub fn mark_exchanged(&mut self, imported_at: DateTime<Utc>) {
        self.fields.set_local_source(ServerEntrySource::Exchanged);
        self.fields.set_local_timestamp(truncate_to_hour(imported_at));
    }
}

#[derive(Debug, Clone)]
pub struct AuthenticatedPayload {
    pub entry: TrustedEntry,
    pub dial_parameters: Option<ExchangedDialParameters>,
}

/// Second trust stage: signature over the server entry.
pub fn authenticate(
    payload: ExchangePayload,
    verifier: &ServerEntryVerifier,
) -> Result<AuthenticatedPayload, ExchangeError> {
    let ExchangePayload {
        server_entry_fields: mut fields,
        exchanged_dial_parameters,
    } = payload;

    // The peer could have sent anything; local fields are never taken from it.
    fields.remove_unsigned_fields();

    fields
        .verify_signature(verifier)
        .map_err(ExchangeError::InvalidSignature)?;

    let entry = fields.server_entry().map_err(ExchangeError::malformed)?;

    Ok(AuthenticatedPayload {
        entry: TrustedEntry { fields, entry },
        dial_parameters: exchanged_dial_parameters,
    })
}
