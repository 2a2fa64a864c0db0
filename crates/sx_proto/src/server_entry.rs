//! Server entries.
//!
//! A server entry travels as an ordered map of named fields. Fields split
//! into two groups:
//!   - signed: everything issued by the network (address, ports,
//!     capabilities, ...), covered by the `signature` field;
//!   - unsigned/local: annotations a client adds after storing the entry
//!     (`localSource`, `localTimestamp`, `isLocalDerivedTag`).
//!
//! Local fields describe *this device's* history with the server. They are
//! stripped before anything crosses the device boundary and again before a
//! signature check, so a peer can neither leak nor inject them.
//!
//! Signed bytes = compact JSON of the map without `signature` and without
//! local fields. `BTreeMap` keeps keys sorted, so the encoding is canonical.

use std::collections::BTreeMap;
use std::net::IpAddr;

use chrono::{DateTime, Timelike, Utc};
use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sx_crypto::signature::sign_base64;
use sx_crypto::ServerEntryVerifier;

use crate::error::ProtoError;
use crate::protocol::{ServerEntrySource, TunnelProtocol, FRONTED_DIAL_PORT};

pub const SIGNATURE_FIELD: &str = "signature";
pub const IP_ADDRESS_FIELD: &str = "ipAddress";
pub const LOCAL_SOURCE_FIELD: &str = "localSource";
pub const LOCAL_TIMESTAMP_FIELD: &str = "localTimestamp";
pub const IS_LOCAL_DERIVED_TAG_FIELD: &str = "isLocalDerivedTag";

/// Fields never covered by the signature and never exchanged.
pub const UNSIGNED_FIELDS: &[&str] = &[
    LOCAL_SOURCE_FIELD,
    LOCAL_TIMESTAMP_FIELD,
    IS_LOCAL_DERIVED_TAG_FIELD,
];

// ── Field map ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerEntryFields(BTreeMap<String, Value>);

impl ServerEntryFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.0.get(IP_ADDRESS_FIELD).and_then(Value::as_str)
    }

    /// True when a non-empty `signature` string is present. Says nothing
    /// about validity.
    pub fn has_signature(&self) -> bool {
        matches!(self.0.get(SIGNATURE_FIELD), Some(Value::String(s)) if !s.is_empty())
    }

    pub fn remove_unsigned_fields(&mut self) {
        for field in UNSIGNED_FIELDS {
            self.0.remove(*field);
        }
    }

    pub fn local_source(&self) -> Option<ServerEntrySource> {
        self.0
            .get(LOCAL_SOURCE_FIELD)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn set_local_source(&mut self, source: ServerEntrySource) {
        self.insert(LOCAL_SOURCE_FIELD, source.as_str());
    }

    pub fn local_timestamp(&self) -> Option<DateTime<Utc>> {
        self.0
            .get(LOCAL_TIMESTAMP_FIELD)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc))
    }

    pub fn set_local_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.insert(LOCAL_TIMESTAMP_FIELD, timestamp.to_rfc3339());
    }

    /// Canonical bytes covered by the origin signature.
    pub fn signed_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        let signed: BTreeMap<&String, &Value> = self
            .0
            .iter()
            .filter(|(k, _)| k.as_str() != SIGNATURE_FIELD && !UNSIGNED_FIELDS.contains(&k.as_str()))
            .collect();
        Ok(serde_json::to_vec(&signed)?)
    }

    /// Sign the entry as the network operator would, replacing any existing
    /// signature.
    pub fn add_signature(&mut self, key: &SigningKey) -> Result<(), ProtoError> {
        let message = self.signed_bytes()?;
        self.insert(SIGNATURE_FIELD, sign_base64(key, &message));
        Ok(())
    }

    pub fn verify_signature(&self, verifier: &ServerEntryVerifier) -> Result<(), ProtoError> {
        let signature = match self.0.get(SIGNATURE_FIELD) {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => return Err(ProtoError::MissingSignature),
        };
        verifier.verify(&self.signed_bytes()?, signature)?;
        Ok(())
    }

    /// Decode the typed view. Fails if `ipAddress` is missing or not an IP.
    pub fn server_entry(&self) -> Result<ServerEntry, ProtoError> {
        let object = Value::Object(self.0.clone().into_iter().collect());
        let entry: ServerEntry = serde_json::from_value(object)?;
        if entry.ip_address.is_empty() {
            return Err(ProtoError::MissingField(IP_ADDRESS_FIELD));
        }
        entry
            .ip_address
            .parse::<IpAddr>()
            .map_err(|e| ProtoError::InvalidField {
                field: IP_ADDRESS_FIELD,
                reason: e.to_string(),
            })?;
        Ok(entry)
    }
}

impl From<BTreeMap<String, Value>> for ServerEntryFields {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

// ── Typed view ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerEntry {
    pub ip_address: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub configuration_version: u32,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub ssh_port: u16,
    #[serde(default)]
    pub ssh_obfuscated_port: u16,
    #[serde(default, rename = "sshObfuscatedQUICPort")]
    pub ssh_obfuscated_quic_port: u16,
    #[serde(default)]
    pub meek_server_port: u16,
    #[serde(default)]
    pub meek_fronting_domain: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl ServerEntry {
    pub fn supports_protocol(&self, protocol: TunnelProtocol) -> bool {
        let capability = protocol.required_capability();
        self.capabilities.iter().any(|c| c == capability)
    }

    /// Port to dial for `protocol`, or `None` when the entry lacks what the
    /// protocol needs.
    pub fn dial_port(&self, protocol: TunnelProtocol) -> Option<u16> {
        let port = match protocol {
            TunnelProtocol::Ssh => self.ssh_port,
            TunnelProtocol::ObfuscatedSsh => self.ssh_obfuscated_port,
            TunnelProtocol::Quic => self.ssh_obfuscated_quic_port,
            TunnelProtocol::UnfrontedMeek | TunnelProtocol::UnfrontedMeekHttps => {
                self.meek_server_port
            }
            TunnelProtocol::FrontedMeek => match self.meek_fronting_domain.as_deref() {
                Some(domain) if !domain.is_empty() => FRONTED_DIAL_PORT,
                _ => 0,
            },
        };
        (port != 0).then_some(port)
    }
}

/// Coarsen a timestamp to the start of its hour.
pub fn truncate_to_hour(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}
