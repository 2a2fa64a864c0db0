//! Exchange payload — the plaintext inside the obfuscated box.
//!
//! Exists only between serialization on the exporter and deserialization on
//! the importer. It is never stored as a unit.
//!
//! Unknown top-level fields are ignored, so a payload from a newer build
//! still imports.

use serde::{Deserialize, Serialize};

use crate::dial_params::ExchangedDialParameters;
use crate::error::ProtoError;
use crate::server_entry::ServerEntryFields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePayload {
    pub server_entry_fields: ServerEntryFields,
    #[serde(default)]
    pub exchanged_dial_parameters: Option<ExchangedDialParameters>,
}

impl ExchangePayload {
    pub fn to_json(&self) -> Result<Vec<u8>, ProtoError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, ProtoError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_dial_parameters_decode_as_none() {
        let payload =
            ExchangePayload::from_json(br#"{"serverEntryFields":{"ipAddress":"192.0.2.1"}}"#).unwrap();
        assert!(payload.exchanged_dial_parameters.is_none());
        assert_eq!(payload.server_entry_fields.ip_address(), Some("192.0.2.1"));
    }

    #[test]
    fn rejects_structural_mismatch() {
        assert!(ExchangePayload::from_json(b"[]").is_err());
        assert!(ExchangePayload::from_json(br#"{"serverEntryFields":null}"#).is_err());
        assert!(ExchangePayload::from_json(
            br#"{"serverEntryFields":{},"exchangedDialParameters":{"quicVersion":"QUICv1"}}"#
        )
        .is_err());
    }

    #[test]
    fn ignores_fields_from_newer_builds() {
        let payload = ExchangePayload::from_json(
            br#"{"serverEntryFields":{"ipAddress":"192.0.2.1"},"futurePayloadField":{"a":1}}"#,
        )
        .unwrap();
        assert_eq!(payload.server_entry_fields.ip_address(), Some("192.0.2.1"));
        assert!(payload.exchanged_dial_parameters.is_none());
    }
}
