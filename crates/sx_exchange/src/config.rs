use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sx_crypto::{ObfuscationKey, ServerEntryVerifier};
use sx_proto::ClientParameters;

use crate::error::ExchangeError;

pub const UNKNOWN_NETWORK_ID: &str = "UNKNOWN";

/// Supplies the ID of the network the device is currently on.
pub trait NetworkIdGetter: Send + Sync {
    fn network_id(&self) -> String;
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base64, 32 bytes. Same value in every build.
    #[serde(default)]
    pub exchange_obfuscation_key: String,
    /// Base64 Ed25519 public key of the network's server entry signer.
    #[serde(default)]
    pub server_entry_signature_public_key: String,
    /// Used when no runtime getter is installed.
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub client_parameters: ClientParameters,
    #[serde(skip)]
    network_id_getter: Option<Arc<dyn NetworkIdGetter>>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open config {}", path.display()))?;
        let config: Config = serde_json::from_reader(file)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn with_network_id_getter(mut self, getter: Arc<dyn NetworkIdGetter>) -> Self {
        self.network_id_getter = Some(getter);
        self
    }

    pub fn network_id(&self) -> String {
        if let Some(getter) = &self.network_id_getter {
            return getter.network_id();
        }
        self.network_id
            .clone()
            .unwrap_or_else(|| UNKNOWN_NETWORK_ID.to_string())
    }

    pub fn obfuscation_key(&self) -> Result<ObfuscationKey, ExchangeError> {
        ObfuscationKey::from_base64(&self.exchange_obfuscation_key)
            .map_err(ExchangeError::InvalidKeyConfiguration)
    }

    pub fn signature_verifier(&self) -> Result<ServerEntryVerifier, ExchangeError> {
        ServerEntryVerifier::from_base64(&self.server_entry_signature_public_key)
            .map_err(ExchangeError::InvalidKeyConfiguration)
    }

    pub fn client_parameters(&self) -> &ClientParameters {
        &self.client_parameters
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("exchange_obfuscation_key", &"<redacted>")
            .field(
                "server_entry_signature_public_key",
                &self.server_entry_signature_public_key,
            )
            .field("network_id", &self.network_id)
            .field("client_parameters", &self.client_parameters)
            .field("network_id_getter", &self.network_id_getter.is_some())
            .finish()
    }
}
