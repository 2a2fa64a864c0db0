#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::Arc;

use chrono::Utc;
use ed25519_dalek::SigningKey;
use parking_lot::Mutex;
use serde_json::json;
use sx_crypto::{ObfuscationKey, ServerEntryVerifier};
use sx_exchange::Config;
use sx_proto::{DialParameters, ServerEntryFields, ServerEntrySource, TunnelProtocol};
use sx_store::{AffinityEntry, Datastore, MemoryStore, StoreError};

pub const SHARED_KEY: [u8; 32] = [0x5A; 32];
pub const ENTRY_IP: &str = "192.0.2.50";
pub const CONFIG_VERSION: u32 = 4;

pub fn config(key: [u8; 32], signing: &SigningKey, network_id: &str) -> Config {
    let mut config = Config::default();
    config.exchange_obfuscation_key = ObfuscationKey::from_bytes(key).to_base64();
    config.server_entry_signature_public_key = ServerEntryVerifier::from(signing).to_base64();
    config.network_id = Some(network_id.to_string());
    config
}

pub fn unsigned_entry(ip: &str, capabilities: &[&str]) -> ServerEntryFields {
    let mut fields = ServerEntryFields::new();
    fields.insert("ipAddress", ip);
    fields.insert("region", "NL");
    fields.insert("configurationVersion", CONFIG_VERSION);
    fields.insert("capabilities", json!(capabilities));
    fields.insert("sshPort", 22);
    fields.insert("sshObfuscatedPort", 995);
    fields.insert("sshObfuscatedQUICPort", 443);
    fields.insert("meekServerPort", 80);
    fields.insert("meekFrontingDomain", "cdn.example.net");
    fields.insert("tag", "tag-50");
    fields
}

pub fn signed_entry(signing: &SigningKey, ip: &str, capabilities: &[&str]) -> ServerEntryFields {
    let mut fields = unsigned_entry(ip, capabilities);
    fields.add_signature(signing).unwrap();
    fields
}

/// Annotations a client adds to entries it has stored.
pub fn with_local_annotations(mut fields: ServerEntryFields) -> ServerEntryFields {
    fields.set_local_source(ServerEntrySource::Remote);
    fields.set_local_timestamp(Utc::now());
    fields.insert("isLocalDerivedTag", true);
    fields
}

pub fn quic_dial_parameters(ip: &str, network_id: &str) -> DialParameters {
    DialParameters {
        server_ip: ip.to_string(),
        network_id: network_id.to_string(),
        tunnel_protocol: TunnelProtocol::Quic,
        quic_version: Some("QUICv1".into()),
        tls_profile: None,
        dial_port: 443,
        server_entry_configuration_version: CONFIG_VERSION,
        is_exchanged: false,
        local_bind_address: Some("10.1.1.4:0".into()),
        established_rtt_ms: Some(120),
        last_used_at: Some(Utc::now()),
        expires_at: None,
    }
}

/// Exporter-side store holding one signed, locally annotated entry at the
/// affinity position, optionally with dial parameters for `network_id`.
pub fn exporter_store(
    signing: &SigningKey,
    network_id: &str,
    dial: Option<DialParameters>,
) -> MemoryStore {
    let store = MemoryStore::new();
    let fields = with_local_annotations(signed_entry(signing, ENTRY_IP, &["OSSH", "QUIC"]));
    store.store_server_entry(&fields, true).unwrap();
    if let Some(dial) = dial {
        store.set_dial_parameters(ENTRY_IP, network_id, &dial).unwrap();
    }
    store
}

pub fn affinity(store: &dyn Datastore, network_id: &str) -> Option<AffinityEntry> {
    store.affinity_server_entry(network_id).unwrap()
}

// ── Fault injection ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    AffinityLookup,
    Store,
    Promote,
    SetDialParameters,
}

pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_at: FailAt,
}

impl FailingStore {
    pub fn new(inner: MemoryStore, fail_at: FailAt) -> Self {
        Self { inner, fail_at }
    }

    fn check(&self, step: FailAt) -> Result<(), StoreError> {
        if self.fail_at == step {
            return Err(StoreError::Persist(format!("injected failure at {step:?}")));
        }
        Ok(())
    }
}

impl Datastore for FailingStore {
    fn affinity_server_entry(&self, network_id: &str) -> Result<Option<AffinityEntry>, StoreError> {
        self.check(FailAt::AffinityLookup)?;
        self.inner.affinity_server_entry(network_id)
    }

    fn store_server_entry(
        &self,
        fields: &ServerEntryFields,
        replace_if_exists: bool,
    ) -> Result<(), StoreError> {
        self.check(FailAt::Store)?;
        self.inner.store_server_entry(fields, replace_if_exists)
    }

    fn promote_server_entry(&self, server_ip: &str) -> Result<(), StoreError> {
        self.check(FailAt::Promote)?;
        self.inner.promote_server_entry(server_ip)
    }

    fn set_dial_parameters(
        &self,
        server_ip: &str,
        network_id: &str,
        params: &DialParameters,
    ) -> Result<(), StoreError> {
        self.check(FailAt::SetDialParameters)?;
        self.inner.set_dial_parameters(server_ip, network_id, params)
    }

    fn dial_parameters(
        &self,
        server_ip: &str,
        network_id: &str,
    ) -> Result<Option<DialParameters>, StoreError> {
        self.inner.dial_parameters(server_ip, network_id)
    }

    fn server_entry(&self, server_ip: &str) -> Result<Option<ServerEntryFields>, StoreError> {
        self.inner.server_entry(server_ip)
    }
}

// ── Log capture ───────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with every tracing event, at any level, captured as text.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, buffer.contents())
}
