//! Dial parameters and their exchangeable subset.
//!
//! `DialParameters` records how a connection to a server was last
//! established on a given network, so the next attempt can skip
//! renegotiation. Much of it only makes sense on that network and device.
//!
//! `ExchangedDialParameters` is the part worth handing to another client,
//! which may be on a different network:
//!   kept     — tunnel protocol, QUIC version, TLS profile, the server entry
//!              configuration version the choice was made against
//!   dropped  — network ID, dial port, local bind address, measured RTT,
//!              last-used time, replay expiry
//!
//! Import runs validate → materialize. Validation failure is not an error
//! for the import as a whole; the caller simply drops the parameters.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DialParametersError;
use crate::protocol::{TunnelProtocol, SUPPORTED_QUIC_VERSIONS, SUPPORTED_TLS_PROFILES};
use crate::server_entry::ServerEntry;

pub const DEFAULT_REPLAY_TTL_HOURS: u32 = 24;

/// Per-network client parameter set consulted when materializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientParameters {
    #[serde(default = "default_replay_ttl_hours")]
    pub replay_dial_parameters_ttl_hours: u32,
}

fn default_replay_ttl_hours() -> u32 {
    DEFAULT_REPLAY_TTL_HOURS
}

impl Default for ClientParameters {
    fn default() -> Self {
        Self {
            replay_dial_parameters_ttl_hours: DEFAULT_REPLAY_TTL_HOURS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialParameters {
    pub server_ip: String,
    pub network_id: String,
    pub tunnel_protocol: TunnelProtocol,
    #[serde(default)]
    pub quic_version: Option<String>,
    #[serde(default)]
    pub tls_profile: Option<String>,
    pub dial_port: u16,
    pub server_entry_configuration_version: u32,
    #[serde(default)]
    pub is_exchanged: bool,
    #[serde(default)]
    pub local_bind_address: Option<String>,
    #[serde(default)]
    pub established_rtt_ms: Option<u32>,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangedDialParameters {
    /// Kept as a string: the importer may be an older build that does not
    /// know the protocol.
    pub tunnel_protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quic_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_profile: Option<String>,
    #[serde(default)]
    pub server_entry_configuration_version: u32,
}

impl ExchangedDialParameters {
    /// Reduce full dial parameters to the portable subset.
    pub fn new(dial_params: &DialParameters) -> Self {
        let protocol = dial_params.tunnel_protocol;
        Self {
            tunnel_protocol: protocol.as_str().to_string(),
            quic_version: if protocol.uses_quic() {
                dial_params.quic_version.clone()
            } else {
                None
            },
            tls_profile: if protocol.uses_tls() {
                dial_params.tls_profile.clone()
            } else {
                None
            },
            server_entry_configuration_version: dial_params.server_entry_configuration_version,
        }
    }

    /// Check the exchanged choice is usable against the importer's view of
    /// the server entry.
    pub fn validate(
        &self,
        server_entry: &ServerEntry,
    ) -> Result<ValidatedDialParameters, DialParametersError> {
        let protocol: TunnelProtocol = self
            .tunnel_protocol
            .parse()
            .map_err(|_| DialParametersError::UnknownTunnelProtocol(self.tunnel_protocol.clone()))?;

        if !server_entry.supports_protocol(protocol) {
            return Err(DialParametersError::UnsupportedTunnelProtocol(
                self.tunnel_protocol.clone(),
            ));
        }

        let quic_version = if protocol.uses_quic() {
            let version = self
                .quic_version
                .as_deref()
                .ok_or(DialParametersError::MissingQuicVersion)?;
            if !SUPPORTED_QUIC_VERSIONS.contains(&version) {
                return Err(DialParametersError::UnsupportedQuicVersion(version.to_string()));
            }
            Some(version.to_string())
        } else {
            None
        };

        let tls_profile = if protocol.uses_tls() {
            let profile = self
                .tls_profile
                .as_deref()
                .ok_or(DialParametersError::MissingTlsProfile)?;
            if !SUPPORTED_TLS_PROFILES.contains(&profile) {
                return Err(DialParametersError::UnsupportedTlsProfile(profile.to_string()));
            }
            Some(profile.to_string())
        } else {
            None
        };

        if self.server_entry_configuration_version != server_entry.configuration_version {
            return Err(DialParametersError::StaleConfigurationVersion {
                exchanged: self.server_entry_configuration_version,
                current: server_entry.configuration_version,
            });
        }

        let dial_port = server_entry
            .dial_port(protocol)
            .ok_or_else(|| DialParametersError::MissingDialPort(protocol.as_str().to_string()))?;

        Ok(ValidatedDialParameters {
            tunnel_protocol: protocol,
            quic_version,
            tls_profile,
            dial_port,
            server_entry_configuration_version: server_entry.configuration_version,
        })
    }
}

/// Exchanged dial parameters that passed validation against a specific
/// server entry. Only obtainable from [`ExchangedDialParameters::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDialParameters {
    tunnel_protocol: TunnelProtocol,
    quic_version: Option<String>,
    tls_profile: Option<String>,
    dial_port: u16,
    server_entry_configuration_version: u32,
}

impl ValidatedDialParameters {
    pub fn tunnel_protocol(&self) -> TunnelProtocol {
        self.tunnel_protocol
    }

    /// Build full dial parameters for the importer's current network.
    /// Network-specific measurements start empty.
    pub fn make_dial_parameters(
        self,
        network_id: &str,
        params: &ClientParameters,
        server_entry: &ServerEntry,
    ) -> DialParameters {
        DialParameters {
            server_ip: server_entry.ip_address.clone(),
            network_id: network_id.to_string(),
            tunnel_protocol: self.tunnel_protocol,
            quic_version: self.quic_version,
            tls_profile: self.tls_profile,
            dial_port: self.dial_port,
            server_entry_configuration_version: self.server_entry_configuration_version,
            is_exchanged: true,
            local_bind_address: None,
            established_rtt_ms: None,
            last_used_at: None,
            expires_at: replay_expiry(Utc::now(), params.replay_dial_parameters_ttl_hours),
        }
    }
}

/// `now + ttl_hours`, or `None` (no expiry) when that is past the latest
/// representable time.
fn replay_expiry(now: DateTime<Utc>, ttl_hours: u32) -> Option<DateTime<Utc>> {
    Duration::try_hours(i64::from(ttl_hours)).and_then(|ttl| now.checked_add_signed(ttl))
}
