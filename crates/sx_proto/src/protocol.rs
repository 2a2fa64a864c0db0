//! Tunnel protocols and server entry sources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtoError;

/// QUIC versions this build can dial.
pub const SUPPORTED_QUIC_VERSIONS: &[&str] = &["QUICv1", "RANDOMIZED-QUICv1", "gQUICv49", "gQUICv50"];

/// TLS ClientHello profiles this build can present.
pub const SUPPORTED_TLS_PROFILES: &[&str] = &[
    "Chrome-120",
    "Firefox-120",
    "Safari-16",
    "iOS-14",
    "Randomized-v2",
];

/// Fronted protocols always dial the CDN on 443.
pub const FRONTED_DIAL_PORT: u16 = 443;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TunnelProtocol {
    #[serde(rename = "SSH")]
    Ssh,
    #[serde(rename = "OSSH")]
    ObfuscatedSsh,
    #[serde(rename = "UNFRONTED-MEEK-OSSH")]
    UnfrontedMeek,
    #[serde(rename = "UNFRONTED-MEEK-HTTPS-OSSH")]
    UnfrontedMeekHttps,
    #[serde(rename = "FRONTED-MEEK-OSSH")]
    FrontedMeek,
    #[serde(rename = "QUIC-OSSH")]
    Quic,
}

impl TunnelProtocol {
    pub const ALL: [TunnelProtocol; 6] = [
        TunnelProtocol::Ssh,
        TunnelProtocol::ObfuscatedSsh,
        TunnelProtocol::UnfrontedMeek,
        TunnelProtocol::UnfrontedMeekHttps,
        TunnelProtocol::FrontedMeek,
        TunnelProtocol::Quic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssh => "SSH",
            Self::ObfuscatedSsh => "OSSH",
            Self::UnfrontedMeek => "UNFRONTED-MEEK-OSSH",
            Self::UnfrontedMeekHttps => "UNFRONTED-MEEK-HTTPS-OSSH",
            Self::FrontedMeek => "FRONTED-MEEK-OSSH",
            Self::Quic => "QUIC-OSSH",
        }
    }

    /// Server entry capability that must be present to dial this protocol.
    pub fn required_capability(&self) -> &'static str {
        match self {
            Self::Ssh => "SSH",
            Self::ObfuscatedSsh => "OSSH",
            Self::UnfrontedMeek => "UNFRONTED-MEEK",
            Self::UnfrontedMeekHttps => "UNFRONTED-MEEK-HTTPS",
            Self::FrontedMeek => "FRONTED-MEEK",
            Self::Quic => "QUIC",
        }
    }

    pub fn uses_quic(&self) -> bool {
        matches!(self, Self::Quic)
    }

    pub fn uses_tls(&self) -> bool {
        matches!(self, Self::UnfrontedMeekHttps | Self::FrontedMeek)
    }
}

impl fmt::Display for TunnelProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TunnelProtocol {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ProtoError::UnknownTunnelProtocol(s.to_string()))
    }
}

/// Where a locally stored server entry came from (`localSource`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerEntrySource {
    Embedded,
    Remote,
    Discovery,
    Target,
    Obfuscated,
    Exchanged,
}

impl ServerEntrySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedded => "EMBEDDED",
            Self::Remote => "REMOTE",
            Self::Discovery => "DISCOVERY",
            Self::Target => "TARGET",
            Self::Obfuscated => "OBFUSCATED",
            Self::Exchanged => "EXCHANGED",
        }
    }
}
