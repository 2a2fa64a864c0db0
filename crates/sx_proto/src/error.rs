use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("server entry has no signature")]
    MissingSignature,

    #[error("server entry signature: {0}")]
    Signature(#[from] sx_crypto::CryptoError),

    #[error("missing server entry field: {0}")]
    MissingField(&'static str),

    #[error("invalid server entry field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("unknown tunnel protocol: {0}")]
    UnknownTunnelProtocol(String),

    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

/// Reasons exchanged dial parameters cannot be used against a server entry.
///
/// These never abort an import; the caller discards the dial parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialParametersError {
    #[error("unknown tunnel protocol: {0}")]
    UnknownTunnelProtocol(String),

    #[error("server entry does not support tunnel protocol: {0}")]
    UnsupportedTunnelProtocol(String),

    #[error("missing QUIC version")]
    MissingQuicVersion,

    #[error("unsupported QUIC version: {0}")]
    UnsupportedQuicVersion(String),

    #[error("missing TLS profile")]
    MissingTlsProfile,

    #[error("unsupported TLS profile: {0}")]
    UnsupportedTlsProfile(String),

    #[error("stale server entry configuration version: exchanged={exchanged} current={current}")]
    StaleConfigurationVersion { exchanged: u32, current: u32 },

    #[error("server entry has no dial port for {0}")]
    MissingDialPort(String),
}
