use std::fmt;

use sx_crypto::CryptoError;
use sx_proto::ProtoError;
use sx_store::StoreError;
use thiserror::Error;

/// Step of the persistence sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStep {
    StoreServerEntry,
    PromoteServerEntry,
    SetDialParameters,
}

impl fmt::Display for PersistStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StoreServerEntry => "store server entry",
            Self::PromoteServerEntry => "promote server entry",
            Self::SetDialParameters => "set dial parameters",
        })
    }
}

/// Exchange failures. Only ever logged locally; the public entry points
/// collapse them to `""` / `false`.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("no affinity server entry")]
    NoAffinityServer,

    #[error("affinity server entry lookup failed: {0}")]
    AffinityLookup(#[source] StoreError),

    #[error("export server entry not signed")]
    UnsignedEntry,

    #[error("invalid key configuration: {0}")]
    InvalidKeyConfiguration(#[source] CryptoError),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("payload too short: {0} bytes")]
    PayloadTooShort(usize),

    #[error("payload authentication failed")]
    AuthenticationFailed,

    #[error("invalid server entry signature: {0}")]
    InvalidSignature(#[source] ProtoError),

    #[error("persistence failed at {step}: {source}")]
    PersistenceFailure {
        step: PersistStep,
        #[source]
        source: StoreError,
    },
}

impl ExchangeError {
    pub fn persistence(step: PersistStep) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::PersistenceFailure { step, source }
    }

    pub fn malformed(err: impl fmt::Display) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}
