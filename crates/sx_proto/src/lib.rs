//! sx_proto — data model for client-to-client server entry exchange
//!
//! Everything here serialises to JSON. Server entries are kept as an ordered
//! field map so that unknown fields added by newer networks survive a round
//! trip and the signed bytes stay canonical (sorted keys).
//!
//! # Modules
//! - `protocol`     — tunnel protocols, supported QUIC versions / TLS profiles, entry sources
//! - `server_entry` — `ServerEntryFields` (signed/unsigned map) and the typed `ServerEntry` view
//! - `dial_params`  — full `DialParameters`, the portable `ExchangedDialParameters` subset
//! - `payload`      — the transient `ExchangePayload` composite

pub mod dial_params;
pub mod error;
pub mod payload;
pub mod protocol;
pub mod server_entry;

pub use dial_params::{
    ClientParameters, DialParameters, ExchangedDialParameters, ValidatedDialParameters,
};
pub use error::{DialParametersError, ProtoError};
pub use payload::ExchangePayload;
pub use protocol::{ServerEntrySource, TunnelProtocol};
pub use server_entry::{ServerEntry, ServerEntryFields};
