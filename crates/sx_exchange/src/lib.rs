//! sx_exchange — client-to-client exchange of a known-good server entry
//!
//! A connected client can export its affinity server entry, plus the portable
//! part of the dial parameters that worked on its network, as one opaque
//! string. Another client imports that string out of band (NFC, QR, ...) and
//! gets a server to try first, without fetching anything.
//!
//! # Trust model
//! The payload is sealed with a key that is baked into every build. That
//! only hides the contents from casual inspection; any client, honest or
//! not, can produce a payload that opens. What makes an imported entry
//! trustworthy is the network's Ed25519 signature over the entry, checked
//! against the embedded public key. The two checks are separate stages:
//! [`codec::open_payload`] then [`codec::authenticate`].
//!
//! # Diagnostics
//! Neither direction logs success. A success line on both devices at nearly
//! the same time would link the two users in submitted diagnostics. Failures
//! are logged once at the public boundary. Discarded dial parameters are not
//! logged at all, since that line would stand in for a success notice.

pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod sequencer;

pub use codec::{authenticate, open_payload, seal_payload, AuthenticatedPayload, TrustedEntry};
pub use config::{Config, NetworkIdGetter};
pub use error::{ExchangeError, PersistStep};
pub use export::{export_exchange_payload, try_export};
pub use import::{import_exchange_payload, try_import};
