//! sx_store — local server entry / dial parameter datastore
//!
//! The exchange protocol only needs four operations from storage, captured
//! by the [`Datastore`] trait. Two implementations ship here:
//! - [`MemoryStore`]   — process-local, used by tests and embedders that
//!   persist elsewhere;
//! - [`JsonFileStore`] — same semantics, written to a JSON document with an
//!   atomic replace after every mutation.
//!
//! Each operation is individually atomic (one `RwLock` write section). No
//! operation spans calls, so a multi-step caller sees last-writer-wins per
//! key and nothing stronger.

pub mod datastore;
pub mod error;
pub mod file;
pub mod memory;
mod state;

pub use datastore::{AffinityEntry, Datastore};
pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
