use sx_proto::{DialParameters, ServerEntryFields};

use crate::error::StoreError;

/// The affinity server entry plus its dial parameters for one network.
#[derive(Debug, Clone, PartialEq)]
pub struct AffinityEntry {
    pub fields: ServerEntryFields,
    pub dial_parameters: Option<DialParameters>,
}

/// Storage operations used by the exchange protocol.
///
/// Implementations must make each call atomic on its own. Callers compose
/// calls without a surrounding transaction.
pub trait Datastore: Send + Sync {
    /// Highest-ranked server entry and its dial parameters for `network_id`.
    fn affinity_server_entry(&self, network_id: &str) -> Result<Option<AffinityEntry>, StoreError>;

    /// Insert or update a server entry, keyed by IP address. With
    /// `replace_if_exists == false` an existing entry whose configuration
    /// version is equal or newer is kept.
    fn store_server_entry(
        &self,
        fields: &ServerEntryFields,
        replace_if_exists: bool,
    ) -> Result<(), StoreError>;

    /// Move a stored entry to the affinity position.
    fn promote_server_entry(&self, server_ip: &str) -> Result<(), StoreError>;

    fn set_dial_parameters(
        &self,
        server_ip: &str,
        network_id: &str,
        params: &DialParameters,
    ) -> Result<(), StoreError>;

    fn dial_parameters(
        &self,
        server_ip: &str,
        network_id: &str,
    ) -> Result<Option<DialParameters>, StoreError>;

    fn server_entry(&self, server_ip: &str) -> Result<Option<ServerEntryFields>, StoreError>;
}
