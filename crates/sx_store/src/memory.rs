use parking_lot::RwLock;
use sx_proto::{DialParameters, ServerEntryFields};

use crate::datastore::{AffinityEntry, Datastore};
use crate::error::StoreError;
use crate::state::StoreState;

/// In-process datastore.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Datastore for MemoryStore {
    fn affinity_server_entry(&self, network_id: &str) -> Result<Option<AffinityEntry>, StoreError> {
        Ok(self.state.read().affinity(network_id))
    }

    fn store_server_entry(
        &self,
        fields: &ServerEntryFields,
        replace_if_exists: bool,
    ) -> Result<(), StoreError> {
        self.state.write().store(fields, replace_if_exists)?;
        Ok(())
    }

    fn promote_server_entry(&self, server_ip: &str) -> Result<(), StoreError> {
        self.state.write().promote(server_ip)
    }

    fn set_dial_parameters(
        &self,
        server_ip: &str,
        network_id: &str,
        params: &DialParameters,
    ) -> Result<(), StoreError> {
        self.state
            .write()
            .set_dial_parameters(server_ip, network_id, params)
    }

    fn dial_parameters(
        &self,
        server_ip: &str,
        network_id: &str,
    ) -> Result<Option<DialParameters>, StoreError> {
        Ok(self.state.read().dial_parameters(server_ip, network_id))
    }

    fn server_entry(&self, server_ip: &str) -> Result<Option<ServerEntryFields>, StoreError> {
        Ok(self.state.read().server_entry(server_ip))
    }
}
