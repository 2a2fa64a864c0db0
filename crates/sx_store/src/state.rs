//! Store contents shared by the memory and file backends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sx_proto::{DialParameters, ServerEntryFields};

use crate::datastore::AffinityEntry;
use crate::error::StoreError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoreState {
    #[serde(default)]
    entries: BTreeMap<String, ServerEntryFields>,
    /// Server IPs, highest priority first. Index 0 is the affinity entry.
    #[serde(default)]
    ranking: Vec<String>,
    /// server IP -> network ID -> dial parameters
    #[serde(default)]
    dial_parameters: BTreeMap<String, BTreeMap<String, DialParameters>>,
}

impl StoreState {
    pub(crate) fn affinity(&self, network_id: &str) -> Option<AffinityEntry> {
        let ip = self.ranking.first()?;
        let fields = self.entries.get(ip)?.clone();
        let dial_parameters = self.dial_parameters(ip, network_id);
        Some(AffinityEntry {
            fields,
            dial_parameters,
        })
    }

    /// Returns whether the state changed.
    pub(crate) fn store(
        &mut self,
        fields: &ServerEntryFields,
        replace_if_exists: bool,
    ) -> Result<bool, StoreError> {
        let entry = fields
            .server_entry()
            .map_err(|e| StoreError::InvalidServerEntry(e.to_string()))?;
        let ip = entry.ip_address;

        match self.entries.get(&ip) {
            Some(existing) => {
                let existing_version = existing
                    .server_entry()
                    .map(|e| e.configuration_version)
                    .unwrap_or(0);
                if !replace_if_exists && existing_version >= entry.configuration_version {
                    return Ok(false);
                }
                if existing_version != entry.configuration_version {
                    self.dial_parameters.remove(&ip);
                }
            }
            None => self.ranking.push(ip.clone()),
        }

        self.entries.insert(ip, fields.clone());
        Ok(true)
    }

    pub(crate) fn promote(&mut self, server_ip: &str) -> Result<(), StoreError> {
        let position = self
            .ranking
            .iter()
            .position(|ip| ip == server_ip)
            .ok_or_else(|| StoreError::NotFound(format!("server entry {server_ip}")))?;
        let ip = self.ranking.remove(position);
        self.ranking.insert(0, ip);
        Ok(())
    }

    pub(crate) fn set_dial_parameters(
        &mut self,
        server_ip: &str,
        network_id: &str,
        params: &DialParameters,
    ) -> Result<(), StoreError> {
        if !self.entries.contains_key(server_ip) {
            return Err(StoreError::NotFound(format!("server entry {server_ip}")));
        }
        self.dial_parameters
            .entry(server_ip.to_string())
            .or_default()
            .insert(network_id.to_string(), params.clone());
        Ok(())
    }

    pub(crate) fn dial_parameters(&self, server_ip: &str, network_id: &str) -> Option<DialParameters> {
        self.dial_parameters
            .get(server_ip)
            .and_then(|by_network| by_network.get(network_id))
            .cloned()
    }

    pub(crate) fn server_entry(&self, server_ip: &str) -> Option<ServerEntryFields> {
        self.entries.get(server_ip).cloned()
    }
}
