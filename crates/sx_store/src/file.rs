//! JSON-file backed datastore.
//!
//! The whole store is one JSON document. Every mutation is applied to a copy
//! of the in-memory state, written to a temp file in the same directory and
//! renamed over the original; memory is only updated once the rename
//! succeeded, so a failed write leaves both disk and memory untouched.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use sx_proto::{DialParameters, ServerEntryFields};
use tempfile::NamedTempFile;

use crate::datastore::{AffinityEntry, Datastore};
use crate::error::StoreError;
use crate::state::StoreState;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            StoreState::default()
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut StoreState) -> Result<(T, bool), StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.state.write();
        let mut next = guard.clone();
        let (out, changed) = apply(&mut next)?;
        if changed {
            self.write_atomically(&next)?;
            *guard = next;
        }
        Ok(out)
    }

    fn write_atomically(&self, state: &StoreState) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, state)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::Persist(e.to_string()))?;
        Ok(())
    }
}

impl Datastore for JsonFileStore {
    fn affinity_server_entry(&self, network_id: &str) -> Result<Option<AffinityEntry>, StoreError> {
        Ok(self.state.read().affinity(network_id))
    }

    fn store_server_entry(
        &self,
        fields: &ServerEntryFields,
        replace_if_exists: bool,
    ) -> Result<(), StoreError> {
        self.mutate(|state| {
            let changed = state.store(fields, replace_if_exists)?;
            Ok(((), changed))
        })
    }

    fn promote_server_entry(&self, server_ip: &str) -> Result<(), StoreError> {
        self.mutate(|state| {
            state.promote(server_ip)?;
            Ok(((), true))
        })
    }

    fn set_dial_parameters(
        &self,
        server_ip: &str,
        network_id: &str,
        params: &DialParameters,
    ) -> Result<(), StoreError> {
        self.mutate(|state| {
            state.set_dial_parameters(server_ip, network_id, params)?;
            Ok(((), true))
        })
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
