//! Persistence of an imported server entry.
//!
//! Three existing single-purpose datastore calls, always in this order:
//!   (a) `store_server_entry(fields, replace_if_exists = true)`
//!   (b) `promote_server_entry(ip)`
//!   (c) `set_dial_parameters(ip, network_id, params)`, only when exchanged
//!       dial parameters validated
//!
//! The sequence is not a transaction. A failed step returns
//! `PersistenceFailure` naming the step; earlier steps stay applied:
//!
//! | failed at | datastore afterwards                                   |
//! |-----------|--------------------------------------------------------|
//! | (a)       | unchanged                                              |
//! | (b)       | entry stored, previous affinity entry still first      |
//! | (c)       | entry stored and promoted, no dial parameters for net  |
//! | none      | entry stored, promoted, dial parameters set if any     |
//!
//! Every row is a state the datastore can be in through normal use.

use sx_proto::DialParameters;
use sx_store::Datastore;

use crate::codec::TrustedEntry;
use crate::error::{ExchangeError, PersistStep};

/// Steps (a) and (b).
pub fn store_and_promote<S>(store: &S, entry: &TrustedEntry) -> Result<(), ExchangeError>
where
    S: Datastore + ?Sized,
{
    store
        .store_server_entry(entry.fields(), true)
        .map_err(ExchangeError::persistence(PersistStep::StoreServerEntry))?;

    store
        .promote_server_entry(entry.server_ip())
        .map_err(ExchangeError::persistence(PersistStep::PromoteServerEntry))?;

    Ok(())
}

/// Step (c).
pub fn set_dial_parameters<S>(
    store: &S,
    entry: &TrustedEntry,
    network_id: &str,
    params: &DialParameters,
) -> Result<(), ExchangeError>
where
    S: Datastore + ?Sized,
{
    store
        .set_dial_parameters(entry.server_ip(), network_id, params)
        .map_err(ExchangeError::persistence(PersistStep::SetDialParameters))
}
