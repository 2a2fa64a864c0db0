use sx_proto::{ExchangePayload, ExchangedDialParameters};
use sx_store::{AffinityEntry, Datastore};

use crate::codec::seal_payload;
use crate::config::Config;
use crate::error::ExchangeError;

/// Export the affinity server entry, and the portable part of its dial
/// parameters for the current network, as an opaque string.
///
/// Intended to be called while connected, when the affinity entry is the
/// connected server. Returns `""` on failure; the cause is logged.
pub fn export_exchange_payload<S>(config: &Config, store: &S) -> String
where
    S: Datastore + ?Sized,
{
    match try_export(config, store) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "ExportExchangePayload failed");
            String::new()
        }
    }
}

pub fn try_export<S>(config: &Config, store: &S) -> Result<String, ExchangeError>
where
    S: Datastore + ?Sized,
{
    let network_id = config.network_id();
    let key = config.obfuscation_key()?;

    let AffinityEntry {
        mut fields,
        dial_parameters,
    } = store
        .affinity_server_entry(&network_id)
        .map_err(ExchangeError::AffinityLookup)?
        .ok_or(ExchangeError::NoAffinityServer)?;

    // An entry the importer cannot verify is useless to it and is refused
    // here rather than there.
    if !fields.has_signature() {
        return Err(ExchangeError::UnsignedEntry);
    }
    let verifier = config.signature_verifier()?;
    if fields.verify_signature(&verifier).is_err() {
        return Err(ExchangeError::UnsignedEntry);
    }

    fields.remove_unsigned_fields();

    let payload = ExchangePayload {
        server_entry_fields: fields,
        exchanged_dial_parameters: dial_parameters.as_ref().map(ExchangedDialParameters::new),
    };

    seal_payload(&key, &payload)
}
