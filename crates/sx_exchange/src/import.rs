use chrono::Utc;
use sx_store::Datastore;

use crate::codec::{authenticate, open_payload, AuthenticatedPayload};
use crate::config::Config;
use crate::error::ExchangeError;
use crate::sequencer;

/// Import a payload produced by [`crate::export_exchange_payload`].
///
/// On success the imported server entry holds the affinity position, so it
/// is the first candidate for the next establishment. The importer may be
/// on a different network than the exporter; exchanged dial parameters are
/// materialized for the importer's current network.
///
/// Returns `false` on failure; the cause is logged.
pub fn import_exchange_payload<S>(config: &Config, store: &S, encoded: &str) -> bool
where
    S: Datastore + ?Sized,
{
    match try_import(config, store, encoded) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "ImportExchangePayload failed");
            false
        }
    }
}

pub fn try_import<S>(config: &Config, store: &S, encoded: &str) -> Result<(), ExchangeError>
where
    S: Datastore + ?Sized,
{
    let network_id = config.network_id();
    let key = config.obfuscation_key()?;
    let verifier = config.signature_verifier()?;

    let payload = open_payload(&key, encoded)?;
    let AuthenticatedPayload {
        mut entry,
        dial_parameters,
    } = authenticate(payload, &verifier)?;

    entry.mark_exchanged(Utc::now());

    sequencer::store_and_promote(store, &entry)?;

    // Validation can fail simply because this build lacks the exchanged
    // protocol. Drop the parameters without a notice: the notice would be a
    // proxy for an import success log.
    let validated = dial_parameters.and_then(|exchanged| exchanged.validate(entry.server_entry()).ok());

    if let Some(validated) = validated {
        let dial_params = validated.make_dial_parameters(
            &network_id,
            config.client_parameters(),
            entry.server_entry(),
        );
        sequencer::set_dial_parameters(store, &entry, &network_id, &dial_params)?;
    }

    Ok(())
}
