//! Call repository: the only component that talks to a [`CallStore`].
//!
//! Reads propagate their errors. Single-record writes never do: a failed
//! update is logged and reported as `false` so a caller can keep going with
//! the rest of a batch and let the next refresh restore server truth.

use callbox_types::{CallId, CallRecord};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::TransportError;
use crate::store::{CallStore, HttpCallStore};

#[derive(Debug)]
pub struct CallRepository<S> {
    store: S,
}

impl CallRepository<HttpCallStore> {
    /// Repository over the REST store at `config.base_url`.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Ok(Self::new(HttpCallStore::new(config)?))
    }
}

impl<S: CallStore> CallRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the full record list. There is no partial success.
    pub async fn fetch_all(&self) -> Result<Vec<CallRecord>, TransportError> {
        let records = self.store.list_activities().await?;
        debug!(count = records.len(), "fetched call records");
        Ok(records)
    }

    /// Set one record's archive flag. Returns `true` only when the store
    /// acknowledged the update.
    pub async fn set_archived(&self, id: &CallId, archived: bool) -> bool {
        match self.store.patch_archived(id, archived).await {
            Ok(()) => {
                debug!(%id, archived, "call archive state updated");
                true
            }
            Err(e) => {
                warn!(%id, archived, error = %e, "failed to update call archive state");
                false
            }
        }
    }

    /// Flip `record`'s archive flag relative to the state it was fetched in.
    pub async fn toggle_archived(&self, record: &CallRecord) -> bool {
        self.set_archived(&record.id, !record.is_archived).await
    }
}
