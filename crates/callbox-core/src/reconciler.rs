//! Best-effort bulk archive/unarchive.
//!
//! Only records that differ from the target state are touched. All of their
//! updates are issued at once and joined; individual failures are absorbed by
//! [`CallRepository::set_archived`], so the batch always runs to completion.
//! Refreshing afterwards is the caller's job.

use std::sync::Arc;

use callbox_types::CallRecord;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::repository::CallRepository;
use crate::store::CallStore;

#[derive(Debug)]
pub struct BulkReconciler<S> {
    repo: Arc<CallRepository<S>>,
}

impl<S: CallStore> BulkReconciler<S> {
    pub fn new(repo: Arc<CallRepository<S>>) -> Self {
        Self { repo }
    }

    /// Drive every record in `records` to `target`, then return once each
    /// scheduled update has settled.
    pub async fn archive_all(&self, records: &[CallRecord], target: bool) {
        let pending: Vec<_> = records
            .iter()
            .filter(|record| record.is_archived != target)
            .map(|record| self.repo.set_archived(&record.id, target))
            .collect();

        let scheduled = pending.len();
        if scheduled == 0 {
            debug!(target_archived = target, "bulk update: nothing to change");
            return;
        }

        debug!(scheduled, target_archived = target, "bulk update: issuing requests");
        let failed = join_all(pending).await.into_iter().filter(|ok| !ok).count();

        if failed == 0 {
            info!(scheduled, target_archived = target, "bulk update settled");
        } else {
            warn!(
                scheduled,
                failed,
                target_archived = target,
                "bulk update settled with failures"
            );
        }
    }
}
