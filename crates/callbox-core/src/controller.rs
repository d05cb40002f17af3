//! View state: the current snapshot, which partition is shown, and the
//! refresh protocol tying user actions back to server truth.
//!
//! The snapshot is only ever replaced wholesale by [`ViewController::refresh`].
//! Mutating operations take `&mut self`, so a refresh can never interleave
//! with a batch issued through the same controller.

use std::sync::Arc;

use callbox_types::{CallId, CallRecord, DayGroup, Partition, filter, group_by_day};
use chrono::TimeZone;
use tracing::{debug, info, warn};

use crate::error::TransportError;
use crate::reconciler::BulkReconciler;
use crate::repository::CallRepository;
use crate::store::CallStore;

/// Which way the presentation layer should slide when the partition changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlideDirection {
    #[default]
    Left,
    Right,
}

impl SlideDirection {
    fn towards(target: Partition) -> Self {
        match target {
            Partition::Active => SlideDirection::Right,
            Partition::Archived => SlideDirection::Left,
        }
    }
}

#[derive(Debug)]
pub struct ViewController<S> {
    repo: Arc<CallRepository<S>>,
    reconciler: BulkReconciler<S>,
    snapshot: Vec<CallRecord>,
    partition: Partition,
    direction: SlideDirection,
}

impl<S: CallStore> ViewController<S> {
    /// Controller with an empty snapshot on the active partition.
    pub fn new(repo: Arc<CallRepository<S>>) -> Self {
        Self {
            reconciler: BulkReconciler::new(Arc::clone(&repo)),
            repo,
            snapshot: Vec::new(),
            partition: Partition::default(),
            direction: SlideDirection::default(),
        }
    }

    /// Build a controller and perform the initial load.
    pub async fn load(repo: Arc<CallRepository<S>>) -> Result<Self, TransportError> {
        let mut controller = Self::new(repo);
        controller.refresh().await?;
        Ok(controller)
    }

    pub fn snapshot(&self) -> &[CallRecord] {
        &self.snapshot
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    pub fn find(&self, id: &CallId) -> Option<&CallRecord> {
        self.snapshot.iter().find(|record| &record.id == id)
    }

    /// Replace the snapshot with the store's current contents. On failure the
    /// previous snapshot stays in place.
    pub async fn refresh(&mut self) -> Result<(), TransportError> {
        match self.repo.fetch_all().await {
            Ok(records) => {
                debug!(count = records.len(), "snapshot replaced");
                self.snapshot = records;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "refresh failed; keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Switch the visible partition. Entering a different partition refetches;
    /// re-selecting the current one only updates the slide direction.
    pub async fn set_partition(&mut self, target: Partition) -> Result<(), TransportError> {
        if !self.show(target) {
            return Ok(());
        }
        self.refresh().await
    }

    /// Switch the visible partition over the snapshot already held, without
    /// refetching. Returns whether the partition changed.
    pub fn show(&mut self, target: Partition) -> bool {
        self.direction = SlideDirection::towards(target);
        if self.partition == target {
            return false;
        }

        info!(from = ?self.partition, to = ?target, "partition changed");
        self.partition = target;
        true
    }

    pub fn visible_records(&self) -> Vec<&CallRecord> {
        filter(&self.snapshot, self.partition.is_archived())
    }

    /// Visible records split into runs of the same calendar day in `tz`.
    pub fn visible_by_day<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DayGroup<'_>> {
        group_by_day(self.visible_records(), tz)
    }

    /// Flip one record's archive flag and refresh if the store accepted it.
    ///
    /// Returns `Ok(false)` without issuing a request when `id` is not in the
    /// snapshot, and `Ok(false)` when the update itself failed. Only the
    /// follow-up refresh can produce an error.
    pub async fn toggle(&mut self, id: &CallId) -> Result<bool, TransportError> {
        let Some(record) = self.find(id) else {
            warn!(%id, "toggle requested for a call not in the snapshot");
            return Ok(false);
        };

        if !self.repo.toggle_archived(record).await {
            return Ok(false);
        }
        self.refresh().await?;
        Ok(true)
    }

    /// Drive every record in the snapshot to `target`, then refresh once.
    pub async fn apply_to_all(&mut self, target: bool) -> Result<(), TransportError> {
        self.reconciler.archive_all(&self.snapshot, target).await;
        self.refresh().await
    }
}
