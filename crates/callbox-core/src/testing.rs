//! In-memory [`CallStore`] used by unit tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use callbox_types::{CallId, CallRecord, CallType, Direction};
use reqwest::StatusCode;

use crate::error::TransportError;
use crate::store::CallStore;

pub(crate) fn call(id: &str, archived: bool) -> CallRecord {
    CallRecord {
        id: CallId::from(id),
        direction: Direction::Inbound,
        from: "+1 415 555 0100".into(),
        to: "+1 415 555 0199".into(),
        via: None,
        call_type: CallType::Answered,
        duration: 42,
        created_at: "2024-07-12T10:00:00Z".parse().unwrap(),
        is_archived: archived,
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryCallStore {
    records: Mutex<Vec<CallRecord>>,
    failing_ids: Mutex<HashSet<CallId>>,
    patches: Mutex<Vec<(CallId, bool)>>,
    fail_listing: AtomicBool,
    list_calls: AtomicUsize,
}

impl MemoryCallStore {
    pub(crate) fn new(records: Vec<CallRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub(crate) fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    /// Every later PATCH for `id` answers 500.
    pub(crate) fn fail_patch_for(&self, id: &str) {
        self.failing_ids.lock().unwrap().insert(CallId::from(id));
    }

    pub(crate) fn record(&self, id: &CallId) -> Option<CallRecord> {
        self.records.lock().unwrap().iter().find(|r| &r.id == id).cloned()
    }

    /// Every PATCH attempted so far, failed ones included.
    pub(crate) fn patches(&self) -> Vec<(CallId, bool)> {
        self.patches.lock().unwrap().clone()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn failure(status: StatusCode, path: &str) -> TransportError {
        TransportError::Status {
            status,
            url: format!("memory://{path}"),
        }
    }
}

impl CallStore for MemoryCallStore {
    async fn list_activities(&self) -> Result<Vec<CallRecord>, TransportError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(Self::failure(StatusCode::SERVICE_UNAVAILABLE, "activities"));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn patch_archived(&self, id: &CallId, archived: bool) -> Result<(), TransportError> {
        self.patches.lock().unwrap().push((id.clone(), archived));
        let path = format!("activities/{id}");

        if self.failing_ids.lock().unwrap().contains(id) {
            return Err(Self::failure(StatusCode::INTERNAL_SERVER_ERROR, &path));
        }

        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.is_archived = archived;
                Ok(())
            }
            None => Err(Self::failure(StatusCode::NOT_FOUND, &path)),
        }
    }
}
