//! Shared types for callbox.
//!
//! [`CallRecord`] mirrors one entry of the remote `/activities` collection.
//! [`Partition`] and the free functions in [`partition`] derive the
//! active/archived views from a snapshot without ever mutating it.

pub mod partition;
pub mod record;

pub use partition::{DayGroup, Partition, filter, group_by_day};
pub use record::{CallId, CallRecord, CallType, Direction};
