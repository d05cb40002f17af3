//! callbox-core – keeps a displayed call list consistent with the remote call
//! store.
//!
//! Components, leaf first:
//!
//! - [`store`]: the remote `/activities` contract and its HTTP implementation.
//! - [`repository`]: fetch-all / set-archived with their failure semantics.
//! - [`reconciler`]: best-effort concurrent bulk archive/unarchive.
//! - [`controller`]: snapshot, partition and the refresh protocol.
//!
//! A [`CallRepository`] is constructed once from [`Config`] and shared by
//! `Arc` with the controller and reconciler; nothing here is global.

pub mod config;
pub mod controller;
pub mod error;
pub mod reconciler;
pub mod repository;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use controller::{SlideDirection, ViewController};
pub use error::{ConfigError, TransportError};
pub use reconciler::BulkReconciler;
pub use repository::CallRepository;
pub use store::{CallStore, HttpCallStore};

pub use callbox_types as types;
