//! Remote call store abstraction.
//!
//! [`CallStore`] is the two-endpoint contract the rest of the crate talks to:
//!
//! - `GET  {base}/activities` returns every call record.
//! - `PATCH {base}/activities/{id}` with `{"is_archived": bool}` flips one flag.
//!
//! [`HttpCallStore`] is the production implementation. Tests swap in an
//! in-memory store. Trait methods use `impl Future` in their signatures so no
//! `async-trait` crate is required.

use std::future::Future;

use callbox_types::{CallId, CallRecord};
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::TransportError;

pub trait CallStore: Send + Sync + 'static {
    fn list_activities(
        &self,
    ) -> impl Future<Output = Result<Vec<CallRecord>, TransportError>> + Send;

    fn patch_archived(
        &self,
        id: &CallId,
        archived: bool,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

#[derive(Debug, Serialize)]
struct ArchivePatch {
    is_archived: bool,
}

/// [`CallStore`] backed by the REST service at a configured base URL.
#[derive(Debug, Clone)]
pub struct HttpCallStore {
    client: Client,
    base_url: Url,
}

impl HttpCallStore {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut builder =
            Client::builder().user_agent(concat!("callbox/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, &config.base_url)
    }

    /// Use a pre-built `reqwest` client, e.g. one with proxies disabled.
    pub fn with_client(client: Client, base: &str) -> Result<Self, TransportError> {
        let invalid = |reason: String| TransportError::InvalidUrl {
            url: base.to_owned(),
            reason,
        };

        let base_url = Url::parse(base.trim()).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_owned()));
        }
        Ok(Self { client, base_url })
    }

    /// `{base}/activities`, followed by `extra` as one more path segment.
    fn activities_url(&self, extra: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `with_client`: the base URL always has path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("activities");
            if let Some(extra) = extra {
                segments.push(extra);
            }
        }
        url
    }
}

impl CallStore for HttpCallStore {
    async fn list_activities(&self) -> Result<Vec<CallRecord>, TransportError> {
        let url = self.activities_url(None);
        debug!(%url, "GET activities");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn patch_archived(&self, id: &CallId, archived: bool) -> Result<(), TransportError> {
        let url = self.activities_url(Some(id.as_str()));
        debug!(%url, archived, "PATCH activity");

        let response = self
            .client
            .patch(url.clone())
            .json(&ArchivePatch {
                is_archived: archived,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(())
    }
}
