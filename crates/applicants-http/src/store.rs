//! REST-backed record store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument};

use applicants_core::{
    ApplicantDraft, ApplicantId, ApplicantPatch, ApplicantRecord, RecordStore, Result, StoreUrl,
};

use crate::client::RestClient;

/// A record store reached over the applicants REST API.
///
/// | operation | request |
/// |---|---|
/// | `scan_all` | `GET /applicants` |
/// | `get` | `GET /applicants/:id` |
/// | `insert` | `POST /applicants` |
/// | `update` | `PUT /applicants/:id` |
/// | `delete` | `DELETE /applicants/:id` |
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: RestClient,
}

impl HttpStore {
    /// Create a store for the API rooted at `base`.
    pub fn new(base: StoreUrl) -> Result<Self> {
        Self::with_timeout(base, None)
    }

    /// Create a store whose requests give up after `timeout`.
    pub fn with_timeout(base: StoreUrl, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: RestClient::new(base, timeout)?,
        })
    }

    /// Returns the base URL of the API.
    pub fn url(&self) -> &StoreUrl {
        self.client.base()
    }
}

#[async_trait]
impl RecordStore for HttpStore {
    #[instrument(skip(self), fields(store = %self.url()))]
    async fn scan_all(&self) -> Result<Vec<ApplicantRecord>> {
        let records: Vec<ApplicantRecord> =
            self.client.get(&self.url().collection_url(), None).await?;
        debug!(count = records.len(), "Fetched applicants");
        Ok(records)
    }

    #[instrument(skip(self), fields(store = %self.url()))]
    async fn get(&self, id: ApplicantId) -> Result<Option<ApplicantRecord>> {
        self.client.get_optional(&self.url().record_url(id)).await
    }

    #[instrument(skip(self, draft), fields(store = %self.url()))]
    async fn insert(&self, draft: &ApplicantDraft) -> Result<ApplicantRecord> {
        let record: ApplicantRecord = self
            .client
            .send(Method::POST, &self.url().collection_url(), draft, None)
            .await?;
        debug!(id = %record.id, "Store assigned id");
        Ok(record)
    }

    #[instrument(skip(self, patch), fields(store = %self.url()))]
    async fn update(&self, id: ApplicantId, patch: &ApplicantPatch) -> Result<()> {
        let message: serde_json::Value = self
            .client
            .send(Method::PUT, &self.url().record_url(id), patch, Some(id))
            .await?;
        debug!(%message, "Update acknowledged");
        Ok(())
    }

    #[instrument(skip(self), fields(store = %self.url()))]
    async fn delete(&self, id: ApplicantId) -> Result<()> {
        let message: serde_json::Value =
            self.client.delete(&self.url().record_url(id), Some(id)).await?;
        debug!(%message, "Delete acknowledged");
        Ok(())
    }
}
