//! Store selection for CLI commands.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use applicants_core::{
    ApplicantDraft, ApplicantId, ApplicantPatch, ApplicantRecord, RecordStore, StoreUrl,
};
use applicants_file::FileStore;
use applicants_http::HttpStore;

/// Record store picked from the URL scheme.
///
/// `file://` URLs open the data directory directly, anything else goes
/// through the REST API.
#[derive(Debug, Clone)]
pub enum CliStore {
    File(FileStore),
    Http(HttpStore),
}

impl CliStore {
    pub fn open(url: &StoreUrl, timeout: Option<Duration>) -> Result<Self> {
        if url.is_local() {
            let path = url
                .to_file_path()
                .context("Failed to convert file:// URL to path")?;
            Ok(CliStore::File(FileStore::new(path)))
        } else {
            let store = HttpStore::with_timeout(url.clone(), timeout)
                .context("Failed to create HTTP client")?;
            Ok(CliStore::Http(store))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CliStore::File(store) => store.root().display().to_string(),
            CliStore::Http(store) => store.url().to_string(),
        }
    }
}

#[async_trait]
impl RecordStore for CliStore {
    async fn scan_all(&self) -> applicants_core::Result<Vec<ApplicantRecord>> {
        match self {
            CliStore::File(store) => store.scan_all().await,
            CliStore::Http(store) => store.scan_all().await,
        }
    }

    async fn get(&self, id: ApplicantId) -> applicants_core::Result<Option<ApplicantRecord>> {
        match self {
            CliStore::File(store) => store.get(id).await,
            CliStore::Http(store) => store.get(id).await,
        }
    }

    async fn insert(&self, draft: &ApplicantDraft) -> applicants_core::Result<ApplicantRecord> {
        match self {
            CliStore::File(store) => store.insert(draft).await,
            CliStore::Http(store) => store.insert(draft).await,
        }
    }

    async fn update(&self, id: ApplicantId, patch: &ApplicantPatch) -> applicants_core::Result<()> {
        match self {
            CliStore::File(store) => store.update(id, patch).await,
            CliStore::Http(store) => store.update(id, patch).await,
        }
    }

    async fn delete(&self, id: ApplicantId) -> applicants_core::Result<()> {
        match self {
            CliStore::File(store) => store.delete(id).await,
            CliStore::Http(store) => store.delete(id).await,
        }
    }
}
