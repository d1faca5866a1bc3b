//! Record store trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::record::{ApplicantDraft, ApplicantPatch, ApplicantRecord};
use crate::types::ApplicantId;

/// A persistent table of applicant records.
///
/// Implementations own identity: ids are assigned by [`RecordStore::insert`]
/// and never chosen by the caller.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Return every record in the store, in whatever order the store keeps them.
    async fn scan_all(&self) -> Result<Vec<ApplicantRecord>>;

    /// Fetch a single record, or `None` if the id is unknown.
    async fn get(&self, id: ApplicantId) -> Result<Option<ApplicantRecord>>;

    /// Insert a new record and return it with its assigned id.
    async fn insert(&self, draft: &ApplicantDraft) -> Result<ApplicantRecord>;

    /// Update the fields set in `patch`.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) if the id is unknown.
    async fn update(&self, id: ApplicantId, patch: &ApplicantPatch) -> Result<()>;

    /// Delete a record.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) if the id is unknown.
    async fn delete(&self, id: ApplicantId) -> Result<()>;
}

#[async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn scan_all(&self) -> Result<Vec<ApplicantRecord>> {
        (**self).scan_all().await
    }

    async fn get(&self, id: ApplicantId) -> Result<Option<ApplicantRecord>> {
        (**self).get(id).await
    }

    async fn insert(&self, draft: &ApplicantDraft) -> Result<ApplicantRecord> {
        (**self).insert(draft).await
    }

    async fn update(&self, id: ApplicantId, patch: &ApplicantPatch) -> Result<()> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: ApplicantId) -> Result<()> {
        (**self).delete(id).await
    }
}
