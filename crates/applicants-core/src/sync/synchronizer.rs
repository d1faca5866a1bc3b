//! The synchronization layer between presentation and the record store.

use std::fmt;
use std::sync::Arc;

use futures_core::Stream;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use super::in_flight::{InFlight, Operation};
use super::WorkingSet;
use crate::error::InvalidInputError;
use crate::record::{ApplicantDraft, ApplicantPatch, ApplicantRecord};
use crate::traits::RecordStore;
use crate::types::ApplicantId;
use crate::{Error, Result};

/// Tuning knobs for a [`Synchronizer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Re-fetch a record after updating it and install the store's version
    /// instead of the local patch.
    pub confirm_updates: bool,
}

/// Owns the working set and mediates every mutation against a store.
///
/// Creates and deletes trigger a full reload once the store acknowledges
/// them. Updates are applied to the working set locally from the patch that
/// was sent (or from a single-record fetch when
/// [`SyncOptions::confirm_updates`] is set). A failed store call never
/// changes the working set.
///
/// Readers get immutable snapshots through [`Synchronizer::snapshot`],
/// [`Synchronizer::subscribe`] or [`Synchronizer::updates`].
pub struct Synchronizer<S> {
    store: S,
    options: SyncOptions,
    state: watch::Sender<Arc<WorkingSet>>,
    in_flight: InFlight,
}

impl<S: RecordStore> Synchronizer<S> {
    /// Create a synchronizer with an empty working set.
    pub fn new(store: S) -> Self {
        Self::with_options(store, SyncOptions::default())
    }

    pub fn with_options(store: S, options: SyncOptions) -> Self {
        let (state, _) = watch::channel(Arc::new(WorkingSet::default()));
        Self {
            store,
            options,
            state,
            in_flight: InFlight::default(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// The current working set.
    pub fn snapshot(&self) -> Arc<WorkingSet> {
        self.state.borrow().clone()
    }

    /// A receiver that observes every published working set.
    pub fn subscribe(&self) -> watch::Receiver<Arc<WorkingSet>> {
        self.state.subscribe()
    }

    /// A stream of working sets, one per applied change.
    ///
    /// The stream ends when the synchronizer is dropped.
    pub fn updates(&self) -> impl Stream<Item = Arc<WorkingSet>> + Send + 'static {
        let mut rx = self.state.subscribe();
        async_stream::stream! {
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                yield snapshot;
            }
        }
    }

    /// Replace the working set with a full scan of the store.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Arc<WorkingSet>> {
        let _guard = self.in_flight.begin(Operation::Load)?;
        self.refresh().await
    }

    /// Insert `draft`, then reload the working set.
    ///
    /// Returns the record as the store created it.
    #[instrument(skip(self, draft), fields(email = %draft.email))]
    pub async fn create(&self, draft: ApplicantDraft) -> Result<ApplicantRecord> {
        let _guard = self.in_flight.begin(Operation::Create(draft.clone()))?;

        let created = self.store.insert(&draft).await?;
        debug!(id = %created.id, "Store created applicant");

        self.refresh().await.inspect_err(|e| {
            warn!(error = %e, "Reload after create failed");
        })?;

        Ok(created)
    }

    /// Send `patch` to the store, then patch the working set entry locally.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: ApplicantId, patch: ApplicantPatch) -> Result<()> {
        if patch.is_empty() {
            return Err(InvalidInputError::EmptyPatch { id }.into());
        }

        let _guard = self.in_flight.begin(Operation::Update(id))?;

        self.store.update(id, &patch).await?;
        debug!("Store accepted update");

        if self.options.confirm_updates {
            return self.confirm(id, &patch).await;
        }

        self.publish_patch(id, &patch);
        Ok(())
    }

    /// Delete the record at `id`, then reload the working set.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ApplicantId) -> Result<()> {
        let _guard = self.in_flight.begin(Operation::Delete(id))?;

        self.store.delete(id).await?;
        debug!("Store deleted applicant");

        self.refresh().await.inspect_err(|e| {
            warn!(error = %e, "Reload after delete failed");
        })?;

        Ok(())
    }

    /// Records in the current working set matching `query`.
    pub fn search(&self, query: &str) -> Vec<ApplicantRecord> {
        self.snapshot().search(query).into_iter().cloned().collect()
    }

    /// Flip the client-local favorite flag; returns the new value.
    pub fn toggle_like(&self, id: ApplicantId) -> Result<bool> {
        let liked = self
            .snapshot()
            .get(id)
            .map(|r| !r.liked)
            .ok_or_else(|| Error::not_found(id))?;
        self.set_liked(id, liked)?;
        Ok(liked)
    }

    /// Set the client-local favorite flag.
    pub fn set_liked(&self, id: ApplicantId, liked: bool) -> Result<()> {
        let mut found = false;
        self.state.send_if_modified(|set| match set.with_liked(id, liked) {
            Some(next) => {
                found = true;
                let changed = **set != next;
                *set = Arc::new(next);
                changed
            }
            None => false,
        });

        if found {
            Ok(())
        } else {
            Err(Error::not_found(id))
        }
    }

    async fn refresh(&self) -> Result<Arc<WorkingSet>> {
        let records = self.store.scan_all().await?;
        let set = Arc::new(WorkingSet::from_scan(records));
        debug!(count = set.len(), "Loaded working set");
        self.state.send_replace(set.clone());
        Ok(set)
    }

    async fn confirm(&self, id: ApplicantId, patch: &ApplicantPatch) -> Result<()> {
        match self.store.get(id).await {
            Ok(Some(record)) => {
                self.state.send_if_modified(|set| match set.replaced(record) {
                    Some(next) => {
                        *set = Arc::new(next);
                        true
                    }
                    None => false,
                });
                Ok(())
            }
            Ok(None) => {
                warn!(%id, "Updated applicant vanished, reloading");
                self.refresh().await.map(|_| ())
            }
            Err(e) => {
                warn!(%id, error = %e, "Could not confirm update, keeping local patch");
                self.publish_patch(id, patch);
                Ok(())
            }
        }
    }

    fn publish_patch(&self, id: ApplicantId, patch: &ApplicantPatch) {
        let applied = self.state.send_if_modified(|set| match set.patched(id, patch) {
            Some(next) => {
                *set = Arc::new(next);
                true
            }
            None => false,
        });

        if !applied {
            warn!(%id, "Updated applicant is not in the working set");
        }
    }
}

impl<S> fmt::Debug for Synchronizer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronizer")
            .field("options", &self.options)
            .field("records", &self.state.borrow().len())
            .finish_non_exhaustive()
    }
}
