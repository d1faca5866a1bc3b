//! Filesystem storage for applicant records.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::{debug, instrument, warn};

use applicants_core::error::{Error, TransportError};
use applicants_core::{
    ApplicantDraft, ApplicantId, ApplicantPatch, ApplicantRecord, RecordStore, Result,
};

fn map_io(err: std::io::Error) -> Error {
    Error::StoreUnavailable(TransportError::from(err))
}

/// Filesystem-backed applicant store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    ///
    /// Directories are created lazily on the first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for avatar images served alongside the records.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    fn records_dir(&self) -> PathBuf {
        self.root.join("applicants")
    }

    fn record_path(&self, id: ApplicantId) -> PathBuf {
        self.records_dir().join(format!("{}.json", id))
    }

    fn sequence_path(&self) -> PathBuf {
        self.root.join("sequence")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("store.lock")
    }

    /// Run `f` while holding the exclusive store lock.
    fn locked<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        fs::create_dir_all(self.records_dir()).map_err(map_io)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;

        lock_file.lock_exclusive().map_err(map_io)?;
        let result = f();
        lock_file.unlock().map_err(map_io)?;

        result
    }

    /// Allocate the next id. Must be called with the lock held.
    fn next_id(&self) -> Result<ApplicantId> {
        let path = self.sequence_path();
        let last = match fs::read_to_string(&path) {
            Ok(content) => content.trim().parse::<i64>().map_err(|e| {
                Error::malformed(format!("corrupt sequence file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => self.highest_stored_id()?,
            Err(e) => return Err(map_io(e)),
        };

        let id = ApplicantId::new(last).next();
        self.write_atomic(&path, id.to_string().as_bytes())?;
        Ok(id)
    }

    /// Highest id present on disk, or 0 for an empty store.
    fn highest_stored_id(&self) -> Result<i64> {
        Ok(self
            .stored_ids()?
            .into_iter()
            .map(ApplicantId::get)
            .max()
            .unwrap_or(0))
    }

    fn stored_ids(&self) -> Result<Vec<ApplicantId>> {
        let dir = self.records_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir).map_err(map_io)? {
            let path = entry.map_err(map_io)?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::parse::<ApplicantId>)
            {
                Some(Ok(id)) => ids.push(id),
                _ => warn!(path = %path.display(), "Skipping unrecognised record file"),
            }
        }
        Ok(ids)
    }

    fn read_record(&self, id: ApplicantId) -> Result<Option<ApplicantRecord>> {
        let content = match fs::read_to_string(self.record_path(id)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io(e)),
        };

        let record: ApplicantRecord = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    fn write_record(&self, record: &ApplicantRecord) -> Result<()> {
        let content = serde_json::to_vec_pretty(record)?;
        self.write_atomic(&self.record_path(record.id), &content)
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path).map_err(map_io)?;
            file.write_all(content).map_err(map_io)?;
            file.sync_data().map_err(map_io)?;
        }
        fs::rename(&temp_path, path).map_err(map_io)
    }
}

#[async_trait]
impl RecordStore for FileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn scan_all(&self) -> Result<Vec<ApplicantRecord>> {
        let mut ids = self.stored_ids()?;
        ids.sort();

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.read_record(id) {
                Ok(Some(record)) => records.push(record),
                // Deleted between listing and reading.
                Ok(None) => {}
                Err(e @ Error::MalformedData { .. }) => {
                    warn!(%id, error = %e, "Skipping unreadable record");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(count = records.len(), "Scanned records");
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: ApplicantId) -> Result<Option<ApplicantRecord>> {
        self.read_record(id)
    }

    #[instrument(skip(self, draft))]
    async fn insert(&self, draft: &ApplicantDraft) -> Result<ApplicantRecord> {
        let record = self.locked(|| {
            let id = self.next_id()?;
            let record = ApplicantRecord::from_draft(id, draft.clone());
            self.write_record(&record)?;
            Ok(record)
        })?;

        debug!(id = %record.id, "Created record");
        Ok(record)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: ApplicantId, patch: &ApplicantPatch) -> Result<()> {
        self.locked(|| {
            let mut record = self.read_record(id)?.ok_or_else(|| Error::not_found(id))?;
            record.apply(patch);
            self.write_record(&record)
        })?;

        debug!(%id, "Updated record");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ApplicantId) -> Result<()> {
        self.locked(|| match fs::remove_file(self.record_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::not_found(id)),
            Err(e) => Err(map_io(e)),
        })?;

        debug!(%id, "Deleted record");
        Ok(())
    }
}
