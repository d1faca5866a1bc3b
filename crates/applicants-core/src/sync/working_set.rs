//! The client's in-memory view of the record store.

use crate::record::{ApplicantPatch, ApplicantRecord};
use crate::types::ApplicantId;

/// An ordered, id-unique list of applicant records.
///
/// Records are always sorted by ascending id, whatever order the store
/// returned them in. A `WorkingSet` is never mutated in place once it has been
/// published; changes produce a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    records: Vec<ApplicantRecord>,
}

impl WorkingSet {
    /// Build a working set from the result of a full scan.
    ///
    /// Sorts by id, keeps the first record seen for a duplicated id and
    /// resets every `liked` flag.
    pub fn from_scan(mut records: Vec<ApplicantRecord>) -> Self {
        records.sort_by_key(|r| r.id);
        records.dedup_by_key(|r| r.id);
        for record in &mut records {
            record.liked = false;
        }
        Self { records }
    }

    /// Returns the records in display order.
    pub fn records(&self) -> &[ApplicantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApplicantRecord> {
        self.records.iter()
    }

    /// Look up a record by id.
    pub fn get(&self, id: ApplicantId) -> Option<&ApplicantRecord> {
        self.position(id).map(|idx| &self.records[idx])
    }

    pub fn contains(&self, id: ApplicantId) -> bool {
        self.position(id).is_some()
    }

    /// Records whose first name, last name, position or email contain
    /// `query`, ignoring case.
    ///
    /// The query is trimmed; an empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&ApplicantRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    /// A copy of this set with `patch` applied to the record at `id`.
    pub(crate) fn patched(&self, id: ApplicantId, patch: &ApplicantPatch) -> Option<Self> {
        self.modified(id, |record| record.apply(patch))
    }

    /// A copy of this set with the record at `record.id` replaced, keeping
    /// its `liked` flag.
    pub(crate) fn replaced(&self, record: ApplicantRecord) -> Option<Self> {
        self.modified(record.id, |current| {
            let liked = current.liked;
            *current = record;
            current.liked = liked;
        })
    }

    /// A copy of this set with the `liked` flag of `id` set to `liked`.
    pub(crate) fn with_liked(&self, id: ApplicantId, liked: bool) -> Option<Self> {
        self.modified(id, |record| record.liked = liked)
    }

    fn modified(&self, id: ApplicantId, f: impl FnOnce(&mut ApplicantRecord)) -> Option<Self> {
        let idx = self.position(id)?;
        let mut records = self.records.clone();
        f(&mut records[idx]);
        Some(Self { records })
    }

    fn position(&self, id: ApplicantId) -> Option<usize> {
        self.records.binary_search_by_key(&id, |r| r.id).ok()
    }
}

impl<'a> IntoIterator for &'a WorkingSet {
    type Item = &'a ApplicantRecord;
    type IntoIter = std::slice::Iter<'a, ApplicantRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
