//! applicants-file - Filesystem-backed record store.
//!
//! Each applicant is one JSON file under `<root>/applicants/`. Ids come from
//! a sequence file and are never reused, even after a delete. Writes and id
//! allocation are serialised across processes with an exclusive lock on
//! `<root>/store.lock`.

mod store;

pub use store::FileStore;
