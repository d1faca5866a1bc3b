//! applicants-core - Core applicant record types, the record store trait and
//! the client-side synchronization layer.
//!
//! The [`Synchronizer`] owns the client's working set of records and mediates
//! every mutation against a [`RecordStore`]:
//!
//! - creates and deletes are followed by a full reload;
//! - updates patch the affected entry locally;
//! - searches are pure filters over the current snapshot.
//!
//! # Example
//!
//! ```no_run
//! use applicants_core::{ApplicantDraft, RecordStore, Synchronizer};
//!
//! # async fn example(store: impl RecordStore) -> applicants_core::Result<()> {
//! let sync = Synchronizer::new(store);
//! sync.load().await?;
//!
//! sync.create(ApplicantDraft::new("Jim", "Halpert", "jim@x.com", "Salesman"))
//!     .await?;
//!
//! for record in sync.search("sales") {
//!     println!("{} {}", record.id, record.full_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod record;
pub mod sync;
pub mod traits;
pub mod types;

pub use error::Error;
pub use record::{ApplicantDraft, ApplicantPatch, ApplicantRecord};
pub use sync::{Operation, SyncOptions, Synchronizer, WorkingSet};
pub use traits::RecordStore;
pub use types::{ApplicantId, StoreUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
