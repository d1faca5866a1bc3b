//! Client-side synchronization of the applicant working set.

mod in_flight;
mod synchronizer;
mod working_set;

pub use in_flight::Operation;
pub use synchronizer::{SyncOptions, Synchronizer};
pub use working_set::WorkingSet;
