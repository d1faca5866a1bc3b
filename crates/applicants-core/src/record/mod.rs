//! Applicant record types.
//!
//! [`ApplicantRecord`] is the one canonical record shape. [`ApplicantDraft`]
//! is what a client submits for creation and [`ApplicantPatch`] what it
//! submits for an update.

mod patch;
mod types;

pub use patch::ApplicantPatch;
pub use types::{ApplicantDraft, ApplicantRecord};
