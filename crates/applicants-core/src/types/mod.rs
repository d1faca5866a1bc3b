//! Identifier and address types.
//!
//! These types validate at construction time so the rest of the crate can
//! pass them around without re-checking.

mod applicant_id;
mod store_url;

pub use applicant_id::ApplicantId;
pub use store_url::StoreUrl;
