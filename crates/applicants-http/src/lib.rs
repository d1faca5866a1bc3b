//! applicants-http - Record store backed by the applicants REST API.

mod client;
mod store;

pub use client::RestClient;
pub use store::HttpStore;
