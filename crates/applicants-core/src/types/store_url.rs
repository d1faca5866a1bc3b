//! Record store URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};
use crate::types::ApplicantId;

/// A validated record store address.
///
/// Two kinds of store are addressable:
///
/// - network stores (`http://` or `https://`), reached through the REST
///   contract rooted at `<base>/applicants`;
/// - local stores (`file:///path/to/data`), read and written directly on the
///   filesystem without a running server.
///
/// # Example
///
/// ```
/// use applicants_core::{ApplicantId, StoreUrl};
///
/// let store = StoreUrl::new("http://localhost:8000/").unwrap();
/// assert_eq!(store.collection_url(), "http://localhost:8000/applicants");
/// assert_eq!(
///     store.record_url(ApplicantId::new(3)),
///     "http://localhost:8000/applicants/3"
/// );
///
/// let local = StoreUrl::new("file:///tmp/applicants").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreUrl(Url);

impl StoreUrl {
    /// Path segment under which applicant records live.
    pub const COLLECTION: &'static str = "applicants";

    /// Create a new store URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or uses an unsupported scheme.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::StoreUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Create a `file://` store URL for a local directory.
    pub fn from_directory(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let url = Url::from_directory_path(path).map_err(|_| InvalidInputError::StoreUrl {
            value: path.display().to_string(),
            reason: "must be an absolute directory path".to_string(),
        })?;
        Ok(Self(url))
    }

    /// Returns the URL of the applicant collection.
    pub fn collection_url(&self) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, Self::COLLECTION)
    }

    /// Returns the URL of a single applicant record.
    pub fn record_url(&self, id: ApplicantId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns true if this is a local filesystem store (file:// URL).
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns true if this is a network store (http:// or https:// URL).
    pub fn is_network(&self) -> bool {
        matches!(self.0.scheme(), "http" | "https")
    }

    /// Returns the filesystem path for file:// URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::StoreUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        match url.scheme() {
            "file" => {
                if url.to_file_path().is_err() {
                    return Err(InvalidInputError::StoreUrl {
                        value: original.to_string(),
                        reason: "file:// URL must name a local absolute path".to_string(),
                    }
                    .into());
                }
            }
            "http" | "https" => {
                if url.host_str().is_none() {
                    return Err(InvalidInputError::StoreUrl {
                        value: original.to_string(),
                        reason: "must have a host".to_string(),
                    }
                    .into());
                }
            }
            other => {
                return Err(InvalidInputError::StoreUrl {
                    value: original.to_string(),
                    reason: format!("unsupported scheme '{}'", other),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for StoreUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for StoreUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        StoreUrl::new(&s).map_err(serde::de::Error::custom)
    }
}
