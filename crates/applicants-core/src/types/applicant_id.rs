//! Applicant identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A store-assigned applicant identifier.
///
/// Ids are positive integers handed out by the record store on insert and
/// never change afterwards. Ordering follows the numeric value, which is the
/// display order of the working set.
///
/// # Example
///
/// ```
/// use applicants_core::ApplicantId;
///
/// let id: ApplicantId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(i64);

impl ApplicantId {
    /// Wrap a raw id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the id that follows this one.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApplicantId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|e: std::num::ParseIntError| {
            InvalidInputError::ApplicantId {
                value: s.to_string(),
                reason: e.to_string(),
            }
        })?;

        if value <= 0 {
            return Err(InvalidInputError::ApplicantId {
                value: s.to_string(),
                reason: "must be a positive integer".to_string(),
            }
            .into());
        }

        Ok(Self(value))
    }
}

impl From<i64> for ApplicantId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
