//! Suppression of duplicate in-flight intents.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::record::ApplicantDraft;
use crate::types::ApplicantId;
use crate::{Error, Result};

/// A user intent, keyed by kind and target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Create(ApplicantDraft),
    Update(ApplicantId),
    Delete(ApplicantId),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Load => write!(f, "load"),
            Operation::Create(draft) => write!(
                f,
                "create of {} {} <{}>",
                draft.first_name, draft.last_name, draft.email
            ),
            Operation::Update(id) => write!(f, "update of applicant {}", id),
            Operation::Delete(id) => write!(f, "delete of applicant {}", id),
        }
    }
}

/// The set of operations currently waiting on the store.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    keys: Mutex<HashSet<Operation>>,
}

impl InFlight {
    /// Register `op`, failing if an identical operation is already registered.
    ///
    /// The registration lasts until the returned guard is dropped.
    pub(crate) fn begin(&self, op: Operation) -> Result<InFlightGuard<'_>> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if keys.contains(&op) {
            return Err(Error::InFlight {
                operation: op.to_string(),
            });
        }
        keys.insert(op.clone());
        Ok(InFlightGuard { owner: self, op })
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Releases its operation on drop.
#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    owner: &'a InFlight,
    op: Operation,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_is_rejected_until_released() {
        let in_flight = InFlight::default();
        let id = ApplicantId::new(3);

        let guard = in_flight.begin(Operation::Delete(id)).unwrap();
        let err = in_flight.begin(Operation::Delete(id)).unwrap_err();
        assert!(matches!(err, Error::InFlight { .. }));
        assert_eq!(err.to_string(), "delete of applicant 3 is already in flight");

        drop(guard);
        assert_eq!(in_flight.len(), 0);
        assert!(in_flight.begin(Operation::Delete(id)).is_ok());
    }

    #[test]
    fn different_targets_do_not_collide() {
        let in_flight = InFlight::default();
        let _a = in_flight.begin(Operation::Update(ApplicantId::new(1))).unwrap();
        let _b = in_flight.begin(Operation::Update(ApplicantId::new(2))).unwrap();
        let _c = in_flight.begin(Operation::Delete(ApplicantId::new(1))).unwrap();
        assert_eq!(in_flight.len(), 3);
    }

    #[test]
    fn identical_drafts_collide() {
        let in_flight = InFlight::default();
        let draft = ApplicantDraft::new("Jim", "Halpert", "jim@x.com", "Salesman");
        let _guard = in_flight.begin(Operation::Create(draft.clone())).unwrap();
        assert!(in_flight.begin(Operation::Create(draft)).is_err());
    }
}
