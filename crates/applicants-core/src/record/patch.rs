//! Partial record updates.

use serde::{Deserialize, Deserializer, Serialize};

use super::ApplicantDraft;

/// A partial update of an applicant record.
///
/// Unset fields are left as they are. `avatar` has three states: absent
/// (unchanged), `Some(None)` (clear, sent as JSON `null`) and
/// `Some(Some(path))` (replace).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub avatar: Option<Option<String>>,
}

/// Distinguishes an explicit `null` from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ApplicantPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn position(mut self, value: impl Into<String>) -> Self {
        self.position = Some(value.into());
        self
    }

    pub fn avatar(mut self, value: impl Into<String>) -> Self {
        self.avatar = Some(Some(value.into()));
        self
    }

    pub fn clear_avatar(mut self) -> Self {
        self.avatar = Some(None);
        self
    }

    /// Returns true if the patch sets no field.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.position.is_none()
            && self.avatar.is_none()
    }
}

/// A full replacement: every field of the draft is set, including a cleared avatar.
impl From<ApplicantDraft> for ApplicantPatch {
    fn from(draft: ApplicantDraft) -> Self {
        Self {
            first_name: Some(draft.first_name),
            last_name: Some(draft.last_name),
            email: Some(draft.email),
            position: Some(draft.position),
            avatar: Some(draft.avatar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_avatar_means_unchanged() {
        let patch: ApplicantPatch = serde_json::from_value(json!({"email": "a@b.c"})).unwrap();
        assert_eq!(patch.avatar, None);
        assert_eq!(patch.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn null_avatar_means_clear() {
        let patch: ApplicantPatch = serde_json::from_value(json!({"avatar": null})).unwrap();
        assert_eq!(patch.avatar, Some(None));
        assert!(!patch.is_empty());
    }

    #[test]
    fn serializes_only_set_fields() {
        let value = serde_json::to_value(ApplicantPatch::new().position("Manager")).unwrap();
        assert_eq!(value, json!({"position": "Manager"}));

        let value = serde_json::to_value(ApplicantPatch::new().clear_avatar()).unwrap();
        assert_eq!(value, json!({"avatar": null}));
    }

    #[test]
    fn ignores_unknown_fields_such_as_the_id() {
        let patch: ApplicantPatch =
            serde_json::from_value(json!({"applicant_id": 3, "first_name": "Jim"})).unwrap();
        assert_eq!(patch, ApplicantPatch::new().first_name("Jim"));
    }

    #[test]
    fn empty_patch() {
        assert!(ApplicantPatch::new().is_empty());
        let from_draft = ApplicantPatch::from(ApplicantDraft::default());
        assert!(!from_draft.is_empty());
        assert_eq!(from_draft.avatar, Some(None));
    }
}
