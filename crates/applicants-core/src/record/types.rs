//! Record and draft types.

use serde::{Deserialize, Deserializer, Serialize};

use super::ApplicantPatch;
use crate::types::ApplicantId;

/// Reads a JSON `null` text column as the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// An applicant as held by the record store.
///
/// The `liked` flag is a client-side favorite marker. It is never sent to or
/// read from the store, so every record produced by a scan starts unliked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    /// Store-assigned identifier.
    #[serde(rename = "applicant_id", alias = "id")]
    pub id: ApplicantId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub position: String,

    /// Path or URL of the avatar image; `None` means no picture.
    #[serde(default)]
    pub avatar: Option<String>,

    /// Client-local favorite flag.
    #[serde(skip)]
    pub liked: bool,
}

impl ApplicantRecord {
    /// Build a record from a draft and the id the store assigned to it.
    pub fn from_draft(id: ApplicantId, draft: ApplicantDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            position: draft.position,
            avatar: draft.avatar,
            liked: false,
        }
    }

    /// Returns the visible fields of this record as a draft.
    pub fn to_draft(&self) -> ApplicantDraft {
        ApplicantDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            position: self.position.clone(),
            avatar: self.avatar.clone(),
        }
    }

    /// Apply the fields set in `patch`, leaving the rest untouched.
    ///
    /// The id and the `liked` flag are never changed by a patch.
    pub fn apply(&mut self, patch: &ApplicantPatch) {
        if let Some(ref first_name) = patch.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(ref last_name) = patch.last_name {
            self.last_name.clone_from(last_name);
        }
        if let Some(ref email) = patch.email {
            self.email.clone_from(email);
        }
        if let Some(ref position) = patch.position {
            self.position.clone_from(position);
        }
        if let Some(ref avatar) = patch.avatar {
            self.avatar.clone_from(avatar);
        }
    }

    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// Initials shown in place of a missing avatar.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Returns true if `needle` occurs in any searchable field.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.position,
            &self.email,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// A record submitted for creation; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantDraft {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub position: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ApplicantDraft {
    /// Create a draft without an avatar.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            position: position.into(),
            avatar: None,
        }
    }

    /// Set the avatar path.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}
