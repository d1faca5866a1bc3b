//! Edit command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use applicants_core::{ApplicantId, ApplicantPatch, RecordStore};

use crate::config::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Applicant id
    pub id: String,

    /// New first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New position
    #[arg(long)]
    pub position: Option<String>,

    /// New avatar image path
    #[arg(long, conflicts_with = "clear_avatar")]
    pub avatar: Option<String>,

    /// Remove the avatar
    #[arg(long)]
    pub clear_avatar: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl EditArgs {
    fn patch(&self) -> ApplicantPatch {
        let mut patch = ApplicantPatch::new();
        if let Some(v) = &self.first_name {
            patch = patch.first_name(v);
        }
        if let Some(v) = &self.last_name {
            patch = patch.last_name(v);
        }
        if let Some(v) = &self.email {
            patch = patch.email(v);
        }
        if let Some(v) = &self.position {
            patch = patch.position(v);
        }
        if let Some(v) = &self.avatar {
            patch = patch.avatar(v);
        }
        if self.clear_avatar {
            patch = patch.clear_avatar();
        }
        patch
    }
}

pub async fn run(args: EditArgs) -> Result<()> {
    let id: ApplicantId = args.id.parse().context("Invalid applicant id")?;

    let patch = args.patch();
    if patch.is_empty() {
        bail!("Nothing to change; pass at least one field option");
    }

    let store = args.store.open()?;
    store
        .update(id, &patch)
        .await
        .with_context(|| format!("Failed to update applicant {}", id))?;

    output::success(&format!("Updated applicant {}", id));

    Ok(())
}
