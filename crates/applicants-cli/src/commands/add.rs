//! Add command implementation.

use anyhow::{Context, Result};
use clap::Args;

use applicants_core::{ApplicantDraft, RecordStore};

use crate::config::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// First name
    #[arg(long)]
    pub first_name: String,

    /// Last name
    #[arg(long)]
    pub last_name: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Position applied for
    #[arg(long)]
    pub position: String,

    /// Avatar image path, e.g. /images/jim.png
    #[arg(long)]
    pub avatar: Option<String>,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub async fn run(args: AddArgs) -> Result<()> {
    let store = args.store.open()?;

    let mut draft = ApplicantDraft::new(args.first_name, args.last_name, args.email, args.position);
    if let Some(avatar) = args.avatar {
        draft = draft.with_avatar(avatar);
    }

    let record = store
        .insert(&draft)
        .await
        .context("Failed to create applicant")?;

    output::success(&format!("Created applicant {}", record.id));
    output::field("Name", &record.full_name());

    Ok(())
}
