//! Get command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use applicants_core::{ApplicantId, RecordStore};

use crate::config::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Applicant id
    pub id: String,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub async fn run(args: GetArgs) -> Result<()> {
    let id: ApplicantId = args.id.parse().context("Invalid applicant id")?;
    let store = args.store.open()?;

    let Some(record) = store.get(id).await.context("Failed to fetch applicant")? else {
        bail!("Applicant {} not found", id);
    };

    if args.json {
        output::json_pretty(&record)?;
    } else {
        output::record(&record);
    }

    Ok(())
}
