//! Delete command implementation.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::Args;

use applicants_core::{ApplicantId, RecordStore};

use crate::config::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Applicant id
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub async fn run(args: DeleteArgs) -> Result<()> {
    let id: ApplicantId = args.id.parse().context("Invalid applicant id")?;
    let store = args.store.open()?;

    let Some(record) = store.get(id).await.context("Failed to fetch applicant")? else {
        bail!("Applicant {} not found", id);
    };

    if !args.yes {
        eprint!("Delete applicant {} ({})? [y/N] ", id, record.full_name());
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    store
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete applicant {}", id))?;

    output::success(&format!("Deleted applicant {}", id));

    Ok(())
}
