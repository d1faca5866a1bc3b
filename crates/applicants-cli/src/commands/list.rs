//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;

use applicants_core::Synchronizer;

use crate::config::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show applicants whose name, email or position contains this text
    #[arg(long, short)]
    pub query: Option<String>,

    /// Print the records as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let store = args.store.open()?;
    let sync = Synchronizer::new(store);

    sync.load().await.context("Failed to load applicants")?;

    let records = sync.search(args.query.as_deref().unwrap_or(""));

    if args.json {
        output::json_pretty(&records)?;
    } else {
        output::table(&records);
    }

    Ok(())
}
