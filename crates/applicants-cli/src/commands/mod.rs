//! Subcommand implementations.

pub mod add;
pub mod delete;
pub mod edit;
pub mod get;
pub mod list;
pub mod serve;
pub mod shell;

use anyhow::Result;

use crate::cli::Commands;

pub async fn handle(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Serve(args) => serve::run(args).await,
        Commands::List(args) => list::run(args).await,
        Commands::Get(args) => get::run(args).await,
        Commands::Add(args) => add::run(args).await,
        Commands::Edit(args) => edit::run(args).await,
        Commands::Delete(args) => delete::run(args).await,
        Commands::Shell(args) => shell::run(args).await,
    }
}
