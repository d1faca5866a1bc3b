//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{add, delete, edit, get, list, serve, shell};

/// Applicant tracking server and client.
#[derive(Parser, Debug)]
#[command(name = "applicants")]
#[command(author, version = env!("APPLICANTS_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the applicants REST server
    Serve(serve::ServeArgs),

    /// List applicants, optionally filtered by a search query
    List(list::ListArgs),

    /// Show a single applicant
    Get(get::GetArgs),

    /// Create a new applicant
    Add(add::AddArgs),

    /// Change fields of an applicant
    Edit(edit::EditArgs),

    /// Delete an applicant
    Delete(delete::DeleteArgs),

    /// Interactive applicant table
    Shell(shell::ShellArgs),
}
