//! Interactive shell over a synchronized working set.
//!
//! The shell loads every applicant once, then applies each command through
//! the [`Synchronizer`]. The table is redrawn whenever the working set
//! changes or the search filter does.

mod parse;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use applicants_core::{ApplicantId, SyncOptions, Synchronizer};

use crate::config::StoreArgs;
use crate::output;
use crate::store::CliStore;

use parse::{HELP, ShellCommand};

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Re-read each applicant from the store after editing it
    #[arg(long)]
    pub confirm_updates: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

type Input = Lines<BufReader<Stdin>>;

struct Shell {
    sync: Synchronizer<CliStore>,
    query: String,
}

pub async fn run(args: ShellArgs) -> Result<()> {
    let store = args.store.open()?;
    let location = store.describe();

    let shell = Shell {
        sync: Synchronizer::with_options(
            store,
            SyncOptions {
                confirm_updates: args.confirm_updates,
            },
        ),
        query: String::new(),
    };

    eprintln!("Applicants at {}. Type 'help' for commands.", location);
    shell.repl().await
}

impl Shell {
    async fn repl(mut self) -> Result<()> {
        let mut changes = self.sync.subscribe();
        let mut input: Input = BufReader::new(tokio::io::stdin()).lines();

        if let Err(e) = self.sync.load().await {
            output::error(&format!("Failed to load applicants: {}", e));
        }
        changes.borrow_and_update();
        self.render();

        loop {
            prompt()?;
            let Some(line) = input.next_line().await.context("Failed to read input")? else {
                break;
            };

            let command = match parse::parse(&line) {
                Ok(Some(ShellCommand::Quit)) => break,
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    output::error(&e.to_string());
                    continue;
                }
            };

            let redraw = matches!(command, ShellCommand::List | ShellCommand::Search(_));
            if let Err(e) = self.execute(command, &mut input).await {
                output::error(&format!("{:#}", e));
            }

            if changes.has_changed().unwrap_or(false) {
                changes.borrow_and_update();
                self.render();
            } else if redraw {
                self.render();
            }
        }

        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand, input: &mut Input) -> Result<()> {
        match command {
            ShellCommand::List | ShellCommand::Quit => {}
            ShellCommand::Search(query) => self.query = query,
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Reload => {
                let set = self.sync.load().await?;
                output::success(&format!("Loaded {} applicants", set.len()));
            }
            ShellCommand::Add(draft) => {
                let record = self.sync.create(draft).await?;
                output::success(&format!("Created applicant {}", record.id));
            }
            ShellCommand::Edit(id, patch) => {
                self.sync.update(id, patch).await?;
                output::success(&format!("Updated applicant {}", id));
            }
            ShellCommand::Like(id) => {
                let liked = self.sync.toggle_like(id)?;
                let verb = if liked { "Liked" } else { "Unliked" };
                output::success(&format!("{} applicant {}", verb, id));
            }
            ShellCommand::Delete { id, confirmed } => {
                if !confirmed && !self.confirm_delete(id, input).await? {
                    eprintln!("Aborted.");
                    return Ok(());
                }
                self.sync.delete(id).await?;
                output::success(&format!("Deleted applicant {}", id));
            }
        }
        Ok(())
    }

    async fn confirm_delete(&self, id: ApplicantId, input: &mut Input) -> Result<bool> {
        let name = self
            .sync
            .snapshot()
            .get(id)
            .map(|r| format!(" ({})", r.full_name()))
            .unwrap_or_default();

        eprint!("Delete applicant {}{}? [y/N] ", id, name);
        io::stderr().flush()?;

        let answer = input.next_line().await?.unwrap_or_default();
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    fn render(&self) {
        let records = self.sync.search(&self.query);
        output::table(&records);
        if !self.query.trim().is_empty() {
            output::field(
                "Search",
                &format!(
                    "\"{}\" ({} of {})",
                    self.query.trim(),
                    records.len(),
                    self.sync.snapshot().len()
                ),
            );
        }
    }
}

fn prompt() -> io::Result<()> {
    print!("applicants> ");
    io::stdout().flush()
}
