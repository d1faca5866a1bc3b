//! Shell line parsing.

use anyhow::{Context, Result, bail};

use applicants_core::{ApplicantDraft, ApplicantId, ApplicantPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    Add(ApplicantDraft),
    Edit(ApplicantId, ApplicantPatch),
    Like(ApplicantId),
    Delete { id: ApplicantId, confirmed: bool },
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list                               show applicants matching the current search
  search [text]                      filter by name, email or position (empty clears)
  add first=.. last=.. email=.. position=.. [avatar=..]
  edit <id> field=value...           fields: first, last, email, position, avatar
                                     (avatar= with no value removes the avatar)
  like <id>                          toggle the heart on an applicant
  delete <id> [-y]                   delete an applicant
  reload                             fetch every applicant from the store again
  help                               show this help
  quit                               leave the shell
Quote values containing spaces: position=\"Regional Manager\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    FirstName,
    LastName,
    Email,
    Position,
    Avatar,
}

impl Field {
    fn parse(key: &str) -> Result<Self> {
        Ok(match key {
            "first" | "first_name" => Field::FirstName,
            "last" | "last_name" => Field::LastName,
            "email" => Field::Email,
            "position" => Field::Position,
            "avatar" => Field::Avatar,
            other => bail!("Unknown field '{}'", other),
        })
    }
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>> {
    let words = split_words(line)?;
    let Some((name, rest)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "search" | "find" => ShellCommand::Search(rest.join(" ")),
        "add" => ShellCommand::Add(parse_draft(rest)?),
        "edit" => {
            let (id, fields) = split_id(rest, "edit")?;
            ShellCommand::Edit(id, parse_patch(fields)?)
        }
        "like" => ShellCommand::Like(single_id(rest, "like")?),
        "delete" | "rm" => {
            let (id, flags) = split_id(rest, "delete")?;
            let confirmed = match flags {
                [] => false,
                [flag] if flag == "-y" || flag == "--yes" => true,
                _ => bail!("Usage: delete <id> [-y]"),
            };
            ShellCommand::Delete { id, confirmed }
        }
        "reload" => ShellCommand::Reload,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => bail!("Unknown command '{}'; type 'help'", other),
    };

    Ok(Some(command))
}

/// Split on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        bail!("Unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn split_id<'a>(args: &'a [String], command: &str) -> Result<(ApplicantId, &'a [String])> {
    let Some((id, rest)) = args.split_first() else {
        bail!("Usage: {} <id> ...", command);
    };
    let id = id.parse().context("Invalid applicant id")?;
    Ok((id, rest))
}

fn single_id(args: &[String], command: &str) -> Result<ApplicantId> {
    match split_id(args, command)? {
        (id, []) => Ok(id),
        _ => bail!("Usage: {} <id>", command),
    }
}

fn parse_fields(args: &[String]) -> Result<Vec<(Field, String)>> {
    args.iter()
        .map(|arg| {
            let Some((key, value)) = arg.split_once('=') else {
                bail!("Expected field=value, got '{}'", arg);
            };
            Ok((Field::parse(&key.to_lowercase())?, value.to_string()))
        })
        .collect()
}

fn parse_draft(args: &[String]) -> Result<ApplicantDraft> {
    let mut draft = ApplicantDraft::default();
    let (mut first, mut last, mut email, mut position) = (false, false, false, false);

    for (field, value) in parse_fields(args)? {
        match field {
            Field::FirstName => (draft.first_name, first) = (value, true),
            Field::LastName => (draft.last_name, last) = (value, true),
            Field::Email => (draft.email, email) = (value, true),
            Field::Position => (draft.position, position) = (value, true),
            Field::Avatar => draft.avatar = (!value.is_empty()).then_some(value),
        }
    }

    if !(first && last && email && position) {
        bail!("add needs first=, last=, email= and position=");
    }
    Ok(draft)
}

fn parse_patch(args: &[String]) -> Result<ApplicantPatch> {
    let mut patch = ApplicantPatch::new();
    for (field, value) in parse_fields(args)? {
        patch = match field {
            Field::FirstName => patch.first_name(value),
            Field::LastName => patch.last_name(value),
            Field::Email => patch.email(value),
            Field::Position => patch.position(value),
            Field::Avatar if value.is_empty() => patch.clear_avatar(),
            Field::Avatar => patch.avatar(value),
        };
    }

    if patch.is_empty() {
        bail!("edit needs at least one field=value");
    }
    Ok(patch)
}
