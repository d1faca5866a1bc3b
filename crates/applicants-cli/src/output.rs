//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use applicants_core::ApplicantRecord;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print every field of one applicant.
pub fn record(record: &ApplicantRecord) {
    field("ID", &record.id.to_string());
    field("Name", &record.full_name());
    field("Email", &record.email);
    field("Position", &record.position);
    field("Avatar", record.avatar.as_deref().unwrap_or("-"));
}

/// Print applicants as an aligned table.
///
/// Rows without an avatar show the applicant's initials in the picture
/// column. Liked rows carry a heart.
pub fn table(records: &[ApplicantRecord]) {
    if records.is_empty() {
        println!("{}", "No applicants.".dimmed());
        return;
    }

    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                picture(r),
                r.full_name(),
                r.email.clone(),
                r.position.clone(),
            ]
        })
        .collect();

    let headers = ["ID", "PICTURE", "NAME", "EMAIL", "POSITION"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = headers
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{:<w$}", h))
        .collect();
    println!("{}", header.join("  ").bold());

    for (row, record) in rows.iter().zip(records) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:<w$}", cell))
            .collect();
        let heart = if record.liked { "♥".red().to_string() } else { " ".to_string() };
        println!("{}  {}", cells.join("  "), heart);
    }
}

fn picture(record: &ApplicantRecord) -> String {
    match &record.avatar {
        Some(avatar) if !avatar.is_empty() => avatar.clone(),
        _ => format!("({})", record.initials()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applicants_core::{ApplicantDraft, ApplicantId};

    #[test]
    fn picture_falls_back_to_initials() {
        let draft = ApplicantDraft::new("Stanley", "Hudson", "stanley@dunder-mifflin.com", "Sales");
        let record = ApplicantRecord::from_draft(ApplicantId::new(1), draft.clone());
        assert_eq!(picture(&record), "(SH)");

        let record =
            ApplicantRecord::from_draft(ApplicantId::new(2), draft.with_avatar("/images/s.png"));
        assert_eq!(picture(&record), "/images/s.png");
    }
}
