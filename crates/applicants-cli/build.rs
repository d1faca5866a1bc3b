//! Embeds a version string for `applicants --version`.
//!
//! Uses `git describe` when building from a checkout and falls back to the
//! crate version for source tarballs.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let package = env!("CARGO_PKG_VERSION");
    let version = match describe() {
        Some(described) if described != package => format!("{} ({})", package, described),
        _ => package.to_string(),
    };

    println!("cargo:rustc-env=APPLICANTS_VERSION={}", version);
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim().trim_start_matches('v');

    (!described.is_empty()).then(|| described.to_string())
}
