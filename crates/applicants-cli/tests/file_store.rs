//! CLI integration tests against a file-backed store.

mod common;

use tempfile::TempDir;

use common::{file_store_url, run_cli, run_cli_success, run_cli_with_input};

fn add(store: &str, first: &str, last: &str, position: &str) -> String {
    let email = format!("{}@dunder-mifflin.com", first.to_lowercase());
    run_cli_success(
        &[
            "add",
            "--first-name",
            first,
            "--last-name",
            last,
            "--email",
            &email,
            "--position",
            position,
        ],
        store,
    )
}

#[test]
fn test_add_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store_url(temp_dir.path());

    let stdout = add(&store, "Michael", "Scott", "Regional Manager");
    assert!(stdout.contains("Created applicant 1"));
    add(&store, "Dwight", "Schrute", "Salesman");

    let stdout = run_cli_success(&["list"], &store);
    assert!(stdout.contains("Michael Scott"));
    assert!(stdout.contains("Dwight Schrute"));
    assert!(stdout.contains("(MS)"));
}

#[test]
fn test_list_query_and_json() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store_url(temp_dir.path());
    add(&store, "Michael", "Scott", "Regional Manager");
    add(&store, "Dwight", "Schrute", "Salesman");

    let stdout = run_cli_success(&["list", "--query", "SCHRU", "--json"], &store);
    let records: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["applicant_id"], 2);
    assert_eq!(records[0]["first_name"], "Dwight");
}

#[test]
fn test_edit_then_get() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store_url(temp_dir.path());
    add(&store, "Jim", "Halpert", "Salesman");

    let stdout = run_cli_success(&["edit", "1", "--position", "Co-Manager"], &store);
    assert!(stdout.contains("Updated applicant 1"));

    let stdout = run_cli_success(&["get", "1", "--json"], &store);
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record["position"], "Co-Manager");
    assert_eq!(record["last_name"], "Halpert");
}

#[test]
fn test_edit_without_fields_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store_url(temp_dir.path());
    add(&store, "Jim", "Halpert", "Salesman");

    let output = run_cli(&["edit", "1"], &store);
    assert!(!output.status.success());
}

#[test]
fn test_get_missing_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store_url(temp_dir.path());

    let output = run_cli(&["get", "7"], &store);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_delete_prompts_for_confirmation() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store_url(temp_dir.path());
    add(&store, "Toby", "Flenderson", "HR Representative");

    let output = run_cli_with_input(&["delete", "1"], &store, "n\n");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Aborted"));
    run_cli_success(&["get", "1"], &store);

    let output = run_cli_with_input(&["delete", "1"], &store, "y\n");
    assert!(output.status.success());
    assert!(!run_cli(&["get", "1"], &store).status.success());
}

#[test]
fn test_delete_with_yes_flag() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store_url(temp_dir.path());
    add(&store, "Creed", "Bratton", "Quality Assurance");

    let stdout = run_cli_success(&["delete", "1", "-y"], &store);
    assert!(stdout.contains("Deleted applicant 1"));

    let stdout = run_cli_success(&["list", "--json"], &store);
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_shell_session() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store_url(temp_dir.path());
    add(&store, "Pam", "Beesly", "Receptionist");

    let script = "\
add first=Kevin last=Malone email=kevin@dunder-mifflin.com position=Accountant
like 2
edit 1 position=\"Office Administrator\"
search kevin
delete 1 -y
quit
";
    let output = run_cli_with_input(&["shell"], &store, script);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Created applicant 2"));
    assert!(stdout.contains("Liked applicant 2"));
    assert!(stdout.contains("♥"));
    assert!(stdout.contains("Deleted applicant 1"));

    let stdout = run_cli_success(&["get", "2", "--json"], &store);
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(record.get("liked").is_none());
    assert!(!run_cli(&["get", "1"], &store).status.success());
}

#[test]
fn test_shell_reports_errors_and_continues() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store_url(temp_dir.path());

    let output = run_cli_with_input(&["shell"], &store, "edit 5 email=x@y.z\nbogus\nlist\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stderr.contains("not found"));
    assert!(stderr.contains("Unknown command"));
}
