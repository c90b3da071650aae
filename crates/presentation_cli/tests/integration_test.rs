//! Integration tests for CLI
//!
//! These tests run the compiled binary. None of them reach a live backend:
//! they cover argument handling, configuration errors and failures against
//! an unreachable directory.

use std::io::Write;
use std::process::{Command, Output};

fn sos_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sos-cli"))
        .args(args)
        .env_remove("SOS_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_lists_commands() {
    let output = sos_cli(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["contacts", "vehicle", "select", "alert", "emergency", "workflows"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn version_flag() {
    let output = sos_cli(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("sos-cli"));
}

#[test]
fn unknown_emergency_type_is_usage_error() {
    let output = sos_cli(&["select", "--type", "fire", "--location", "Lyon"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("fire"));
}

#[test]
fn missing_config_file_fails() {
    let output = sos_cli(&["--config", "/nonexistent/sos.toml", "contacts"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load configuration"));
}

#[test]
fn inverted_selection_bounds_fail() {
    let file = config_file("[selection]\nmin_contacts = 5\nmax_contacts = 2\n");
    let path = file.path().to_string_lossy().into_owned();

    let output = sos_cli(&["--config", &path, "contacts"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("min_contacts"));
}

#[test]
fn workflows_without_n8n_section_fail() {
    let file = config_file("[logging]\nfilter = \"error\"\n");
    let path = file.path().to_string_lossy().into_owned();

    let output = sos_cli(&["--config", &path, "workflows", "list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("n8n is not configured"));
}

#[test]
fn unreachable_directory_reports_missing_contact() {
    let file = config_file(
        "[directory]\nbase_url = \"http://127.0.0.1:1\"\ntimeout_secs = 2\n\n[logging]\nfilter = \"error\"\n",
    );
    let path = file.path().to_string_lossy().into_owned();

    let output = sos_cli(&["--config", &path, "contacts", "--id", "c1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Contact c1 not found"));
    assert!(output.stdout.is_empty());
}
