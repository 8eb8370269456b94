//! CLI smoke tests for the user-console binary
//!
//! These run the binary with a throwaway HOME so configuration loading and
//! logging setup never touch the developer's real home directory.

use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_user_console(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_user-console"))
        .args(args)
        .env("HOME", home.path())
        .env("APPDATA", home.path())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute user-console")
}

#[test]
fn test_cli_help_command() {
    let home = TempDir::new().unwrap();
    let output = run_user_console(&home, &["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("shell"), "Should contain 'shell' subcommand");
    assert!(stdout.contains("list"), "Should contain 'list' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--base-url"), "Should mention base-url option");
}

#[test]
fn test_cli_version_command() {
    let home = TempDir::new().unwrap();
    let output = run_user_console(&home, &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_print_config_includes_overrides() {
    let home = TempDir::new().unwrap();
    let output = run_user_console(
        &home,
        &[
            "--base-url",
            "http://127.0.0.1:9",
            "--page-size",
            "7",
            "--print-config",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users_directory:"));
    assert!(stdout.contains("http://127.0.0.1:9"));
    assert!(stdout.contains("users_per_page: 7"));
}

#[test]
fn test_check_with_config_file() {
    let home = TempDir::new().unwrap();
    let cfg_path = home.path().join("console.yaml");
    let yaml = format!(
        r#"
app:
  home_dir: "{}"

logging:
  default:
    console_level: "off"
    file: ""

modules:
  users_directory:
    base_url: "http://localhost:3000"
    users_per_page: 10
"#,
        home.path().join("state").to_string_lossy().replace('\\', "/")
    );
    std::fs::write(&cfg_path, yaml).unwrap();

    let output = run_user_console(&home, &["--config", cfg_path.to_str().unwrap(), "check"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("users_per_page: 10"));
    assert!(home.path().join("state").is_dir());
}

#[test]
fn test_check_rejects_invalid_base_url() {
    let home = TempDir::new().unwrap();
    let output = run_user_console(&home, &["--base-url", "not a url", "check"]);
    assert!(!output.status.success());
}

#[test]
fn test_zero_page_size_is_rejected() {
    let home = TempDir::new().unwrap();
    let output = run_user_console(&home, &["--page-size", "0", "check"]);
    assert!(!output.status.success());
}

#[test]
fn test_list_against_unreachable_server_fails() {
    let home = TempDir::new().unwrap();
    let output = run_user_console(&home, &["--base-url", "http://127.0.0.1:9", "list"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to fetch users"));
}

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    let output = run_user_console(&home, &["frobnicate"]);
    assert!(!output.status.success());
}
