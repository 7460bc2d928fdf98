//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify exit codes and output shape.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "meditime-cli", "--"])
        .args(args)
        .env("MEDITIME_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
    assert!(stdout.contains("timer"));
    assert!(stdout.contains("stats"));
}

#[test]
fn test_stats_summary() {
    let (stdout, _, code) = run_cli(&["stats", "summary"]);
    assert_eq!(code, 0, "stats summary failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("summary is valid JSON");
    assert!(parsed.get("total_minutes").is_some());
    assert!(parsed.get("current_streak").is_some());
}

#[test]
fn test_timer_settings() {
    let (stdout, _, code) = run_cli(&["timer", "settings"]);
    assert_eq!(code, 0, "timer settings failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("settings are valid JSON");
    assert!(parsed.get("duration_min").is_some());
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "timer.default_duration_min"]);
    assert_eq!(code, 0, "config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_calendar() {
    let (stdout, _, code) = run_cli(&["calendar", "--year", "2025", "--month", "6"]);
    assert_eq!(code, 0, "calendar failed");
    assert!(stdout.contains("June 2025"));
    assert!(stdout.contains("Su"));
}

#[test]
fn test_theme_roundtrip() {
    let (stdout, _, code) = run_cli(&["theme", "set", "dark"]);
    assert_eq!(code, 0, "theme set failed");
    assert_eq!(stdout.trim(), "dark");

    let (stdout, _, code) = run_cli(&["theme", "show"]);
    assert_eq!(code, 0, "theme show failed");
    assert_eq!(stdout.trim(), "dark");
}

#[test]
fn test_reset_requires_confirmation() {
    let (stdout, _, code) = run_cli(&["reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("--yes"));
}
