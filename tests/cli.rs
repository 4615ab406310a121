//! Binary-level tests that never reach the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aptivara(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aptivara").unwrap();
    cmd.env("APTIVARA_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("APTIVARA_API_URL")
        .env_remove("APTIVARA_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    aptivara(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("aptivara"))
        .stdout(predicate::str::contains("focus"));
}

#[test]
fn skill_list_requires_login() {
    let home = TempDir::new().unwrap();
    aptivara(&home)
        .args(["skill", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn logout_without_session_succeeds() {
    let home = TempDir::new().unwrap();
    aptivara(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn logout_json_reports_nothing_removed() {
    let home = TempDir::new().unwrap();
    aptivara(&home)
        .args(["-o", "json", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"logged_out\": false"));
}

#[test]
fn completions_bash() {
    let home = TempDir::new().unwrap();
    aptivara(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aptivara"));
}

#[test]
fn focus_rejects_zero_minutes() {
    let home = TempDir::new().unwrap();
    aptivara(&home)
        .args(["focus", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn task_add_rejects_xp_out_of_range() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("session.json"),
        r#"{"access_token": "t", "created_at": "2025-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    // Port 9 is discard; validation fails before any request is built.
    aptivara(&home)
        .args(["--api-url", "http://127.0.0.1:9", "task", "add", "1", "Read", "--xp", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("XP reward must be between"));
}

#[test]
fn focus_rejects_more_than_a_day() {
    let home = TempDir::new().unwrap();
    aptivara(&home)
        .args(["focus", "71582789"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}
