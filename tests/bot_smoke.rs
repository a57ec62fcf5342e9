#![allow(clippy::unwrap_used)]
//! Binary smoke tests: the process starts, parses arguments, and fails
//! loudly on missing configuration.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn parley() -> Command {
    Command::cargo_bin("parley").unwrap()
}

#[test]
fn test_help_displays_usage() {
    parley()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Telegram assistant bot"))
        .stdout(predicate::str::contains("--polling"))
        .stdout(predicate::str::contains("--env-file"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_version_displays_version() {
    parley()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_bot_token_fails_startup() {
    // A clean environment and an empty working directory: no .env to load.
    let dir = tempfile::tempdir().unwrap();
    parley()
        .current_dir(dir.path())
        .env_clear()
        .assert()
        .failure()
        .stderr(predicate::str::contains("BOT_TOKEN"));
}

#[test]
fn test_missing_api_key_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    parley()
        .current_dir(dir.path())
        .env_clear()
        .env("BOT_TOKEN", "123:ABC")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_unreadable_env_file_fails_startup() {
    parley()
        .args(["--env-file", "/nonexistent/parley.env"])
        .env_clear()
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load env file"));
}
