//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn career_scout_bin() -> Command {
    Command::cargo_bin("career-scout").expect("binary exists")
}

#[test]
fn help_output() {
    career_scout_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("career path assessment"))
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("--auto-mic"))
        .stdout(predicate::str::contains("--no-auto-mic"))
        .stdout(predicate::str::contains("--text-only"))
        .stdout(predicate::str::contains("--cache-dir"));
}

#[test]
fn version_output() {
    career_scout_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("career-scout"));
}

#[test]
fn config_help() {
    career_scout_bin()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn config_path_command() {
    career_scout_bin()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("career-scout"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn cache_help() {
    career_scout_bin()
        .args(["cache", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warm"));
}

#[test]
fn invalid_language_error() {
    career_scout_bin()
        .args(["--language", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn conflicting_mic_flags_error() {
    career_scout_bin()
        .args(["--auto-mic", "--no-auto-mic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn config_get_unknown_key_error() {
    career_scout_bin()
        .args(["config", "get", "no_such_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

// Note: running the bare binary starts an interactive assessment (and
// may open the microphone), so the happy path is covered by use-case
// tests instead.
