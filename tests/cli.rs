use assert_cmd::Command;
use predicates::prelude::*;

fn gemcommit() -> Command {
    Command::cargo_bin("gemcommit").unwrap()
}

#[test]
fn help_lists_commands() {
    gemcommit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("suggest"))
        .stdout(predicate::str::contains("insert"))
        .stdout(predicate::str::contains("detailed"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn insert_alias_accepts_suggest_flags() {
    gemcommit()
        .args(["insert", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--edit"));
}

#[test]
fn unknown_config_key_is_rejected() {
    gemcommit()
        .args(["config", "get", "gemini-model"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn history_list_on_fresh_install_is_empty() {
    let home = tempfile::tempdir().unwrap();
    gemcommit()
        .args(["history", "--list"])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No commit messages in history yet."));
}

#[test]
fn config_round_trip_in_isolated_home() {
    let home = tempfile::tempdir().unwrap();
    let run = |args: &[&str]| {
        let mut cmd = gemcommit();
        cmd.args(args)
            .env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path().join(".config"));
        cmd.assert()
    };

    run(&["config", "get", "model"])
        .success()
        .stdout(predicate::str::contains("Gemini model: gemini-2.5-flash"));

    run(&["config", "set", "prompt-before-insert", "sometimes"])
        .failure()
        .stderr(predicate::str::contains("Invalid value 'sometimes'"));

    run(&["config", "set", "model", "gemini-2.5-pro"]).success();
    run(&["config", "get", "model"])
        .success()
        .stdout(predicate::str::contains("Gemini model: gemini-2.5-pro"));

    run(&["config", "remove", "model"]).success();
    run(&["config", "get", "model"])
        .success()
        .stdout(predicate::str::contains("Gemini model: gemini-2.5-flash"));
}
