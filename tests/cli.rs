//! Integration tests for the command-line interface

mod common;

use assert_cmd::Command;
use common::{create_test_config, create_test_config_in_subdir};
use predicates::prelude::*;

const CONFIG: &str = r#"
vote_party:
  threshold: 3
users:
  Alice:
    permissions: [phantomvoting.admin]
  Bob: {}
"#;

fn cmdtree() -> Command {
    let mut cmd = Command::cargo_bin("cmdtree").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("CMDTREE_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_one_shot_dispatch() {
    let (_dir, config_path) = create_test_config(CONFIG);

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .args(["pv", "givevote", "alice", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gave 5 vote(s) to Alice."));
}

#[test]
fn test_leading_slash_is_ignored() {
    let (_dir, config_path) = create_test_config(CONFIG);

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .arg("/pv voteparty add 1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vote party: 1/3"));
}

#[test]
fn test_unknown_command_fails() {
    let (_dir, config_path) = create_test_config(CONFIG);

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .arg("nosuchcommand")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown command: nosuchcommand"));
}

#[test]
fn test_unauthorized_user_is_silent() {
    let (_dir, config_path) = create_test_config(CONFIG);

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .args(["--as", "bob", "pv", "givevote", "alice", "5"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_user_only_command_as_console() {
    let (_dir, config_path) = create_test_config(CONFIG);

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .args(["vote", "streaks"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "This command can only be executed by players.",
        ));

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .args(["--as", "BOB", "vote", "streaks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your current vote streak is 0."));
}

#[test]
fn test_complete_flag() {
    let (_dir, config_path) = create_test_config(CONFIG);

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .args(["--complete", "pv g"])
        .assert()
        .success()
        .stdout("givevote\n");

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .args(["--complete", "pv givevote "])
        .assert()
        .success()
        .stdout("Alice\nBob\n");

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .args(["--as", "bob", "--complete", "pv g"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_interactive_session() {
    let (_dir, config_path) = create_test_config(CONFIG);

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .write_stdin(
            "pv testvote bob\n\
             pv testvote bob\n\
             ?pv voteparty f\n\
             bogus\n\
             pv testvote bob\n\
             exit\n\
             pv testvote bob\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Vote party: 2/3"))
        .stdout(predicate::str::contains("forcestart\n"))
        .stdout(predicate::str::contains("Unknown command 'bogus'"))
        .stdout(predicate::str::contains("VOTE PARTY! The community reached 3 votes."))
        .stdout(predicate::str::contains("[to Bob] Thanks for voting, Bob! You now have 4").not());
}

#[test]
fn test_interactive_help_lists_permitted_commands() {
    let (_dir, config_path) = create_test_config(CONFIG);

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .args(["--as", "bob"])
        .write_stdin("help\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("/vote"))
        .stdout(predicate::str::contains("/phantomvoting").not());
}

#[test]
fn test_invalid_config_fails() {
    let (_dir, config_path) = create_test_config("vote_party:\n  threshold: 0\n");

    cmdtree()
        .arg("-f")
        .arg(&config_path)
        .arg("vote")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("threshold must be positive"));
}

#[test]
fn test_config_discovered_from_subdirectory() {
    let (_dir, _config_path, sub_dir) = create_test_config_in_subdir(
        "commands:\n  admin:\n    base: voteadmin\n    aliases: [va]\n",
    );

    cmdtree()
        .current_dir(&sub_dir)
        .args(["--complete", "va"])
        .assert()
        .success()
        .stdout("va\nvoteadmin\n");
}

#[test]
fn test_config_from_environment() {
    let (_dir, config_path) = create_test_config("namespace: ballots\n");

    cmdtree()
        .env("CMDTREE_CONFIG", &config_path)
        .args(["--complete", "ballots:v"])
        .assert()
        .success()
        .stdout("ballots:vote\nballots:votes\n");
}

#[test]
fn test_shell_completions() {
    cmdtree()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cmdtree"));
}
