// ABOUTME: Integration tests for the scribe-clean binary.
// ABOUTME: Covers in-place cleaning with backups, rule toggles, config files and failure exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const MESSY: &str = "#Title\nSome _emphasis_ here   \n\n\n\n-   item";

fn clean_cmd() -> Command {
    let mut cmd = Command::cargo_bin("scribe-clean").unwrap();
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn cleans_file_and_keeps_backup() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("post.md");
    fs::write(&file, MESSY).unwrap();

    clean_cmd()
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("Processed 1 file(s), 0 failed"));

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "# Title\n\nSome *emphasis* here\n\n- item"
    );
    assert_eq!(fs::read_to_string(dir.path().join("post.md.backup")).unwrap(), MESSY);
}

#[test]
fn disable_flag_turns_rule_off() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("post.md");
    fs::write(&file, MESSY).unwrap();

    clean_cmd()
        .arg("--disable")
        .arg("standardize-emphasis")
        .arg(&file)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "# Title\n\nSome _emphasis_ here\n\n- item"
    );
}

#[test]
fn config_file_sets_options() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("post.md");
    let config = dir.path().join("cleanup.json");
    fs::write(&file, MESSY).unwrap();
    fs::write(&config, r#"{"fixHeadingSpacing": false}"#).unwrap();

    clean_cmd()
        .arg("--config")
        .arg(&config)
        .arg(&file)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "#Title\nSome *emphasis* here\n\n- item"
    );
}

#[test]
fn cleans_directory_recursively() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("drafts");
    fs::create_dir(&nested).unwrap();
    fs::write(dir.path().join("a.md"), "_a_").unwrap();
    fs::write(nested.join("b.markdown"), "_b_").unwrap();
    fs::write(dir.path().join("skip.txt"), "_c_").unwrap();

    clean_cmd()
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Processed 2 file(s), 0 failed"));

    assert_eq!(fs::read_to_string(nested.join("b.markdown")).unwrap(), "*b*");
    assert_eq!(fs::read_to_string(dir.path().join("skip.txt")).unwrap(), "_c_");
}

#[test]
fn stdin_is_cleaned_to_stdout() {
    clean_cmd()
        .arg("-")
        .write_stdin("##Hi\n_there_")
        .assert()
        .success()
        .stdout("## Hi\n\n*there*\n");
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();
    clean_cmd()
        .arg(dir.path().join("nope.md"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unknown_rule_is_rejected() {
    clean_cmd()
        .arg("--disable")
        .arg("make-it-pretty")
        .arg("x.md")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown cleanup rule"));
}
