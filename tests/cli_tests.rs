//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd(cwd: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repo-baseline"));
    cmd.current_dir(cwd.path())
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_API_URL")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repo-baseline"));
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("repo-baseline"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repo-baseline"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Apply baseline housekeeping"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_apply_requires_repo_list() {
    let cwd = TempDir::new().expect("temp cwd");
    cmd(&cwd)
        .args(["apply", "--name", "Someone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You must supply --repos-file or --export-from"));
}

#[test]
fn test_apply_requires_name() {
    let cwd = TempDir::new().expect("temp cwd");
    fs::write(cwd.path().join("repos.txt"), "octo/one\n").expect("write list");
    cmd(&cwd)
        .args(["apply", "--repos-file", "repos.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name is required"));
}

#[test]
fn test_apply_reports_missing_list() {
    let cwd = TempDir::new().expect("temp cwd");
    cmd(&cwd)
        .args(["apply", "--repos-file", "missing.txt", "--name", "Someone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Repo list not found"));
}

#[test]
fn test_apply_uses_name_from_config_file() {
    let cwd = TempDir::new().expect("temp cwd");
    fs::write(cwd.path().join("repo-baseline.toml"), "author = \"Config Author\"\n")
        .expect("write config");
    fs::write(cwd.path().join("repos.txt"), "# nothing to do\n\n").expect("write list");

    cmd(&cwd)
        .args(["apply", "--repos-file", "repos.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 processed"));
}

#[test]
fn test_apply_continues_after_bad_entry() {
    let cwd = TempDir::new().expect("temp cwd");
    fs::write(cwd.path().join("repos.txt"), "not a spec\n").expect("write list");

    cmd(&cwd)
        .args(["apply", "--repos-file", "repos.txt", "--name", "Someone"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Error processing not a spec"))
        .stdout(predicate::str::contains("1 failed"));
}

#[test]
fn test_export_rejects_repo_url() {
    let cwd = TempDir::new().expect("temp cwd");
    cmd(&cwd)
        .args(["export", "octo/hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a repo URL"));
    assert!(!cwd.path().join("repos.txt").exists());
}

#[test]
fn test_export_rejects_non_github_host() {
    let cwd = TempDir::new().expect("temp cwd");
    cmd(&cwd)
        .args(["apply", "--export-from", "https://gitlab.com/octo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provide a GitHub profile or organization URL"));
}

#[test]
fn test_completions_for_bash() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repo-baseline"));
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("repo-baseline"));
}
