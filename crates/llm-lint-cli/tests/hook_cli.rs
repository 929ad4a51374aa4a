use std::fs::write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;

const ENV_VARS: [&str; 5] = [
    "LLM_LINT_MODEL",
    "LLM_LINT_PORT",
    "LLM_LINT_ENDPOINT",
    "LLM_LINT_SERVER_BIN",
    "LLM_LINT_TIMEOUT",
];

fn hook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("llm-lint-cli").unwrap();
    for key in ENV_VARS {
        cmd.env_remove(key);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

fn source(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    write(&path, contents).unwrap();
    path
}

#[test]
fn no_files_exits_cleanly() {
    hook_cmd()
        .assert()
        .success()
        .stdout("No files provided for the hook.\n");
}

#[test]
fn too_many_files_are_skipped() {
    let temp = tempfile::tempdir().unwrap();
    let files: Vec<_> = (0..21)
        .map(|i| source(temp.path(), &format!("f{i}.go"), "package f\n"))
        .collect();
    hook_cmd()
        .env("LLM_LINT_SERVER_BIN", "llm-lint-no-such-server")
        .args(&files)
        .assert()
        .success()
        .stdout("Skipping as analysing more than 20 files would take too long\n");
}

#[test]
fn non_go_files_are_ignored() {
    let temp = tempfile::tempdir().unwrap();
    let notes = source(temp.path(), "notes.md", "# notes\n");
    hook_cmd()
        .arg("--no-server")
        .arg("--endpoint")
        .arg("http://127.0.0.1:1")
        .arg(&notes)
        .assert()
        .success()
        .stdout("All checked files follow Golang best practices.\n");
}

#[test]
fn failing_verdict_is_printed_but_exit_is_zero() {
    let temp = tempfile::tempdir().unwrap();
    let file = source(temp.path(), "server.go", "package server\n");
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate")
            .body_contains("\"model\":\"tiny-model\"");
        then.status(200).body(
            r#"{"response":"{\"follows_best_practices\":false,\"suggestions\":\"use gofmt\"}"}"#,
        );
    });

    hook_cmd()
        .env("LLM_LINT_ENDPOINT", server.base_url())
        .args(["--no-server", "--model", "tiny-model"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "File: {} does not follow best practices:",
            file.display()
        )))
        .stdout(predicate::str::contains("Suggestions: use gofmt"))
        .stdout(predicate::str::contains(
            "Warning: Some files do not follow Golang best practices.",
        ));
    mock.assert();
}

#[test]
fn unreachable_server_reports_per_file_errors() {
    let temp = tempfile::tempdir().unwrap();
    let file = source(temp.path(), "main.go", "package main\n");
    hook_cmd()
        .args(["--no-server", "--endpoint", "http://127.0.0.1:1"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Error querying LLM for file {}:",
            file.display()
        )))
        .stdout(predicate::str::contains(
            "All checked files follow Golang best practices.",
        ));
}

#[test]
fn config_file_limits_are_applied() {
    let temp = tempfile::tempdir().unwrap();
    let config = source(
        temp.path(),
        "llm-lint.toml",
        "[limits]\nmax_chars = 10\n\n[llm]\nendpoint = \"http://127.0.0.1:1\"\n",
    );
    let file = source(temp.path(), "long.go", "package longer_than_ten\n");
    hook_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--no-server")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Skipping file {} as it has more than 10 characters",
            file.display()
        )));
}

#[test]
fn invalid_config_still_exits_zero() {
    hook_cmd()
        .args(["--config", "/no/such/llm-lint.toml", "main.go"])
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to load config file"));
}
