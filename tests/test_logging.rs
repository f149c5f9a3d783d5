//! Structured logging tests
use assert_cmd::Command;
use predicates::prelude::*;

fn procargs(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("procargs").unwrap();
    cmd.env("PROCARGS_CONFIG_DIR", config_dir);
    cmd
}

#[test]
fn test_debug_logs_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();

    procargs(dir.path())
        .env("RUST_LOG", "procargs=debug")
        .args(["-c", "prog a"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("argc=2\n"))
        .stderr(predicate::str::contains("Writing report"));
}

#[test]
fn test_json_log_format() {
    let dir = tempfile::tempdir().unwrap();

    procargs(dir.path())
        .env("RUST_LOG", "procargs=debug")
        .args(["--log-format", "json", "-c", "prog a"])
        .assert()
        .success()
        .stderr(predicate::str::contains(r#""message":"Writing report""#));
}

#[test]
fn test_default_log_format_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[defaults]\noptions = [\"--log-format\", \"json\"]\n",
    )
    .unwrap();

    procargs(dir.path())
        .env("RUST_LOG", "procargs=debug")
        .args(["-c", "prog a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("argv[1]=a"))
        .stderr(predicate::str::contains(r#""message":"Default options applied""#));
}
