//! End-to-end tests for the `tracking` binary.

mod common;

use common::cli::{TrackingWorkspace, command, run_tracking, run_tracking_with_env};
use predicates::prelude::*;
use std::fs;

#[test]
fn version_flag_prints_name() {
    let workspace = TrackingWorkspace::new();
    command(&workspace)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tracking "));
}

#[test]
fn help_lists_subcommands() {
    let workspace = TrackingWorkspace::new();
    command(&workspace)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn init_creates_default_database() {
    let workspace = TrackingWorkspace::new();
    let run = run_tracking(&workspace, ["init"]);
    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stdout.contains("Initialized tracking database"));
    assert!(workspace.db_path().is_file());
}

#[test]
fn init_twice_fails_without_force() {
    let workspace = TrackingWorkspace::new();
    assert!(run_tracking(&workspace, ["init"]).status.success());

    let run = run_tracking(&workspace, ["--json", "init"]);
    assert_eq!(run.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_str(&run.stderr).expect("json error");
    assert_eq!(json["error"]["code"], "ALREADY_INITIALIZED");

    let run = run_tracking(&workspace, ["init", "--force"]);
    assert!(run.status.success(), "stderr: {}", run.stderr);
}

#[test]
fn init_honours_db_flag() {
    let workspace = TrackingWorkspace::new();
    let custom = workspace.root.join("nested").join("custom.db");
    let run = run_tracking(
        &workspace,
        ["--db", custom.to_str().unwrap(), "--json", "init"],
    );
    assert!(run.status.success(), "stderr: {}", run.stderr);
    let json: serde_json::Value = serde_json::from_str(&run.stdout).expect("json output");
    assert_eq!(json["initialized"], true);
    assert!(custom.is_file());
}

#[test]
fn config_precedence_cli_over_env_over_file() {
    let workspace = TrackingWorkspace::new();
    fs::write(
        workspace.root.join("tracking.yaml"),
        "bind: 127.0.0.1:7000\ndb: from-file.db\nlock_timeout: 10\n",
    )
    .unwrap();

    let run = run_tracking(&workspace, ["--json", "config"]);
    assert!(run.status.success(), "stderr: {}", run.stderr);
    let json: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
    assert_eq!(json["bind"], "127.0.0.1:7000");
    assert_eq!(json["db_path"], "from-file.db");
    assert_eq!(json["lock_timeout_ms"], 10);

    let run = run_tracking_with_env(
        &workspace,
        ["--json", "--lock-timeout", "30", "config"],
        [("TRACKING_DB", "from-env.db"), ("TRACKING_LOCK_TIMEOUT", "20")],
    );
    let json: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
    assert_eq!(json["db_path"], "from-env.db");
    assert_eq!(json["lock_timeout_ms"], 30);
}

#[test]
fn missing_explicit_config_is_config_error() {
    let workspace = TrackingWorkspace::new();
    let run = run_tracking(&workspace, ["--json", "--config", "absent.yaml", "config"]);
    assert_eq!(run.status.code(), Some(7));
    assert!(run.stderr.contains("CONFIG_ERROR"));
}

#[test]
fn invalid_env_bind_is_reported() {
    let workspace = TrackingWorkspace::new();
    let run = run_tracking_with_env(
        &workspace,
        ["--json", "config"],
        [("TRACKING_BIND", "not-an-address")],
    );
    assert_eq!(run.status.code(), Some(7));
    assert!(run.stderr.contains("invalid bind address"));
}
