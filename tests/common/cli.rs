#![allow(dead_code)]

use assert_cmd::Command;
use std::ffi::OsStr;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug)]
pub struct TrackingRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

/// Isolated working directory with its own `HOME`.
pub struct TrackingWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TrackingWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join("tracking.db")
    }
}

pub fn command(workspace: &TrackingWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("tracking").expect("tracking binary");
    cmd.current_dir(&workspace.root)
        .env("HOME", &workspace.root)
        .env("RUST_LOG", "warn");
    for (key, _) in std::env::vars() {
        if key.starts_with("TRACKING_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

pub fn run_tracking<I, S>(workspace: &TrackingWorkspace, args: I) -> TrackingRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_tracking_with_env(workspace, args, std::iter::empty::<(String, String)>())
}

pub fn run_tracking_with_env<I, S, E, K, V>(
    workspace: &TrackingWorkspace,
    args: I,
    env_vars: E,
) -> TrackingRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = command(workspace);
    cmd.args(args);
    for (key, value) in env_vars {
        cmd.env(key, value);
    }
    let output = cmd.output().expect("run tracking");
    TrackingRun {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: output.status,
    }
}
