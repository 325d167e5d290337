/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Black-box tests of the `task-scheduler` binary: exit status, output
//! streams and the resulting schedule file.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn executable(&self) -> PathBuf {
        let path = self.dir.path().join("job.sh");
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn config(&self, yaml: &str) -> PathBuf {
        let path = self.dir.path().join("tasks.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    fn crontab(&self) -> PathBuf {
        self.dir.path().join("vyos-crontab")
    }

    // `Command::cargo_bin` is deprecated in newer assert_cmd releases.
    #[allow(deprecated)]
    fn cmd(&self, config: &Path) -> Command {
        let mut cmd = Command::cargo_bin("task-scheduler").unwrap();
        cmd.env_remove("RUST_LOG")
            .arg("--config")
            .arg(config)
            .arg("--output")
            .arg(self.crontab());
        cmd
    }
}

fn interval_task(name: &str, interval: &str, exe: &Path) -> String {
    format!(
        "tasks:\n  {name}:\n    interval: \"{interval}\"\n    executable:\n      path: {}\n",
        exe.display()
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn success_is_silent_and_writes_file() {
    let ws = Workspace::new();
    let exe = ws.executable();
    let config = ws.config(&interval_task("backup", "30", &exe));

    ws.cmd(&config)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    let body = fs::read_to_string(ws.crontab()).unwrap();
    assert_eq!(
        body,
        format!(
            "### Generated by task-scheduler ###\n*/30 * * * * root sg vyattacfg \"{}\"\n",
            exe.display()
        )
    );
}

#[test]
fn validation_failure_exits_non_zero_with_message() {
    let ws = Workspace::new();
    let exe = ws.executable();
    let config = ws.config(&interval_task("bad", "90", &exe));

    ws.cmd(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid task bad"))
        .stderr(predicate::str::contains("minutes"));

    assert!(!ws.crontab().exists());
}

#[test]
fn empty_configuration_removes_file() {
    let ws = Workspace::new();
    fs::write(ws.crontab(), "stale\n").unwrap();
    let config = ws.config("tasks: {}\n");

    ws.cmd(&config).assert().success();
    assert!(!ws.crontab().exists());
}

#[test]
fn dry_run_prints_instead_of_writing() {
    let ws = Workspace::new();
    let exe = ws.executable();
    let config = ws.config(&interval_task("hourly", "4h", &exe));

    ws.cmd(&config)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("### Generated by task-scheduler ###\n"))
        .stdout(predicate::str::contains("0 */4 * * * root sg vyattacfg"));

    assert!(!ws.crontab().exists());
}

#[test]
fn verify_only_leaves_file_alone() {
    let ws = Workspace::new();
    let exe = ws.executable();
    fs::write(ws.crontab(), "untouched\n").unwrap();
    let config = ws.config(&interval_task("daily", "1d", &exe));

    ws.cmd(&config).arg("--verify-only").assert().success();
    assert_eq!(fs::read_to_string(ws.crontab()).unwrap(), "untouched\n");
}

#[test]
fn missing_config_file_fails() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("absent.yaml");

    ws.cmd(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot open configuration file"));
}
