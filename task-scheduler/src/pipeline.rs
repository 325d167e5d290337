/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! End-to-end compilation run.
//!
//! ```text
//! ConfigSource ──► Fetched ──► Validated ──► Compiled ──► Written
//!                     │            │             │           │
//!                     └────────────┴─────────────┴───────────┴──► Failed
//! ```
//!
//! Every run starts from scratch and moves strictly forward.  Validation is
//! all-or-nothing: the first invalid task stops the run before the schedule
//! file is touched.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::compiler::{compile_all, ScheduleLine};
use crate::config::{fetch_tasks, ConfigSource};
use crate::task::ValidatedTask;
use crate::validate::{validate, ConfigError};
use crate::writer::{ScheduleWriter, WriteOutcome};

// ── Stage ─────────────────────────────────────────────────────────────────────

/// Progress markers of a run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Fetched,
    Validated,
    Compiled,
    Written,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Fetched => "fetched",
            Stage::Validated => "validated",
            Stage::Compiled => "compiled",
            Stage::Written => "written",
        };
        f.write_str(s)
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Why a run stopped.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The configuration could not be read.
    #[error("{0:#}")]
    Fetch(anyhow::Error),

    /// A task broke a validation rule.
    #[error(transparent)]
    Invalid(#[from] ConfigError),

    /// The schedule file could not be written or removed.
    #[error("{0:#}")]
    Write(anyhow::Error),
}

impl PipelineError {
    /// The last stage reached before the failure, `None` if nothing was
    /// fetched.
    pub fn reached(&self) -> Option<Stage> {
        match self {
            PipelineError::Fetch(_) => None,
            PipelineError::Invalid(_) => Some(Stage::Fetched),
            PipelineError::Write(_) => Some(Stage::Compiled),
        }
    }
}

// ── RunReport ─────────────────────────────────────────────────────────────────

/// Summary of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub tasks: usize,
    pub outcome: WriteOutcome,
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// One configuration source wired to one schedule file.
pub struct Pipeline<S> {
    source: S,
    writer: ScheduleWriter,
}

impl<S: ConfigSource> Pipeline<S> {
    pub fn new(source: S, writer: ScheduleWriter) -> Self {
        Self { source, writer }
    }

    pub fn writer(&self) -> &ScheduleWriter {
        &self.writer
    }

    /// Fetch and validate, without compiling or writing.
    pub fn verify(&self) -> Result<Vec<ValidatedTask>, PipelineError> {
        let tasks = fetch_tasks(&self.source).map_err(PipelineError::Fetch)?;
        debug!(stage = %Stage::Fetched, task_count = tasks.len());

        let validated = validate(&tasks)?;
        debug!(stage = %Stage::Validated, task_count = validated.len());
        Ok(validated)
    }

    /// Everything up to and including compilation.  Nothing is written.
    pub fn plan(&self) -> Result<Vec<ScheduleLine>, PipelineError> {
        let validated = self.verify()?;
        let lines = compile_all(&validated);
        debug!(stage = %Stage::Compiled, line_count = lines.len());
        Ok(lines)
    }

    /// Full run: fetch, validate, compile and reconcile the schedule file.
    ///
    /// # Errors
    /// See [`PipelineError`].  On [`PipelineError::Fetch`] and
    /// [`PipelineError::Invalid`] the schedule file is left untouched.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let lines = self.plan()?;
        let outcome = self
            .writer
            .reconcile(&lines)
            .map_err(PipelineError::Write)?;
        debug!(stage = %Stage::Written, ?outcome);

        info!(
            tasks = lines.len(),
            path = %self.writer.path().display(),
            "Task scheduler configuration applied"
        );
        Ok(RunReport {
            tasks: lines.len(),
            outcome,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::{MemoryConfigSource, TaskField, YamlConfigSource};
    use crate::validate::Violation;
    use crate::writer::HEADER;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Test helpers ──────────────────────────────────────────────────────────

    struct Env {
        dir: TempDir,
    }

    impl Env {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        /// Create an executable script and return its path.
        fn executable(&self, name: &str) -> String {
            let path = self.dir.path().join(name);
            fs::write(&path, "#!/bin/sh\n").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path.display().to_string()
        }

        fn crontab(&self) -> PathBuf {
            self.dir.path().join("vyos-crontab")
        }

        fn pipeline<S: ConfigSource>(&self, source: S) -> Pipeline<S> {
            Pipeline::new(source, ScheduleWriter::new(self.crontab()))
        }
    }

    // ── End-to-end scenarios ──────────────────────────────────────────────────

    #[test]
    fn single_interval_task_writes_header_and_line() {
        let env = Env::new();
        let exe = env.executable("true");
        let source = MemoryConfigSource::new().with_task(
            "backup",
            &[
                (TaskField::Interval, "30"),
                (TaskField::ExecutablePath, exe.as_str()),
                (TaskField::ExecutableArguments, ""),
            ],
        );

        let report = env.pipeline(source).run().unwrap();
        assert_eq!(report.tasks, 1);
        assert_eq!(report.outcome, WriteOutcome::Written { lines: 1 });

        let body = fs::read_to_string(env.crontab()).unwrap();
        assert_eq!(
            body,
            format!("{HEADER}*/30 * * * * root sg vyattacfg \"{exe}\"\n")
        );
    }

    #[test]
    fn out_of_range_task_fails_and_leaves_file_untouched() {
        let env = Env::new();
        let exe = env.executable("true");
        fs::write(env.crontab(), "previous contents\n").unwrap();

        let source = MemoryConfigSource::new().with_task(
            "bad",
            &[(TaskField::Interval, "90"), (TaskField::ExecutablePath, exe.as_str())],
        );

        let err = env.pipeline(source).run().unwrap_err();
        match &err {
            PipelineError::Invalid(e) => {
                assert_eq!(e.task, "bad");
                assert!(matches!(e.violation, Violation::IntervalOutOfRange { .. }));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(err.to_string().contains("bad"));
        assert_eq!(err.reached(), Some(Stage::Fetched));
        assert_eq!(
            fs::read_to_string(env.crontab()).unwrap(),
            "previous contents\n"
        );
    }

    #[test]
    fn one_invalid_task_blocks_all_valid_ones() {
        let env = Env::new();
        let exe = env.executable("job");
        let source = MemoryConfigSource::new()
            .with_task(
                "good",
                &[(TaskField::Interval, "5"), (TaskField::ExecutablePath, exe.as_str())],
            )
            .with_task("broken", &[(TaskField::ExecutablePath, exe.as_str())]);

        assert!(env.pipeline(source).run().is_err());
        assert!(!env.crontab().exists());
    }

    #[test]
    fn empty_configuration_removes_schedule_file() {
        let env = Env::new();
        fs::write(env.crontab(), HEADER).unwrap();

        let report = env.pipeline(MemoryConfigSource::new()).run().unwrap();
        assert_eq!(report.outcome, WriteOutcome::Removed);
        assert!(!env.crontab().exists());

        let again = env.pipeline(MemoryConfigSource::new()).run().unwrap();
        assert_eq!(again.outcome, WriteOutcome::AlreadyAbsent);
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let env = Env::new();
        let exe = env.executable("job");
        let yaml = format!(
            "tasks:\n  a:\n    interval: 4h\n    executable:\n      path: {exe}\n  \
             b:\n    crontab-spec: \"0 3 * * 1-5\"\n    executable:\n      path: {exe}\n      arguments: --weekday\n"
        );

        let run = || {
            let source = YamlConfigSource::from_yaml_str(&yaml).unwrap();
            env.pipeline(source).run().unwrap();
            fs::read(env.crontab()).unwrap()
        };

        let first = run();
        let second = run();
        assert_eq!(first, second);

        let text = String::from_utf8(first).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0 */4 * * * root "));
        assert!(lines[2].starts_with("0 3 * * 1-5 root "));
        assert!(lines[2].ends_with("--weekday\""));
    }

    #[test]
    fn output_follows_source_order() {
        let env = Env::new();
        let exe = env.executable("job");
        let source = MemoryConfigSource::new()
            .with_task(
                "zz",
                &[(TaskField::Interval, "2d"), (TaskField::ExecutablePath, exe.as_str())],
            )
            .with_task(
                "aa",
                &[(TaskField::Interval, "15"), (TaskField::ExecutablePath, exe.as_str())],
            );

        let lines = env.pipeline(source).plan().unwrap();
        assert_eq!(lines[0].task, "zz");
        assert_eq!(lines[1].task, "aa");
        assert!(!env.crontab().exists(), "plan must not write");
    }

    #[test]
    fn verify_does_not_write() {
        let env = Env::new();
        let exe = env.executable("job");
        let source = MemoryConfigSource::new().with_task(
            "t",
            &[(TaskField::Interval, "1"), (TaskField::ExecutablePath, exe.as_str())],
        );

        let validated = env.pipeline(source).verify().unwrap();
        assert_eq!(validated.len(), 1);
        assert!(!env.crontab().exists());
    }

    #[test]
    fn write_failure_is_reported_after_compilation() {
        let env = Env::new();
        let exe = env.executable("job");
        let source = MemoryConfigSource::new().with_task(
            "t",
            &[(TaskField::Interval, "1"), (TaskField::ExecutablePath, exe.as_str())],
        );
        let writer = ScheduleWriter::new(env.dir.path().join("no-such-dir").join("crontab"));

        let err = Pipeline::new(source, writer).run().unwrap_err();
        assert!(matches!(err, PipelineError::Write(_)));
        assert_eq!(err.reached(), Some(Stage::Compiled));
    }
}
