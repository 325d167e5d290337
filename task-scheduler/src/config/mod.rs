//! Task configuration retrieval.
//!
//! The compiler only needs a read view of the configuration tree: the ordered
//! list of task names under `system task-scheduler task`, and a handful of
//! string leaves per task.  [`ConfigSource`] is that view; [`fetch_tasks`]
//! turns it into [`Task`] records.
//!
//! Two sources are provided:
//!
//! * [`YamlConfigSource`] – the on-disk task file used by the binary.
//! * [`MemoryConfigSource`] – an ordered in-memory tree for tests and
//!   embedders.

pub mod memory;
pub mod yaml;

pub use memory::MemoryConfigSource;
pub use yaml::YamlConfigSource;

use std::fmt;

use anyhow::Result;
use tracing::debug;

use crate::task::Task;

// ── TaskField ─────────────────────────────────────────────────────────────────

/// The leaves read for every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskField {
    Interval,
    CrontabSpec,
    ExecutablePath,
    ExecutableArguments,
}

impl TaskField {
    /// Path of the leaf relative to the task node.
    pub fn path(self) -> &'static str {
        match self {
            TaskField::Interval => "interval",
            TaskField::CrontabSpec => "crontab-spec",
            TaskField::ExecutablePath => "executable path",
            TaskField::ExecutableArguments => "executable arguments",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ── ConfigSource ──────────────────────────────────────────────────────────────

/// Read-only view of the task configuration.
pub trait ConfigSource {
    /// Task names, in the order they should appear in the schedule file.
    fn task_names(&self) -> Result<Vec<String>>;

    /// Value of `field` for `task`, or `None` if the leaf is not set.
    fn value(&self, task: &str, field: TaskField) -> Result<Option<String>>;
}

/// Read every task from `source`.
///
/// Empty values are treated exactly like absent ones.
///
/// # Errors
/// Propagates any error reported by the source.
pub fn fetch_tasks(source: &dyn ConfigSource) -> Result<Vec<Task>> {
    let names = source.task_names()?;
    let mut tasks = Vec::with_capacity(names.len());

    for name in names {
        let get = |field| -> Result<Option<String>> {
            Ok(Task::non_empty(source.value(&name, field)?))
        };

        let task = Task {
            interval: get(TaskField::Interval)?,
            spec: get(TaskField::CrontabSpec)?,
            executable: get(TaskField::ExecutablePath)?.unwrap_or_default(),
            args: get(TaskField::ExecutableArguments)?,
            ..Task::new(name.as_str())
        };
        debug!(
            task = %task.name,
            interval = ?task.interval,
            spec = ?task.spec,
            executable = %task.executable,
            "fetched task"
        );
        tasks.push(task);
    }

    Ok(tasks)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
