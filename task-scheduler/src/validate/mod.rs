//! Task validation.
//!
//! [`validate`] walks the task list in order and stops at the first broken
//! rule.  Per task the rules are checked in a fixed order, first failure wins:
//!
//! | # | Rule | Violation |
//! |---|---|---|
//! | 1 | exactly one of `interval` / `crontab-spec` | `MissingTrigger` / `ConflictingTrigger` |
//! | 2 | `interval` matches `^\d+[mhd]?$` | `MalformedInterval` |
//! | 3 | `1 ≤ magnitude ≤ ceiling(unit)` | `IntervalOutOfRange` |
//! | 4 | `executable` is set | `MissingExecutable` |
//! | 5 | `executable` is an executable regular file | `NotExecutable` |
//!
//! Rule 5 checks the filesystem at validation time only.  The file may change
//! before cron runs it; the check is best-effort, not a guarantee.

pub mod error;

pub use error::{ConfigError, Violation};

use std::path::Path;

use tracing::{debug, info};

use crate::interval::{is_well_formed, ParsedInterval};
use crate::task::{Invocation, Task, Trigger, ValidatedTask};

/// Validate every task, returning them normalised in input order.
///
/// # Errors
/// Returns the [`ConfigError`] for the first task that breaks a rule.  No
/// later task is inspected.
pub fn validate(tasks: &[Task]) -> Result<Vec<ValidatedTask>, ConfigError> {
    info!(task_count = tasks.len(), "Validating tasks");

    tasks
        .iter()
        .map(|task| {
            let validated = validate_task(task)?;
            debug!(task = %task.name, trigger = ?validated.trigger, "task valid");
            Ok(validated)
        })
        .collect()
}

/// Validate a single task.
pub fn validate_task(task: &Task) -> Result<ValidatedTask, ConfigError> {
    let fail = |violation: Violation| ConfigError::new(&task.name, violation);

    let trigger = match (&task.interval, &task.spec) {
        (None, None) => return Err(fail(Violation::MissingTrigger)),
        (Some(_), Some(_)) => return Err(fail(Violation::ConflictingTrigger)),
        (Some(interval), None) => Trigger::Every(check_interval(interval).map_err(fail)?),
        (None, Some(spec)) => Trigger::Raw(spec.clone()),
    };

    if task.executable.is_empty() {
        return Err(fail(Violation::MissingExecutable));
    }
    if !is_executable_file(Path::new(&task.executable)) {
        return Err(fail(Violation::NotExecutable {
            path: task.executable.clone(),
        }));
    }

    Ok(ValidatedTask {
        name: task.name.clone(),
        trigger,
        user: task.user.clone(),
        invocation: Invocation::new(&task.executable, task.args.clone()),
    })
}

fn check_interval(interval: &str) -> Result<ParsedInterval, Violation> {
    if !is_well_formed(interval) {
        return Err(Violation::MalformedInterval {
            interval: interval.to_string(),
        });
    }

    let parsed = ParsedInterval::parse(interval);
    if !parsed.in_range() {
        return Err(Violation::IntervalOutOfRange {
            unit: parsed.unit,
            max: parsed.unit.ceiling(),
        });
    }
    Ok(parsed)
}

/// `true` if `path` is a regular file (after following symlinks) that the
/// calling user may execute, as decided by `access(2)` with `X_OK`.
///
/// The answer depends on who runs the compiler: a non-root caller is refused
/// a file whose only execute bits belong to another owner or group.
#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};

    let is_file = std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    is_file && access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
