/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for task validation.
//!
//! Every failure is the same kind of error, a [`ConfigError`], which names the
//! offending task and carries a [`Violation`] describing the broken rule.
//! The `Display` output is the single line shown to the operator.

use thiserror::Error;

use crate::interval::IntervalUnit;

// ── Violation ─────────────────────────────────────────────────────────────────

/// The rule a task broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Neither `interval` nor `crontab-spec` is set.
    MissingTrigger,

    /// Both `interval` and `crontab-spec` are set.
    ConflictingTrigger,

    /// `interval` does not match `<integer>[m|h|d]`.
    MalformedInterval { interval: String },

    /// The interval magnitude is zero or above the unit's ceiling.
    IntervalOutOfRange { unit: IntervalUnit, max: u32 },

    /// No executable path is configured.
    MissingExecutable,

    /// The executable path is not an existing, executable regular file.
    NotExecutable { path: String },
}

impl Violation {
    /// Short machine-friendly name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::MissingTrigger | Violation::ConflictingTrigger => "exclusivity",
            Violation::MalformedInterval { .. } => "format",
            Violation::IntervalOutOfRange { .. } => "range",
            Violation::MissingExecutable => "missing_executable",
            Violation::NotExecutable { .. } => "unexecutable",
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::MissingTrigger => {
                write!(f, "must define either interval or crontab-spec")
            }

            Violation::ConflictingTrigger => {
                write!(f, "cannot use interval and crontab-spec at the same time")
            }

            Violation::MalformedInterval { interval } => write!(
                f,
                "invalid interval '{}': interval should be a number optionally followed by m, h, or d",
                interval
            ),

            Violation::IntervalOutOfRange { unit, max } => write!(
                f,
                "interval in {} must be between 1 and {}",
                unit, max
            ),

            Violation::MissingExecutable => write!(f, "executable is not defined"),

            Violation::NotExecutable { path } => {
                write!(f, "file {} does not exist or is not executable", path)
            }
        }
    }
}

// ── ConfigError ───────────────────────────────────────────────────────────────

/// The first validation failure found in a task list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid task {task}: {violation}")]
pub struct ConfigError {
    pub task: String,
    pub violation: Violation,
}

impl ConfigError {
    pub fn new(task: impl Into<String>, violation: Violation) -> Self {
        Self {
            task: task.into(),
            violation,
        }
    }
}
