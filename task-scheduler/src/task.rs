/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the schedule compiler.
//!
//! Two distinct types model the two sides of the pipeline:
//!
//! ```text
//! ConfigSource ──►  Task  ──(validate)──►  ValidatedTask  ──(compile)──►  ScheduleLine
//!                    ↑ raw fields            ↑ normalised, total input
//!                    as configured             for the compiler
//! ```
//!
//! `Task` is a faithful copy of what the configuration says, including invalid
//! combinations.  `ValidatedTask` can only be produced by
//! [`validate`](crate::validate::validate) and cannot represent an invalid
//! task, so the compiler needs no error path.

use std::fmt;

use crate::interval::ParsedInterval;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Account every generated cron line runs as.
pub const DEFAULT_USER: &str = "root";

/// Group the `sg` privilege-switch wrapper executes the command under.
pub const PRIVILEGE_GROUP: &str = "vyattacfg";

// ── Task (input) ──────────────────────────────────────────────────────────────

/// One scheduled job exactly as declared by configuration.
///
/// Empty strings never appear in the optional fields: configuration sources
/// normalise "empty" to `None` (see [`Task::non_empty`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique task name (uniqueness is owned by the configuration store).
    pub name: String,

    /// Compact interval expression, e.g. `"30"`, `"4h"`, `"2d"`.
    pub interval: Option<String>,

    /// Raw cron time fields (`crontab-spec`), passed through as-is.
    pub spec: Option<String>,

    /// Absolute path of the program to run.  Empty means "not configured".
    pub executable: String,

    /// Argument string appended verbatim after the executable.
    pub args: Option<String>,

    /// Execution identity written into the cron line.
    pub user: String,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            name: String::new(),
            interval: None,
            spec: None,
            executable: String::new(),
            args: None,
            user: DEFAULT_USER.to_string(),
        }
    }
}

impl Task {
    /// Creates an empty task called `name`, running as [`DEFAULT_USER`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Collapse empty strings to `None`.
    pub fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }
}

// ── Invocation ────────────────────────────────────────────────────────────────

/// The command a cron line runs, wrapped in `sg <group> "<command>"`.
///
/// All quoting for the generated line lives in [`Invocation::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub executable: String,
    pub args: Option<String>,
    pub group: String,
}

impl Invocation {
    pub fn new(executable: impl Into<String>, args: Option<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Task::non_empty(args),
            group: PRIVILEGE_GROUP.to_string(),
        }
    }

    /// The command line run inside the wrapper: `"<executable>[ <args>]"`.
    pub fn command_line(&self) -> String {
        match &self.args {
            Some(args) => format!("{} {}", self.executable, args),
            None => self.executable.clone(),
        }
    }

    /// Render the complete wrapped invocation for a cron line.
    ///
    /// Inside the double quotes, `\` and `"` are backslash-escaped for the
    /// shell and `%` is escaped for cron, which otherwise turns it into a
    /// newline.
    pub fn render(&self) -> String {
        format!("sg {} \"{}\"", self.group, escape_quoted(&self.command_line()))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn escape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '%') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ── ValidatedTask (output of validation) ──────────────────────────────────────

/// When a validated task fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Evenly spaced repetition derived from an interval expression.
    Every(ParsedInterval),
    /// Pre-formatted cron time fields, emitted unmodified.
    Raw(String),
}

/// A task that passed every validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTask {
    pub name: String,
    pub trigger: Trigger,
    pub user: String,
    pub invocation: Invocation,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
