/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Validated task → cron line.
//!
//! An interval of `N` units expands to an evenly spaced schedule anchored at
//! the top of the next larger unit:
//!
//! | unit   | minute | hour  | day   | month | dow |
//! |--------|--------|-------|-------|-------|-----|
//! | minute | `*/N`  | `*`   | `*`   | `*`   | `*` |
//! | hour   | `0`    | `*/N` | `*`   | `*`   | `*` |
//! | day    | `0`    | `0`   | `*/N` | `*`   | `*` |
//!
//! A raw `crontab-spec` is written verbatim in place of the five fields.

use std::fmt;

use tracing::debug;

use crate::interval::{IntervalUnit, ParsedInterval};
use crate::task::{Trigger, ValidatedTask};

// ── ScheduleFields ────────────────────────────────────────────────────────────

/// The five time fields of a cron line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleFields {
    pub minute: String,
    pub hour: String,
    pub day_of_month: String,
    pub month: String,
    pub day_of_week: String,
}

impl ScheduleFields {
    /// Expand an interval into cron fields.
    pub fn from_interval(interval: ParsedInterval) -> Self {
        let step = format!("*/{}", interval.magnitude);
        let (minute, hour, day_of_month) = match interval.unit {
            IntervalUnit::Minute => (step, "*".into(), "*".into()),
            IntervalUnit::Hour => ("0".into(), step, "*".into()),
            IntervalUnit::Day => ("0".into(), "0".into(), step),
        };

        Self {
            minute,
            hour,
            day_of_month,
            month: "*".into(),
            day_of_week: "*".into(),
        }
    }
}

impl fmt::Display for ScheduleFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week
        )
    }
}

// ── ScheduleLine ──────────────────────────────────────────────────────────────

/// Time part of a line: expanded fields or a verbatim user spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum When {
    Fields(ScheduleFields),
    Raw(String),
}

impl fmt::Display for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            When::Fields(fields) => write!(f, "{fields}"),
            When::Raw(spec) => f.write_str(spec),
        }
    }
}

/// One line of the generated cron file.
///
/// `Display` renders `"<when> <user> <invocation>\n"`, newline included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleLine {
    pub task: String,
    pub when: When,
    pub user: String,
    pub command: String,
}

impl fmt::Display for ScheduleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.when, self.user, self.command)
    }
}

// ── Compilation ───────────────────────────────────────────────────────────────

/// Compile one validated task.  Never fails.
pub fn compile(task: &ValidatedTask) -> ScheduleLine {
    let when = match &task.trigger {
        Trigger::Every(interval) => When::Fields(ScheduleFields::from_interval(*interval)),
        Trigger::Raw(spec) => When::Raw(spec.clone()),
    };

    let line = ScheduleLine {
        task: task.name.clone(),
        when,
        user: task.user.clone(),
        command: task.invocation.render(),
    };
    debug!(task = %task.name, line = %line.to_string().trim_end(), "compiled");
    line
}

/// Compile every task, preserving order.
pub fn compile_all(tasks: &[ValidatedTask]) -> Vec<ScheduleLine> {
    tasks.iter().map(compile).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
