/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule file reconciliation.
//!
//! The file on disk always mirrors the current configuration exactly:
//!
//! * no lines → the file is removed (a missing file is fine),
//! * otherwise → the file is truncated and rewritten as header + lines.
//!
//! There is no lock and no temp-file rename.  A crash mid-write can leave a
//! truncated file; the next successful run replaces it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::compiler::ScheduleLine;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default location of the generated cron file.
pub const DEFAULT_SCHEDULE_PATH: &str = "/etc/cron.d/vyos-crontab";

/// First line of every generated file.
pub const HEADER: &str = concat!("### Generated by ", env!("CARGO_PKG_NAME"), " ###\n");

// ── WriteOutcome ──────────────────────────────────────────────────────────────

/// What [`ScheduleWriter::reconcile`] did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was (re)written with this many task lines.
    Written { lines: usize },
    /// The task list was empty and an existing file was deleted.
    Removed,
    /// The task list was empty and there was no file to delete.
    AlreadyAbsent,
}

// ── ScheduleWriter ────────────────────────────────────────────────────────────

/// Owns the path of the schedule file and keeps it in sync with compiled
/// lines.
#[derive(Debug, Clone)]
pub struct ScheduleWriter {
    path: PathBuf,
}

impl Default for ScheduleWriter {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEDULE_PATH)
    }
}

impl ScheduleWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full file contents for `lines`: header followed by each line in order.
    ///
    /// Returns an empty string for an empty slice, which is the "no file"
    /// state.
    pub fn render(lines: &[ScheduleLine]) -> String {
        if lines.is_empty() {
            return String::new();
        }
        let mut out = String::from(HEADER);
        for line in lines {
            out.push_str(&line.to_string());
        }
        out
    }

    /// Make the file on disk match `lines`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written or removed.
    pub fn reconcile(&self, lines: &[ScheduleLine]) -> Result<WriteOutcome> {
        if lines.is_empty() {
            return self.remove();
        }

        let contents = Self::render(lines);
        std::fs::write(&self.path, contents.as_bytes())
            .with_context(|| format!("Cannot write schedule file: {}", self.path.display()))?;

        info!(
            path = %self.path.display(),
            lines = lines.len(),
            "Schedule file written"
        );
        Ok(WriteOutcome::Written { lines: lines.len() })
    }

    fn remove(&self) -> Result<WriteOutcome> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "No tasks configured, schedule file removed");
                Ok(WriteOutcome::Removed)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No tasks configured and no schedule file present");
                Ok(WriteOutcome::AlreadyAbsent)
            }
            Err(e) => Err(e).with_context(|| {
                format!("Cannot remove schedule file: {}", self.path.display())
            }),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
