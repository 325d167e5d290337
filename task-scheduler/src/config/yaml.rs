/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! YAML task configuration.
//!
//! The expected YAML structure is:
//! ```yaml
//! tasks:
//!   backup:
//!     interval: "30"
//!     executable:
//!       path: /usr/local/bin/backup
//!       arguments: "--full /srv"
//!   report:
//!     crontab-spec: "0 3 * * 1-5"
//!     executable:
//!       path: /usr/local/bin/report
//! ```
//!
//! Task names are yielded in sorted order, the same order the configuration
//! tree lists its nodes in, so the generated file is stable across runs.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use super::{ConfigSource, TaskField};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Default, Deserialize)]
struct TaskConfigFile {
    #[serde(default)]
    tasks: Option<BTreeMap<String, Option<TaskEntry>>>,
}

/// Per-task leaves as they appear in the YAML file.  Every field is optional;
/// missing ones are reported as "not set" and left to validation.
///
/// Leaves are read as `String`, so an unquoted scalar keeps its exact source
/// text (`0x1F` stays `0x1F`, `+5` stays `+5`) and validation sees what the
/// operator wrote.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TaskEntry {
    interval: Option<String>,
    crontab_spec: Option<String>,
    executable: Option<ExecutableEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct ExecutableEntry {
    path: Option<String>,
    arguments: Option<String>,
}

// ── YamlConfigSource ──────────────────────────────────────────────────────────

/// Task configuration loaded from a YAML file.
#[derive(Debug, Default)]
pub struct YamlConfigSource {
    /// task name → leaf values, sorted by name.
    tasks: BTreeMap<String, BTreeMap<TaskField, String>>,
}

impl YamlConfigSource {
    /// Parses `path` into a configuration source.
    ///
    /// A file with no `tasks` section, or an empty one, is valid and yields
    /// no tasks.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or if the YAML is
    /// structurally invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading task configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))
    }

    /// Parses YAML text directly.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // serde_yaml rejects a completely empty document; treat it as "no tasks".
        let file: TaskConfigFile = if content.trim().is_empty() {
            TaskConfigFile::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let mut tasks = BTreeMap::new();
        for (name, entry) in file.tasks.unwrap_or_default() {
            let entry = entry.unwrap_or_default();
            let mut values = BTreeMap::new();

            let exe = entry.executable.unwrap_or_default();
            let leaves = [
                (TaskField::Interval, entry.interval),
                (TaskField::CrontabSpec, entry.crontab_spec),
                (TaskField::ExecutablePath, exe.path),
                (TaskField::ExecutableArguments, exe.arguments),
            ];
            for (field, value) in leaves {
                if let Some(value) = value {
                    values.insert(field, value);
                }
            }

            debug!("  Task: {} | {:?}", name, values);
            tasks.insert(name, values);
        }

        info!("Loaded {} task definition(s)", tasks.len());
        Ok(Self { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl ConfigSource for YamlConfigSource {
    fn task_names(&self) -> Result<Vec<String>> {
        Ok(self.tasks.keys().cloned().collect())
    }

    fn value(&self, task: &str, field: TaskField) -> Result<Option<String>> {
        Ok(self.tasks.get(task).and_then(|v| v.get(&field)).cloned())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
