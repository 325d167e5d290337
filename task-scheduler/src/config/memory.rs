/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! In-memory configuration tree.
//!
//! Tasks keep their insertion order, which lets tests drive the pipeline with
//! orderings a sorted store would never produce.

use std::collections::HashMap;

use anyhow::Result;

use super::{ConfigSource, TaskField};

/// An ordered list of tasks with their leaf values.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigSource {
    tasks: Vec<(String, HashMap<TaskField, String>)>,
}

impl MemoryConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task.  A name that is already present has its values
    /// replaced in place.
    pub fn with_task(mut self, name: &str, values: &[(TaskField, &str)]) -> Self {
        let values: HashMap<_, _> = values
            .iter()
            .map(|(field, value)| (*field, value.to_string()))
            .collect();

        match self.tasks.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = values,
            None => self.tasks.push((name.to_string(), values)),
        }
        self
    }
}

impl ConfigSource for MemoryConfigSource {
    fn task_names(&self) -> Result<Vec<String>> {
        Ok(self.tasks.iter().map(|(name, _)| name.clone()).collect())
    }

    fn value(&self, task: &str, field: TaskField) -> Result<Option<String>> {
        Ok(self
            .tasks
            .iter()
            .find(|(name, _)| name == task)
            .and_then(|(_, values)| values.get(&field).cloned()))
    }
}
