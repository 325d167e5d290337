/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! task-scheduler – declarative cron compiler
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── config/      – task configuration sources (YAML file, in-memory)
//! ├── interval     – "<n>[m|h|d]" parsing and unit ceilings
//! ├── task         – Task / ValidatedTask / Invocation
//! ├── validate/    – validation rules and ConfigError
//! ├── compiler     – ValidatedTask → cron line
//! ├── writer       – schedule file reconciliation
//! └── pipeline     – fetch → validate → compile → write
//! ```

pub mod compiler;
pub mod config;
pub mod interval;
pub mod pipeline;
pub mod task;
pub mod validate;
pub mod writer;
