/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, info};

use task_scheduler::config::YamlConfigSource;
use task_scheduler::pipeline::{Pipeline, PipelineError};
use task_scheduler::writer::{ScheduleWriter, DEFAULT_SCHEDULE_PATH};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Compile configured tasks into a cron.d schedule file.
///
/// Example:
///   task-scheduler -c /config/tasks.yaml -o /etc/cron.d/vyos-crontab
#[derive(Debug, Parser)]
#[command(
    name = "task-scheduler",
    about = "Compile configured scheduled tasks into a cron.d file",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML task configuration file.
    #[arg(short = 'c', long = "config")]
    config: PathBuf,

    /// Schedule file to write (removed when no tasks are configured).
    #[arg(short = 'o', long = "output", default_value = DEFAULT_SCHEDULE_PATH)]
    output: PathBuf,

    /// Validate the configuration and exit without touching the schedule file.
    #[arg(long = "verify-only", default_value_t = false, conflicts_with = "dry_run")]
    verify_only: bool,

    /// Print the schedule file that would be written instead of writing it.
    #[arg(long = "dry-run", default_value_t = false)]
    dry_run: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Logs go to stderr and stay quiet unless RUST_LOG asks for more, so a
    // successful run prints nothing.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        config      = %cli.config.display(),
        output      = %cli.output.display(),
        verify_only = cli.verify_only,
        dry_run     = cli.dry_run,
        "Configuration"
    );

    if let Err(e) = run(&cli) {
        debug!(stage = ?e.reached(), "run failed");
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let source = YamlConfigSource::load_from_file(&cli.config).map_err(PipelineError::Fetch)?;
    let pipeline = Pipeline::new(source, ScheduleWriter::new(&cli.output));

    if cli.verify_only {
        pipeline.verify()?;
        return Ok(());
    }

    if cli.dry_run {
        let lines = pipeline.plan()?;
        let rendered = ScheduleWriter::render(&lines);
        std::io::stdout()
            .write_all(rendered.as_bytes())
            .map_err(|e| PipelineError::Write(e.into()))?;
        return Ok(());
    }

    let report = pipeline.run()?;
    debug!(
        tasks = report.tasks,
        outcome = ?report.outcome,
        path = %pipeline.writer().path().display(),
        "done"
    );
    Ok(())
}
