//! Logging utilities for formatted stage output.
//!
//! Stage drivers use these helpers to report batch progress and timing in a
//! consistent shape across subcommands.

use std::time::{Duration, Instant};

use crate::jobs::{JobOutcome, JobStatus};

/// Formats a duration in human-readable form.
///
/// # Examples
///
/// ```
/// use primedx_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Logs each job outcome of a finished batch, failures at warn level with
/// their captured stderr, and returns the failure count.
pub fn log_batch_outcomes(stage: &str, outcomes: &[JobOutcome]) -> usize {
    let mut failed = 0;
    for outcome in outcomes {
        match &outcome.status {
            JobStatus::Success => {
                log::debug!("[{stage}] {}: ok ({})", outcome.label, outcome.command_line);
            }
            JobStatus::Failed { code, stderr } => {
                failed += 1;
                let code = code.map_or_else(|| "killed by signal".to_string(), |c| c.to_string());
                log::warn!(
                    "[{stage}] {}: exited {code} ({})",
                    outcome.label,
                    outcome.command_line
                );
                for line in stderr.lines() {
                    log::warn!("[{stage}] {}: stderr: {line}", outcome.label);
                }
            }
            JobStatus::NotStarted { error } => {
                failed += 1;
                log::warn!(
                    "[{stage}] {}: could not start ({}): {error}",
                    outcome.label,
                    outcome.command_line
                );
            }
        }
    }
    failed
}

/// Operation timing and summary helper.
///
/// # Examples
///
/// ```no_run
/// use primedx_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Running prodigal commands");
///
/// // ... do work ...
///
/// timer.log_completion(12); // Log with genome count
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with the number of genomes processed.
    pub fn log_completion(&self, count: usize) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {count} genome(s) in {}",
            self.operation,
            format_duration(duration)
        );
    }
}
