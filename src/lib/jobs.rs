//! External command construction and parallel execution.
//!
//! Stages build one [`ToolCommand`] per genome and hand the batch to
//! [`run_jobs`], which executes them on a bounded rayon pool. Commands in a
//! batch are independent: a failure never cancels its siblings, and the
//! call returns only after every command has terminated, giving the caller
//! a hard barrier between the execute and parse phases of a stage.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rayon::prelude::*;

use crate::errors::{PrimedxError, Result};

/// An external command: program plus arguments, built deterministically so
/// identical inputs always yield byte-identical command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    /// Start a command for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        ToolCommand { program: program.into(), args: Vec::new() }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a flag and its value.
    pub fn option(self, flag: &str, value: impl fmt::Display) -> Self {
        self.arg(flag).arg(value.to_string())
    }

    /// The program being invoked.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render the command line for logging and the audit trail.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Run the command to completion, capturing stdout/stderr.
    fn execute(&self) -> std::io::Result<std::process::Output> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// One schedulable unit: a command labelled with the genome it belongs to.
#[derive(Debug, Clone)]
pub struct Job {
    /// Genome name, for per-job failure reporting
    pub label: String,
    /// The command to execute
    pub command: ToolCommand,
}

impl Job {
    pub fn new(label: impl Into<String>, command: ToolCommand) -> Self {
        Job { label: label.into(), command }
    }
}

/// How one job ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Zero exit status
    Success,
    /// Started but exited non-zero
    Failed {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured stderr
        stderr: String,
    },
    /// The process could not be started at all
    NotStarted {
        /// The spawn error
        error: String,
    },
}

/// Outcome of one job, returned in batch order.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// The job's label (genome name)
    pub label: String,
    /// The command line that was run
    pub command_line: String,
    /// How it ended
    pub status: JobStatus,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }
}

/// Run a batch of independent commands, at most `workers` at a time
/// (all cores when `None`).
///
/// Every command is allowed to run to termination regardless of sibling
/// failures; outcomes come back in input order once the whole batch is
/// done. No retries.
pub fn run_jobs(jobs: &[Job], workers: Option<usize>) -> Result<Vec<JobOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or(0))
        .build()
        .map_err(|e| PrimedxError::InvalidParameter {
            parameter: "workers".to_string(),
            reason: e.to_string(),
        })?;

    let outcomes = pool.install(|| jobs.par_iter().map(run_one).collect());
    Ok(outcomes)
}

fn run_one(job: &Job) -> JobOutcome {
    let command_line = job.command.command_line();
    let status = match job.command.execute() {
        Ok(output) if output.status.success() => JobStatus::Success,
        Ok(output) => JobStatus::Failed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Err(e) => JobStatus::NotStarted { error: e.to_string() },
    };
    JobOutcome { label: job.label.clone(), command_line, status }
}

/// Apply the stage output-directory policy.
///
/// With no directory set, outputs go alongside each input and nothing is
/// created. With a directory set, it is created here, failing if it already
/// exists unless `force` permits reuse.
pub fn prepare_output_dir(outdir: Option<&Path>, force: bool) -> Result<()> {
    let Some(dir) = outdir else { return Ok(()) };
    if dir.exists() {
        if !force {
            return Err(PrimedxError::InvalidParameter {
                parameter: "outdir".to_string(),
                reason: format!(
                    "output directory '{}' already exists (pass --force to reuse it)",
                    dir.display()
                ),
            });
        }
        return Ok(());
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Derive the per-genome output stem for a stage: the input's path without
/// its extension, relocated into `outdir` when one is set.
pub fn output_stem(seqfile: &Path, outdir: Option<&Path>) -> PathBuf {
    match outdir {
        None => seqfile.with_extension(""),
        Some(dir) => {
            let stem = seqfile.file_stem().unwrap_or(seqfile.as_os_str());
            dir.join(stem)
        }
    }
}

/// Append an extension to a stem, without clobbering any dots already in
/// the file name.
pub fn stem_with_extension(stem: &Path, extension: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_os_string();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}
