//! Common CLI options shared across stage commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`, plus the batch-running helper
//! that applies the stage failure policy.

use std::path::{Path, PathBuf};

use clap::Args;

use primedx_lib::collection::GenomeCollection;
use primedx_lib::errors::PrimedxError;
use primedx_lib::jobs::{run_jobs, Job, JobOutcome};
use primedx_lib::logging::log_batch_outcomes;
use primedx_lib::validation::{validate_file_exists, validate_positive};

/// Input/output config files for commands that thread pipeline state.
#[derive(Debug, Clone, Args)]
pub struct ConfigIoOptions {
    /// Input config file (.tab, .conf or .json)
    pub infile: PathBuf,

    /// Output config file, written only when the stage succeeds
    pub outfile: PathBuf,
}

impl ConfigIoOptions {
    /// Loads the input config after checking it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, has an unrecognized
    /// extension, or fails to parse.
    pub fn load(&self) -> anyhow::Result<GenomeCollection> {
        validate_file_exists(&self.infile, "Config file")?;
        Ok(GenomeCollection::load(&self.infile)?)
    }

    /// Persists the updated collection to the output path.
    pub fn persist(&self, collection: &GenomeCollection) -> anyhow::Result<()> {
        collection.save(&self.outfile)?;
        log::info!(
            "Wrote config for {} genome(s) to {}",
            collection.len(),
            self.outfile.display()
        );
        Ok(())
    }
}

/// Options controlling where a stage writes its per-genome outputs.
#[derive(Debug, Clone, Default, Args)]
pub struct StageOutputOptions {
    /// Directory for stage outputs (default: alongside each input sequence)
    #[arg(long = "outdir")]
    pub outdir: Option<PathBuf>,

    /// Reuse the output directory if it already exists
    #[arg(short = 'f', long = "force", default_value = "false")]
    pub force: bool,
}

impl StageOutputOptions {
    #[must_use]
    pub fn outdir(&self) -> Option<&Path> {
        self.outdir.as_deref()
    }
}

/// Options bounding how many external tool commands run at once.
#[derive(Debug, Clone, Default, Args)]
pub struct SchedulerOptions {
    /// Maximum number of tool commands run concurrently (default: all cores)
    #[arg(short = 'w', long = "workers")]
    pub workers: Option<usize>,
}

impl SchedulerOptions {
    /// Validates the scheduler options.
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(workers) = self.workers {
            validate_positive(workers, "workers")?;
        }
        Ok(())
    }

    /// Returns a log message describing the scheduling configuration.
    #[must_use]
    pub fn log_message(&self) -> String {
        match self.workers {
            None => "Running tool commands on all cores".to_string(),
            Some(n) => format!("Running at most {n} tool command(s) at a time"),
        }
    }
}

/// Runs a stage's whole batch, then applies the failure policy: every
/// command runs to termination, failures are logged individually, and any
/// failure fails the stage so the caller neither parses outputs nor writes
/// the config.
pub fn run_stage_batch(
    stage: &str,
    jobs: &[Job],
    workers: Option<usize>,
) -> anyhow::Result<Vec<JobOutcome>> {
    for job in jobs {
        log::info!("[{stage}] {}: {}", job.label, job.command);
    }
    let outcomes = run_jobs(jobs, workers)?;
    let failed = log_batch_outcomes(stage, &outcomes);
    if failed > 0 {
        return Err(PrimedxError::ToolFailure {
            stage: stage.to_string(),
            failed,
            total: outcomes.len(),
        }
        .into());
    }
    Ok(outcomes)
}
