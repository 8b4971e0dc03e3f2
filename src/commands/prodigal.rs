//! Predict coding sequences for every genome in a config file.
//!
//! Runs one prodigal invocation per genome in parallel, records the features
//! path on each genome, and writes the updated config. Any failed invocation
//! fails the stage: the batch still runs to completion, failures are logged,
//! and the output config is not written.

use anyhow::Result;
use clap::Parser;
use log::info;

use primedx_lib::logging::OperationTimer;
use primedx_lib::predict;
use primedx_lib::validation::validate_seqfiles_exist;

use crate::commands::command::Command;
use crate::commands::common::{
    run_stage_batch, ConfigIoOptions, SchedulerOptions, StageOutputOptions,
};

/// Predict coding sequences with prodigal.
#[derive(Debug, Parser)]
#[command(
    name = "prodigal",
    about = "Predict coding sequences for each genome",
    long_about = r#"
Run prodigal gene prediction on every genome in the config file.

One command is built per genome and the batch runs in parallel, bounded by
--workers. On success each genome's features path is recorded and the updated
config is written to the output path.

Example usage:
  primedx prodigal fixed.tab with_features.tab --outdir predictions
  primedx prodigal fixed.tab with_features.tab --prodigal /opt/bin/prodigal -w 8
"#
)]
pub struct Prodigal {
    /// Input/output config files
    #[command(flatten)]
    pub io: ConfigIoOptions,

    /// Path to the prodigal executable
    #[arg(long = "prodigal", default_value = "prodigal")]
    pub prodigal: String,

    /// Stage output location
    #[command(flatten)]
    pub output: StageOutputOptions,

    /// Concurrency bound
    #[command(flatten)]
    pub scheduler: SchedulerOptions,
}

impl Command for Prodigal {
    fn execute(&self, _command_line: &str) -> Result<()> {
        self.scheduler.validate()?;
        let mut collection = self.io.load()?;
        validate_seqfiles_exist(&collection)?;
        info!("{}", self.scheduler.log_message());

        let timer = OperationTimer::new("Predicting coding sequences");
        let jobs = predict::build_commands(
            &mut collection,
            &self.prodigal,
            self.output.outdir(),
            self.output.force,
        )?;

        let batch: Vec<_> = jobs.iter().map(|j| j.job.clone()).collect();
        run_stage_batch(predict::STAGE, &batch, self.scheduler.workers)?;

        for job in &jobs {
            if let Some(record) = collection.get_mut(&job.job.label) {
                record.features = Some(job.features.clone());
            }
        }
        timer.log_completion(collection.len());
        self.io.persist(&collection)
    }
}
