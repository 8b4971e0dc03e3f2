//! Screen designed primers for cross-reactivity with BLASTN.
//!
//! Derives a query FASTA from each genome's JSON primer set, then runs one
//! blastn-short search per genome against the negative-example database.
//! Requires every genome to carry a primer set from the design stage; a
//! missing database path or primer set fails before anything is written.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use primedx_lib::errors::PrimedxError;
use primedx_lib::logging::OperationTimer;
use primedx_lib::primers::json_to_fasta;
use primedx_lib::screen;

use crate::commands::command::Command;
use crate::commands::common::{
    run_stage_batch, ConfigIoOptions, SchedulerOptions, StageOutputOptions,
};

/// Screen primers against a sequence database with BLASTN.
#[derive(Debug, Parser)]
#[command(
    name = "blastscreen",
    about = "Screen primers for cross-reactivity with BLASTN",
    long_about = r#"
Screen every genome's designed primers against a BLAST nucleotide database
of sequences the primers must not amplify.

Each genome's JSON primer set is first rendered as a query FASTA (forward,
reverse and any internal oligo per primer), then one blastn-short search per
genome runs in parallel, bounded by --workers. Hits land in tabular form
(-outfmt 6) at <stem>.blasttab.

Example usage:
  primedx blastscreen with_primers.json screened.json --db exclude_db
  primedx blastscreen with_primers.json screened.json --db exclude_db --outdir screen -w 4
"#
)]
pub struct Blastscreen {
    /// Input/output config files
    #[command(flatten)]
    pub io: ConfigIoOptions,

    /// BLAST nucleotide database to screen against
    #[arg(long = "db")]
    pub db: Option<PathBuf>,

    /// Path to the blastn executable
    #[arg(long = "blastn", default_value = "blastn")]
    pub blastn: String,

    /// Stage output location
    #[command(flatten)]
    pub output: StageOutputOptions,

    /// Concurrency bound
    #[command(flatten)]
    pub scheduler: SchedulerOptions,
}

impl Command for Blastscreen {
    fn execute(&self, _command_line: &str) -> Result<()> {
        self.scheduler.validate()?;
        let Some(db) = &self.db else {
            return Err(PrimedxError::MissingPrerequisite {
                stage: screen::STAGE.to_string(),
                what: "no screening database supplied (--db)".to_string(),
            }
            .into());
        };

        let mut collection = self.io.load()?;
        info!("{}", self.scheduler.log_message());

        // Every genome needs its primer set before any FASTA is derived
        for record in collection.records() {
            if record.primers.is_none() {
                return Err(PrimedxError::MissingPrerequisite {
                    stage: screen::STAGE.to_string(),
                    what: format!(
                        "genome '{}' has no primer set (run the eprimer3 stage first)",
                        record.name
                    ),
                }
                .into());
            }
        }

        let timer = OperationTimer::new("Screening primers");
        for record in collection.records_mut() {
            let json_path = record.primers.as_ref().expect("checked above");
            let fasta_path = json_to_fasta(json_path)?;
            record.fastafname = Some(fasta_path);
        }

        let jobs = screen::build_commands(
            &mut collection,
            db,
            &self.blastn,
            self.output.outdir(),
            self.output.force,
        )?;

        let batch: Vec<_> = jobs.iter().map(|j| j.job.clone()).collect();
        run_stage_batch(screen::STAGE, &batch, self.scheduler.workers)?;

        timer.log_completion(collection.len());
        self.io.persist(&collection)
    }
}
