//! Command builder for the gene-prediction stage.
//!
//! One prodigal invocation per genome:
//! `<exe> -a <stem>.features -i <seqfile> -o <stem>.prodigalout`.
//! The `.features` file (predicted coding sequences) is the stage product
//! that later stages design primers against.

use std::path::{Path, PathBuf};

use crate::collection::GenomeCollection;
use crate::errors::Result;
use crate::jobs::{output_stem, prepare_output_dir, stem_with_extension, Job, ToolCommand};

/// Key under which this stage records its command in the audit trail.
pub const STAGE: &str = "prodigal";

/// A planned gene-prediction invocation for one genome, with its output
/// paths computed up front rather than recovered from the command string.
#[derive(Debug, Clone)]
pub struct PredictJob {
    /// The job to execute
    pub job: Job,
    /// Where the predictor will write coding-sequence features
    pub features: PathBuf,
    /// Where the predictor will write its run log
    pub raw_output: PathBuf,
}

/// Build one command per genome, in collection order.
///
/// Applies the shared output-directory policy and records each rendered
/// command line into that genome's audit trail.
pub fn build_commands(
    collection: &mut GenomeCollection,
    exe: &str,
    outdir: Option<&Path>,
    force: bool,
) -> Result<Vec<PredictJob>> {
    prepare_output_dir(outdir, force)?;

    let mut jobs = Vec::with_capacity(collection.len());
    for record in collection.records_mut() {
        let stem = output_stem(&record.seqfile, outdir);
        let features = stem_with_extension(&stem, "features");
        let raw_output = stem_with_extension(&stem, "prodigalout");
        let command = ToolCommand::new(exe)
            .option("-a", features.display())
            .option("-i", record.seqfile.display())
            .option("-o", raw_output.display());
        record.record_command(STAGE, command.command_line());
        jobs.push(PredictJob {
            job: Job::new(&record.name, command),
            features,
            raw_output,
        });
    }
    Ok(jobs)
}
