//! Command builder for the similarity-screen stage (BLASTN).
//!
//! Screens each genome's primer FASTA against a negative-example database.
//! Short, ungapped, high-identity matches are what we care about for
//! cross-reactivity, hence `blastn-short` with `-ungapped` and a 90%
//! identity floor.

use std::path::{Path, PathBuf};

use crate::collection::GenomeCollection;
use crate::errors::{PrimedxError, Result};
use crate::jobs::{output_stem, prepare_output_dir, stem_with_extension, Job, ToolCommand};

/// Key under which this stage records its command in the audit trail.
pub const STAGE: &str = "blastscreen";

/// A planned screening invocation for one genome.
#[derive(Debug, Clone)]
pub struct ScreenJob {
    /// The job to execute
    pub job: Job,
    /// Where the screen will write its tabular hit report
    pub raw_output: PathBuf,
}

/// Build one command per genome, in collection order.
///
/// Every genome must already have its primer FASTA (`fastafname`) in place;
/// a missing one is a prerequisite error raised before any command is
/// built.
pub fn build_commands(
    collection: &mut GenomeCollection,
    db: &Path,
    exe: &str,
    outdir: Option<&Path>,
    force: bool,
) -> Result<Vec<ScreenJob>> {
    // Check the whole collection before creating anything on disk
    for record in collection.records() {
        if record.fastafname.is_none() {
            return Err(PrimedxError::MissingPrerequisite {
                stage: STAGE.to_string(),
                what: format!(
                    "genome '{}' has no primer FASTA (run the eprimer3 stage first)",
                    record.name
                ),
            });
        }
    }

    prepare_output_dir(outdir, force)?;

    let mut jobs = Vec::with_capacity(collection.len());
    for record in collection.records_mut() {
        let query = record.fastafname.as_ref().expect("checked above").clone();
        let stem = output_stem(&record.seqfile, outdir);
        let raw_output = stem_with_extension(&stem, "blasttab");
        let command = ToolCommand::new(exe)
            .option("-query", query.display())
            .option("-db", db.display())
            .option("-out", raw_output.display())
            .option("-task", "blastn-short")
            .option("-max_target_seqs", 1)
            .option("-outfmt", 6)
            .option("-perc_identity", 90)
            .arg("-ungapped");
        record.record_command(STAGE, command.command_line());
        jobs.push(ScreenJob { job: Job::new(&record.name, command), raw_output });
    }
    Ok(jobs)
}
