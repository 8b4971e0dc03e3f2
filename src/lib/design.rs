//! Command builder for the primer-design stage (EMBOSS ePrimer3).
//!
//! Design options are an explicit, enumerated structure: every recognized
//! tool option is a typed field, so unrecognized options cannot be smuggled
//! through. The two product-size bounds are never passed through directly;
//! they are combined into the single `-prange min-max` option the tool
//! expects. Values are not pre-validated beyond their types — a value the
//! tool rejects surfaces as that command's failure at execution time.

use std::path::{Path, PathBuf};

use crate::collection::GenomeCollection;
use crate::errors::Result;
use crate::jobs::{output_stem, prepare_output_dir, stem_with_extension, Job, ToolCommand};

/// Key under which this stage records its command in the audit trail.
pub const STAGE: &str = "eprimer3";

/// Product-size range used when neither bound is supplied.
const DEFAULT_PSIZE_MIN: u32 = 0;
const DEFAULT_PSIZE_MAX: u32 = 200;

/// Recognized ePrimer3 design options. Unset fields are omitted from the
/// command line, leaving the tool's own defaults in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignOptions {
    /// Number of primer pairs to report per sequence
    pub num_return: Option<u32>,
    /// Optimal primer oligo size
    pub opt_size: Option<u32>,
    /// Minimum primer oligo size
    pub min_size: Option<u32>,
    /// Maximum primer oligo size
    pub max_size: Option<u32>,
    /// Optimal primer melting temperature
    pub opt_tm: Option<u32>,
    /// Minimum primer melting temperature
    pub min_tm: Option<u32>,
    /// Maximum primer melting temperature
    pub max_tm: Option<u32>,
    /// Optimal primer GC percentage
    pub opt_gc: Option<u32>,
    /// Minimum primer GC percentage
    pub min_gc: Option<u32>,
    /// Maximum primer GC percentage
    pub max_gc: Option<u32>,
    /// Optimal amplicon size
    pub psize_opt: Option<u32>,
    /// Minimum amplicon size (combined with `psize_max` into `-prange`)
    pub psize_min: Option<u32>,
    /// Maximum amplicon size (combined with `psize_min` into `-prange`)
    pub psize_max: Option<u32>,
    /// Maximum mononucleotide run length in a primer
    pub max_polyx: Option<u32>,
    /// Also design an internal reporter oligo
    pub hybrid_probe: bool,
    /// Optimal internal oligo size
    pub oligo_opt_size: Option<u32>,
    /// Minimum internal oligo size
    pub oligo_min_size: Option<u32>,
    /// Maximum internal oligo size
    pub oligo_max_size: Option<u32>,
    /// Optimal internal oligo melting temperature
    pub oligo_opt_tm: Option<u32>,
    /// Minimum internal oligo melting temperature
    pub oligo_min_tm: Option<u32>,
    /// Maximum internal oligo melting temperature
    pub oligo_max_tm: Option<u32>,
    /// Optimal internal oligo GC percentage
    pub oligo_opt_gc: Option<u32>,
    /// Minimum internal oligo GC percentage
    pub oligo_min_gc: Option<u32>,
    /// Maximum internal oligo GC percentage
    pub oligo_max_gc: Option<u32>,
}

impl DesignOptions {
    /// The derived `-prange` value: `min-max`, defaulting to `0-200`.
    pub fn size_range(&self) -> String {
        format!(
            "{}-{}",
            self.psize_min.unwrap_or(DEFAULT_PSIZE_MIN),
            self.psize_max.unwrap_or(DEFAULT_PSIZE_MAX)
        )
    }

    /// Append the recognized options to a command, in a fixed order.
    fn apply(&self, mut command: ToolCommand) -> ToolCommand {
        let numeric: [(&str, Option<u32>); 21] = [
            ("-numreturn", self.num_return),
            ("-osize", self.opt_size),
            ("-minsize", self.min_size),
            ("-maxsize", self.max_size),
            ("-opttm", self.opt_tm),
            ("-mintm", self.min_tm),
            ("-maxtm", self.max_tm),
            ("-ogcpercent", self.opt_gc),
            ("-mingc", self.min_gc),
            ("-maxgc", self.max_gc),
            ("-psizeopt", self.psize_opt),
            ("-maxpolyx", self.max_polyx),
            ("-osizeopt", self.oligo_opt_size),
            ("-ominsize", self.oligo_min_size),
            ("-omaxsize", self.oligo_max_size),
            ("-otmopt", self.oligo_opt_tm),
            ("-otmmin", self.oligo_min_tm),
            ("-otmmax", self.oligo_max_tm),
            ("-ogcopt", self.oligo_opt_gc),
            ("-ogcmin", self.oligo_min_gc),
            ("-ogcmax", self.oligo_max_gc),
        ];
        for (flag, value) in numeric {
            if let Some(value) = value {
                command = command.option(flag, value);
            }
        }
        if self.hybrid_probe {
            command = command.arg("-hybridprobe");
        }
        command.option("-prange", self.size_range())
    }
}

/// A planned primer-design invocation for one genome.
#[derive(Debug, Clone)]
pub struct DesignJob {
    /// The job to execute
    pub job: Job,
    /// Where the design tool will write its raw primer report
    pub raw_output: PathBuf,
}

/// Build one command per genome, in collection order.
pub fn build_commands(
    collection: &mut GenomeCollection,
    exe: &str,
    outdir: Option<&Path>,
    force: bool,
    options: &DesignOptions,
) -> Result<Vec<DesignJob>> {
    prepare_output_dir(outdir, force)?;

    let mut jobs = Vec::with_capacity(collection.len());
    for record in collection.records_mut() {
        let stem = output_stem(&record.seqfile, outdir);
        let raw_output = stem_with_extension(&stem, "eprimer3");
        let command = options.apply(
            ToolCommand::new(exe)
                .arg("-auto")
                .option("-sequence", record.seqfile.display())
                .option("-outfile", raw_output.display()),
        );
        record.record_command(STAGE, command.command_line());
        jobs.push(DesignJob { job: Job::new(&record.name, command), raw_output });
    }
    Ok(jobs)
}
