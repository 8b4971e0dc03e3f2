//! Design PCR primers for every genome with EMBOSS ePrimer3.
//!
//! Runs one design invocation per genome in parallel, then parses each raw
//! report, assigns deterministic primer names, writes the named report and
//! its JSON form, and records the JSON path on each genome. Parsing starts
//! only after the whole batch has terminated; any failed invocation fails
//! the stage before parsing.

use anyhow::Result;
use clap::Parser;
use log::info;

use primedx_lib::design::{self, DesignOptions};
use primedx_lib::logging::OperationTimer;
use primedx_lib::primers::{self, Eprimer3Parser};
use primedx_lib::validation::{validate_min_max, validate_seqfiles_exist};

use crate::commands::command::Command;
use crate::commands::common::{
    run_stage_batch, ConfigIoOptions, SchedulerOptions, StageOutputOptions,
};

/// Design primers with EMBOSS ePrimer3.
#[derive(Debug, Parser)]
#[command(
    name = "eprimer3",
    about = "Design PCR primers for each genome",
    long_about = r#"
Run EMBOSS ePrimer3 primer design on every genome in the config file.

One command is built per genome and the batch runs in parallel, bounded by
--workers. After every command has terminated, each genome's raw report is
parsed, its primers are named <stem>_primer_NNNNN in report order, and the
named report plus a JSON primer set are written next to it. The JSON path is
recorded on the genome and the updated config written to the output path.

The amplicon size bounds --psizemin/--psizemax are combined into the tool's
single -prange option, defaulting to 0-200.

Example usage:
  primedx eprimer3 with_features.tab with_primers.json --outdir designs
  primedx eprimer3 with_features.tab with_primers.json --psizemin 100 --psizemax 250
"#
)]
pub struct Eprimer3 {
    /// Input/output config files
    #[command(flatten)]
    pub io: ConfigIoOptions,

    /// Path to the eprimer3 executable
    #[arg(long = "eprimer3", default_value = "eprimer3")]
    pub eprimer3: String,

    /// Stage output location
    #[command(flatten)]
    pub output: StageOutputOptions,

    /// Concurrency bound
    #[command(flatten)]
    pub scheduler: SchedulerOptions,

    /// Number of primer pairs to report per genome
    #[arg(long = "numreturn")]
    pub numreturn: Option<u32>,

    /// Optimal primer oligo size
    #[arg(long = "osize")]
    pub osize: Option<u32>,

    /// Minimum primer oligo size
    #[arg(long = "minsize")]
    pub minsize: Option<u32>,

    /// Maximum primer oligo size
    #[arg(long = "maxsize")]
    pub maxsize: Option<u32>,

    /// Optimal primer melting temperature
    #[arg(long = "opttm")]
    pub opttm: Option<u32>,

    /// Minimum primer melting temperature
    #[arg(long = "mintm")]
    pub mintm: Option<u32>,

    /// Maximum primer melting temperature
    #[arg(long = "maxtm")]
    pub maxtm: Option<u32>,

    /// Optimal primer GC percentage
    #[arg(long = "ogcpercent")]
    pub ogcpercent: Option<u32>,

    /// Minimum primer GC percentage
    #[arg(long = "mingc")]
    pub mingc: Option<u32>,

    /// Maximum primer GC percentage
    #[arg(long = "maxgc")]
    pub maxgc: Option<u32>,

    /// Optimal amplicon size
    #[arg(long = "psizeopt")]
    pub psizeopt: Option<u32>,

    /// Minimum amplicon size (combined into -prange)
    #[arg(long = "psizemin")]
    pub psizemin: Option<u32>,

    /// Maximum amplicon size (combined into -prange)
    #[arg(long = "psizemax")]
    pub psizemax: Option<u32>,

    /// Maximum mononucleotide run length in a primer
    #[arg(long = "maxpolyx")]
    pub maxpolyx: Option<u32>,

    /// Also design an internal reporter oligo
    #[arg(long = "hybridprobe", default_value = "false")]
    pub hybridprobe: bool,

    /// Optimal internal oligo size
    #[arg(long = "oligoosize")]
    pub oligoosize: Option<u32>,

    /// Minimum internal oligo size
    #[arg(long = "oligominsize")]
    pub oligominsize: Option<u32>,

    /// Maximum internal oligo size
    #[arg(long = "oligomaxsize")]
    pub oligomaxsize: Option<u32>,

    /// Optimal internal oligo melting temperature
    #[arg(long = "oligootm")]
    pub oligootm: Option<u32>,

    /// Minimum internal oligo melting temperature
    #[arg(long = "oligomintm")]
    pub oligomintm: Option<u32>,

    /// Maximum internal oligo melting temperature
    #[arg(long = "oligomaxtm")]
    pub oligomaxtm: Option<u32>,

    /// Optimal internal oligo GC percentage
    #[arg(long = "oligoogcpercent")]
    pub oligoogcpercent: Option<u32>,

    /// Minimum internal oligo GC percentage
    #[arg(long = "oligomingc")]
    pub oligomingc: Option<u32>,

    /// Maximum internal oligo GC percentage
    #[arg(long = "oligomaxgc")]
    pub oligomaxgc: Option<u32>,
}

impl Eprimer3 {
    fn design_options(&self) -> DesignOptions {
        DesignOptions {
            num_return: self.numreturn,
            opt_size: self.osize,
            min_size: self.minsize,
            max_size: self.maxsize,
            opt_tm: self.opttm,
            min_tm: self.mintm,
            max_tm: self.maxtm,
            opt_gc: self.ogcpercent,
            min_gc: self.mingc,
            max_gc: self.maxgc,
            psize_opt: self.psizeopt,
            psize_min: self.psizemin,
            psize_max: self.psizemax,
            max_polyx: self.maxpolyx,
            hybrid_probe: self.hybridprobe,
            oligo_opt_size: self.oligoosize,
            oligo_min_size: self.oligominsize,
            oligo_max_size: self.oligomaxsize,
            oligo_opt_tm: self.oligootm,
            oligo_min_tm: self.oligomintm,
            oligo_max_tm: self.oligomaxtm,
            oligo_opt_gc: self.oligoogcpercent,
            oligo_min_gc: self.oligomingc,
            oligo_max_gc: self.oligomaxgc,
        }
    }
}

impl Command for Eprimer3 {
    fn execute(&self, _command_line: &str) -> Result<()> {
        self.scheduler.validate()?;
        validate_min_max(self.psizemin, self.psizemax, "psizemin", "psizemax")?;
        validate_min_max(self.minsize, self.maxsize, "minsize", "maxsize")?;

        let mut collection = self.io.load()?;
        validate_seqfiles_exist(&collection)?;
        info!("{}", self.scheduler.log_message());

        let options = self.design_options();
        let timer = OperationTimer::new("Designing primers");
        let jobs = design::build_commands(
            &mut collection,
            &self.eprimer3,
            self.output.outdir(),
            self.output.force,
            &options,
        )?;

        let batch: Vec<_> = jobs.iter().map(|j| j.job.clone()).collect();
        run_stage_batch(design::STAGE, &batch, self.scheduler.workers)?;

        // Hard barrier passed: every tool terminated, now parse and name
        for job in &jobs {
            let (named, named_path) = primers::load_and_name(&job.raw_output, &Eprimer3Parser)?;
            let json_path = named_path.with_extension("json");
            primers::to_json(&named, &json_path)?;
            info!("[{}] {}: {} primer(s)", design::STAGE, job.job.label, named.len());
            if let Some(record) = collection.get_mut(&job.job.label) {
                record.primers = Some(json_path);
            }
        }
        timer.log_completion(collection.len());
        self.io.persist(&collection)
    }
}
