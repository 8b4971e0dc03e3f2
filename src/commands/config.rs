//! Validate, normalize and convert genome config files.
//!
//! This command is the pipeline's entry point: it checks that a config file
//! parses and that its sequence files are usable by the downstream tools,
//! optionally normalizing them in place (stitching multi-record FASTA files
//! into one record and replacing non-N ambiguity symbols), and converts
//! between the tab and JSON config forms.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use log::info;

use primedx_lib::collection::GenomeCollection;
use primedx_lib::sequence;
use primedx_lib::validation::{validate_file_exists, validate_seqfiles_exist};

use crate::commands::command::Command;

/// Validate and normalize a genome config file.
#[derive(Debug, Parser)]
#[command(
    name = "config",
    about = "Validate, normalize and convert genome config files",
    long_about = r#"
Validate a genome config file and prepare its sequences for the pipeline.

The downstream tools require each genome to be a single FASTA record whose
only ambiguity symbol is N. --validate reports which genomes need fixing;
--fix-sequences rewrites the offending sequence files in place (stitching
multi-record files and replacing IUPAC ambiguity symbols other than N) and
writes the updated config to the output path.

Example usage:
  primedx config genomes.tab --validate
  primedx config genomes.tab --fix-sequences -o fixed.tab
  primedx config genomes.tab --to-json genomes.json
"#
)]
pub struct Config {
    /// Input config file (.tab, .conf or .json)
    pub infile: PathBuf,

    /// Report which genomes need stitching or ambiguity replacement, then stop
    #[arg(long = "validate", default_value = "false")]
    pub validate: bool,

    /// Stitch and de-ambiguate sequence files in place
    #[arg(long = "fix-sequences", default_value = "false")]
    pub fix_sequences: bool,

    /// Also write the config in JSON form to this path
    #[arg(long = "to-json")]
    pub to_json: Option<PathBuf>,

    /// Output config file
    #[arg(short = 'o', long = "outfile")]
    pub outfile: Option<PathBuf>,
}

impl Command for Config {
    fn execute(&self, _command_line: &str) -> Result<()> {
        validate_file_exists(&self.infile, "Config file")?;
        let collection = GenomeCollection::load(&self.infile)?;
        info!("Loaded {} genome(s) from {}", collection.len(), self.infile.display());
        validate_seqfiles_exist(&collection)?;

        if self.validate {
            report(&collection)?;
            return Ok(());
        }

        if self.fix_sequences {
            let Some(outfile) = &self.outfile else {
                bail!("--fix-sequences requires -o/--outfile for the updated config");
            };
            fix_sequences(&collection)?;
            collection.save(outfile)?;
            info!("Wrote updated config to {}", outfile.display());
        } else if let Some(outfile) = &self.outfile {
            // Plain conversion/copy between the config forms
            collection.save(outfile)?;
            info!("Wrote config to {}", outfile.display());
        }

        if let Some(json_path) = &self.to_json {
            collection.write_json(json_path)?;
            info!("Wrote JSON config to {}", json_path.display());
        }

        if !self.fix_sequences && self.outfile.is_none() && self.to_json.is_none() {
            bail!("nothing to do: pass --validate, --fix-sequences, --to-json or -o/--outfile");
        }
        Ok(())
    }
}

/// Log each genome's normalization status without touching any file.
fn report(collection: &GenomeCollection) -> Result<()> {
    let mut needs_fixing = 0;
    for record in collection.records() {
        let report = sequence::inspect(&record.seqfile)?;
        if report.needs_stitch || report.has_ambiguities {
            needs_fixing += 1;
        }
        info!(
            "{}: needs_stitch={} has_ambiguities={}",
            record.name, report.needs_stitch, report.has_ambiguities
        );
    }
    if needs_fixing > 0 {
        info!("{needs_fixing} genome(s) need --fix-sequences before running the pipeline");
    } else {
        info!("All sequence files are ready");
    }
    Ok(())
}

/// Normalize every genome's sequence file in place.
fn fix_sequences(collection: &GenomeCollection) -> Result<()> {
    for record in collection.records() {
        let stitched = sequence::stitch(&record.seqfile)?;
        let replaced = sequence::replace_ambiguities(&record.seqfile)?;
        if stitched || replaced {
            info!(
                "{}: rewrote {} (stitched={stitched} replaced_ambiguities={replaced})",
                record.name,
                record.seqfile.display()
            );
        }
    }
    Ok(())
}
